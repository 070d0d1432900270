use campusbus_core::validation::require_fields;
use campusbus_core::{BusApi, CoreResult};
use campusbus_shared::models::IncidentReport;

use crate::error::Notice;
use crate::operator::scanner::Passenger;

/// Incident report modal opened from the passenger list
#[derive(Debug, Clone, Default)]
pub struct IncidentForm {
    pub student_id: String,
    pub student_name: String,
    pub reason: String,
    pub details: String,
}

impl IncidentForm {
    pub fn for_passenger(passenger: &Passenger) -> Self {
        Self {
            student_id: passenger.student_id.clone(),
            student_name: passenger.name.clone(),
            ..Self::default()
        }
    }

    pub fn validate(&self, trip_id: &str) -> CoreResult<IncidentReport> {
        require_fields(&[("Student", self.student_id.as_str()), ("Reason", self.reason.as_str())])?;
        Ok(IncidentReport {
            trip_id: trip_id.to_string(),
            student_id: self.student_id.clone(),
            student_name: self.student_name.clone(),
            reason: self.reason.trim().to_string(),
            details: self.details.trim().to_string(),
        })
    }

    pub async fn submit(&self, api: &dyn BusApi, trip_id: &str) -> Result<Notice, Notice> {
        let report = self
            .validate(trip_id)
            .map_err(|e| Notice::failure("Incomplete Report", &e))?;
        api.report_incident(&report)
            .await
            .map_err(|e| Notice::failure("Report Failed", &e))?;

        tracing::info!(trip_id, student_id = %report.student_id, "Incident reported");
        Ok(Notice::new(
            "Report Submitted",
            format!("Your report for {} has been sent successfully.", report.student_name),
        ))
    }
}
