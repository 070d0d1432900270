use std::time::{Duration, Instant};

use campusbus_core::BusApi;
use campusbus_nav::{ScanFeedback, ScanPanel};
use campusbus_shared::models::{QrValidateRequest, ScanResult};
use serde::Serialize;

use crate::error::Notice;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Passenger {
    pub student_id: String,
    pub name: String,
}

/// Scanner screen for one shift: validates tickets and tracks who boarded
#[derive(Debug, Clone)]
pub struct Scanner {
    trip_id: String,
    expected: i32,
    panel: ScanPanel,
    boarded: Vec<Passenger>,
}

impl Scanner {
    pub fn new(trip_id: impl Into<String>, expected: i32, display_for: Duration) -> Self {
        Self {
            trip_id: trip_id.into(),
            expected,
            panel: ScanPanel::new(display_for),
            boarded: Vec::new(),
        }
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn feedback(&self) -> &ScanFeedback {
        self.panel.feedback()
    }

    pub fn clears_at(&self) -> Option<Instant> {
        self.panel.clears_at()
    }

    pub fn boarded(&self) -> &[Passenger] {
        &self.boarded
    }

    /// `(boarded, expected)` for the header counter
    pub fn counts(&self) -> (usize, i32) {
        (self.boarded.len(), self.expected)
    }

    /// Handle one camera read. Reads arriving while feedback is on screen are
    /// dropped without contacting the backend.
    pub async fn scan(&mut self, api: &dyn BusApi, qr_token: &str, now: Instant) -> Result<Option<ScanFeedback>, Notice> {
        if !self.panel.is_accepting() {
            return Ok(None);
        }

        let request = QrValidateRequest {
            qr_token: qr_token.to_string(),
            trip_id: self.trip_id.clone(),
        };
        let response = api
            .validate_qr(&request)
            .await
            .map_err(|e| Notice::failure("Scan Failed", &e))?;

        let feedback = match response.result {
            ScanResult::Valid => {
                let name = response.student_name.clone().unwrap_or_default();
                let student_id = response.student_id.clone().unwrap_or_else(|| qr_token.to_string());
                if !self.boarded.iter().any(|p| p.student_id == student_id) {
                    self.boarded.push(Passenger {
                        student_id,
                        name: name.clone(),
                    });
                }
                ScanFeedback::Valid { name }
            }
            ScanResult::Invalid => ScanFeedback::Invalid,
            ScanResult::Duplicate => ScanFeedback::Duplicate,
        };

        tracing::info!(trip_id = %self.trip_id, result = feedback.label(), "Ticket scanned");
        self.panel.show(feedback.clone(), now);
        Ok(Some(feedback))
    }

    /// Timer hook; clears expired feedback
    pub fn tick(&mut self, now: Instant) -> bool {
        self.panel.tick(now)
    }
}
