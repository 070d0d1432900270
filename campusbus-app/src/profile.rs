use campusbus_core::validation::require_fields;
use campusbus_core::CoreResult;
use campusbus_nav::StudentEvent;
use serde::Serialize;

use crate::error::Notice;
use crate::store::IntentSender;

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub roll_number: String,
    pub hostel: String,
    pub room_number: String,
    pub student_mobile: String,
    pub parent_mobile: String,
}

/// Student details kept for the profile screen
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StudentProfile {
    pub name: String,
    pub roll_number: String,
    pub hostel: String,
    pub room_number: String,
    pub student_mobile: String,
    pub parent_mobile: String,
}

impl ProfileForm {
    pub fn validate(&self) -> CoreResult<StudentProfile> {
        require_fields(&[
            ("Name", self.name.as_str()),
            ("Roll number", self.roll_number.as_str()),
            ("Hostel", self.hostel.as_str()),
            ("Room number", self.room_number.as_str()),
            ("Student mobile", self.student_mobile.as_str()),
            ("Parent mobile", self.parent_mobile.as_str()),
        ])?;

        Ok(StudentProfile {
            name: self.name.trim().to_string(),
            roll_number: self.roll_number.trim().to_string(),
            hostel: self.hostel.trim().to_string(),
            room_number: self.room_number.trim().to_string(),
            student_mobile: self.student_mobile.trim().to_string(),
            parent_mobile: self.parent_mobile.trim().to_string(),
        })
    }

    /// On success posts `ProfileComplete`; a blank field blocks the transition
    pub fn submit(&self, intents: &IntentSender<StudentEvent>) -> Result<(StudentProfile, Notice), Notice> {
        let profile = self.validate().map_err(|_| {
            Notice::new("Incomplete Form", "Please fill in all the details.")
        })?;
        intents.send(StudentEvent::ProfileComplete);
        Ok((
            profile,
            Notice::new("Profile Submitted", "Your details have been saved successfully!"),
        ))
    }
}
