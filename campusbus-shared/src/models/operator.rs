use serde::{Deserialize, Serialize};

/// Body of `POST /api/qr/validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrValidateRequest {
    pub qr_token: String,
    pub trip_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanResult {
    Valid,
    Invalid,
    Duplicate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QrValidateResponse {
    pub result: ScanResult,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Incident filed by a bus operator against a passenger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReport {
    pub trip_id: String,
    pub student_id: String,
    pub student_name: String,
    pub reason: String,
    #[serde(default)]
    pub details: String,
}
