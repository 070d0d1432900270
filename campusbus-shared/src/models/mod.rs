pub mod auth;
pub mod booking;
pub mod operator;
pub mod trip;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use booking::{BookTripRequest, BookingResult, BookingStatus, MessageResponse};
pub use operator::{IncidentReport, QrValidateRequest, QrValidateResponse, ScanResult};
pub use trip::{Route, Trip, TripStatus};

use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-success responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub message: String,
}
