use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Waitlist,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTripRequest {
    pub trip_id: String,
}

/// Outcome of `POST /api/bookings`. Decided entirely by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingResult {
    pub booking_id: String,
    pub trip_id: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub waitlist_position: Option<u32>,
    #[serde(default)]
    pub qr_token: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waitlist_result_deserialization() {
        let json = r#"{"bookingId":"b-1","tripId":"t-1","status":"WAITLIST","waitlistPosition":3,"message":"Trip is full"}"#;
        let result: BookingResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.status, BookingStatus::Waitlist);
        assert_eq!(result.waitlist_position, Some(3));
        assert_eq!(result.qr_token, None);
    }

    #[test]
    fn test_book_request_is_camel_case() {
        let body = serde_json::to_value(BookTripRequest { trip_id: "t-9".into() }).unwrap();
        assert_eq!(body, serde_json::json!({ "tripId": "t-9" }));
    }
}
