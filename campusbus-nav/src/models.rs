use campusbus_shared::models::Route;
use serde::{Deserialize, Serialize};

/// The trip the student holds a confirmed seat on.
///
/// Written by the `BookingConfirmed` transition, read by the ticket screen,
/// cleared by `CancelConfirmed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookedTripDetails {
    pub booking_id: String,
    pub trip_id: String,
    /// 12-hour display time
    pub time: String,
    /// Display date, e.g. `October 10, 2025`
    pub date: String,
    pub route: Route,
    pub bus_number: Option<String>,
    /// Boarding token rendered as the ticket's QR code
    pub qr_token: Option<String>,
}

/// Result of feeding one event to a state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    pub from: S,
    pub next: S,
    /// `false` when the (state, event) pair is not in the table and the
    /// machine fell back to its initial screen.
    pub declared: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavError {
    #[error("No transition for {event} from {from}")]
    Undeclared {
        from: String,
        event: String,
    },
}
