use std::sync::Arc;

use campusbus_core::BusApi;
use campusbus_nav::{BookedTripDetails, StudentEvent};
use serde::Serialize;
use tracing::info;

use crate::error::Notice;
use crate::store::IntentSender;

/// What the active-trip screen renders
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TicketView {
    pub route: String,
    pub date: String,
    pub time: String,
    pub bus_number: String,
    /// Payload for the boarding QR code; absent until the backend issues one
    pub qr_token: Option<String>,
}

impl TicketView {
    pub fn from_booking(details: &BookedTripDetails) -> Self {
        Self {
            route: details.route.display_name().to_string(),
            date: details.date.clone(),
            time: details.time.clone(),
            bus_number: details
                .bus_number
                .clone()
                .unwrap_or_else(|| "To be assigned".to_string()),
            qr_token: details.qr_token.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The booking is gone; `CancelConfirmed` has been posted
    Cancelled(Notice),
    /// Booking and screen untouched
    Failed(Notice),
    /// No booking held
    NoBooking,
}

#[derive(Clone)]
pub struct CancellationFlow {
    api: Arc<dyn BusApi>,
    intents: IntentSender<StudentEvent>,
}

impl CancellationFlow {
    pub fn new(api: Arc<dyn BusApi>, intents: IntentSender<StudentEvent>) -> Self {
        Self { api, intents }
    }

    /// Cancel the held booking. No undo.
    pub async fn cancel(&self, booked: Option<&BookedTripDetails>) -> CancelOutcome {
        let booking = match booked {
            Some(booking) => booking,
            None => return CancelOutcome::NoBooking,
        };

        match self.api.cancel_booking(&booking.booking_id).await {
            Ok(response) => {
                info!(booking_id = %booking.booking_id, "Booking cancelled");
                self.intents.send(StudentEvent::CancelConfirmed);
                let message = if response.message.is_empty() {
                    "Your trip has been cancelled.".to_string()
                } else {
                    response.message
                };
                CancelOutcome::Cancelled(Notice::new("Trip Cancelled", message))
            }
            Err(e) => CancelOutcome::Failed(Notice::failure("Cancellation Failed", &e)),
        }
    }
}
