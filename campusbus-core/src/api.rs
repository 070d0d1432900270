use async_trait::async_trait;
use campusbus_shared::models::{
    AuthResponse, BookingResult, IncidentReport, LoginRequest, MessageResponse,
    QrValidateRequest, QrValidateResponse, RegisterRequest, Route, Trip,
};
use chrono::NaiveDate;

use crate::CoreResult;

/// Request/response surface of the booking backend.
///
/// Implementations attach the session's bearer token to authenticated calls and
/// fail with [`crate::CoreError::Unauthenticated`] before doing any I/O when none is held.
/// They never retry.
#[async_trait]
pub trait BusApi: Send + Sync {
    /// `POST /api/auth/register`
    async fn register(&self, request: &RegisterRequest) -> CoreResult<AuthResponse>;

    /// `POST /api/auth/login`
    async fn login(&self, request: &LoginRequest) -> CoreResult<AuthResponse>;

    /// `GET /api/trips/available?route&tripDate`
    ///
    /// A body that does not decode as a trip list yields an empty list.
    async fn available_trips(&self, route: Route, trip_date: NaiveDate) -> CoreResult<Vec<Trip>>;

    /// `POST /api/bookings`
    async fn book_trip(&self, trip_id: &str) -> CoreResult<BookingResult>;

    /// `DELETE /api/bookings/{bookingId}`
    async fn cancel_booking(&self, booking_id: &str) -> CoreResult<MessageResponse>;

    /// `POST /api/qr/validate` (operator token)
    async fn validate_qr(&self, request: &QrValidateRequest) -> CoreResult<QrValidateResponse>;

    /// `POST /api/incidents` (operator token)
    async fn report_incident(&self, report: &IncidentReport) -> CoreResult<MessageResponse>;
}
