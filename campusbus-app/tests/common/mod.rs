#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use campusbus_core::{BusApi, CoreError, CoreResult};
use campusbus_shared::models::{
    AuthResponse, BookingResult, BookingStatus, IncidentReport, LoginRequest, MessageResponse,
    QrValidateRequest, QrValidateResponse, RegisterRequest, Route, ScanResult, Trip, TripStatus,
};
use campusbus_shared::Secret;
use chrono::NaiveDate;

pub const PASSWORD: &str = "secret";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 10).unwrap()
}

pub fn trip(trip_id: &str, route: Route, departure_time: &str, booked_count: i32) -> Trip {
    Trip {
        trip_id: trip_id.to_string(),
        route,
        trip_date: today(),
        departure_time: departure_time.to_string(),
        capacity: 40,
        faculty_reserved: 5,
        booked_count,
        waitlist_count: 0,
        status: TripStatus::Active,
        available_seats: None,
    }
}

pub fn confirmed(booking_id: &str, trip_id: &str) -> BookingResult {
    BookingResult {
        booking_id: booking_id.to_string(),
        trip_id: trip_id.to_string(),
        status: BookingStatus::Confirmed,
        waitlist_position: None,
        qr_token: Some(format!("qr-{}", booking_id)),
        message: "Booking confirmed!".to_string(),
    }
}

pub fn valid_scan(student_id: &str, name: &str) -> QrValidateResponse {
    QrValidateResponse {
        result: ScanResult::Valid,
        student_id: Some(student_id.to_string()),
        student_name: Some(name.to_string()),
        message: String::new(),
    }
}

pub fn scan_result(result: ScanResult) -> QrValidateResponse {
    QrValidateResponse {
        result,
        student_id: None,
        student_name: None,
        message: String::new(),
    }
}

/// In-memory backend. Every call is recorded; responses are set per test.
#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<String>>,
    pub login_error: Mutex<Option<CoreError>>,
    pub trips: Mutex<HashMap<Route, Vec<Trip>>>,
    pub trips_error: Mutex<Option<CoreError>>,
    pub booking: Mutex<Option<CoreResult<BookingResult>>>,
    pub cancel_error: Mutex<Option<CoreError>>,
    pub scans: Mutex<HashMap<String, QrValidateResponse>>,
    pub reports: Mutex<Vec<IncidentReport>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trips(self, route: Route, trips: Vec<Trip>) -> Self {
        self.trips.lock().unwrap().insert(route, trips);
        self
    }

    pub fn set_booking(&self, result: CoreResult<BookingResult>) {
        *self.booking.lock().unwrap() = Some(result);
    }

    pub fn set_login_error(&self, error: Option<CoreError>) {
        *self.login_error.lock().unwrap() = error;
    }

    pub fn set_trips_error(&self, error: Option<CoreError>) {
        *self.trips_error.lock().unwrap() = error;
    }

    pub fn set_cancel_error(&self, error: Option<CoreError>) {
        *self.cancel_error.lock().unwrap() = error;
    }

    pub fn set_scan(&self, qr_token: &str, response: QrValidateResponse) {
        self.scans.lock().unwrap().insert(qr_token.to_string(), response);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn authenticate(&self, email: &str, password: &Secret<String>) -> CoreResult<AuthResponse> {
        if let Some(e) = self.login_error.lock().unwrap().clone() {
            return Err(e);
        }
        if password.expose() != PASSWORD {
            return Err(CoreError::Backend {
                status: 401,
                message: "Invalid credentials".to_string(),
            });
        }
        Ok(AuthResponse {
            token: Secret::new(format!("token-{}", email)),
            message: "Welcome".to_string(),
        })
    }
}

#[async_trait]
impl BusApi for FakeApi {
    async fn register(&self, request: &RegisterRequest) -> CoreResult<AuthResponse> {
        self.record(format!("register {}", request.email));
        self.authenticate(&request.email, &request.password)
    }

    async fn login(&self, request: &LoginRequest) -> CoreResult<AuthResponse> {
        self.record(format!("login {}", request.email));
        self.authenticate(&request.email, &request.password)
    }

    async fn available_trips(&self, route: Route, trip_date: NaiveDate) -> CoreResult<Vec<Trip>> {
        self.record(format!("trips {} {}", route, trip_date));
        if let Some(e) = self.trips_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.trips.lock().unwrap().get(&route).cloned().unwrap_or_default())
    }

    async fn book_trip(&self, trip_id: &str) -> CoreResult<BookingResult> {
        self.record(format!("book {}", trip_id));
        self.booking
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(confirmed("b-1", trip_id)))
    }

    async fn cancel_booking(&self, booking_id: &str) -> CoreResult<MessageResponse> {
        self.record(format!("cancel {}", booking_id));
        match self.cancel_error.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(MessageResponse {
                message: "Booking cancelled".to_string(),
            }),
        }
    }

    async fn validate_qr(&self, request: &QrValidateRequest) -> CoreResult<QrValidateResponse> {
        self.record(format!("scan {} {}", request.trip_id, request.qr_token));
        Ok(self
            .scans
            .lock()
            .unwrap()
            .get(&request.qr_token)
            .cloned()
            .unwrap_or_else(|| scan_result(ScanResult::Invalid)))
    }

    async fn report_incident(&self, report: &IncidentReport) -> CoreResult<MessageResponse> {
        self.record(format!("report {} {}", report.trip_id, report.student_id));
        self.reports.lock().unwrap().push(report.clone());
        Ok(MessageResponse {
            message: "Report received".to_string(),
        })
    }
}
