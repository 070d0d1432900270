use std::collections::HashMap;
use std::sync::Arc;

use campusbus_core::trips::{display_date, transform_trips, DayChoice, TripRow};
use campusbus_core::{BusApi, CoreResult};
use campusbus_nav::{BookedTripDetails, StudentEvent};
use campusbus_shared::models::{BookingResult, BookingStatus, Route, Trip};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Notice;
use crate::store::IntentSender;

/// Cache key for one trip list
pub type TripKey = (Route, NaiveDate);

/// A trip list request in flight. Its response is applied only while it is
/// still the newest request and the dashboard still shows the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRequest {
    pub key: TripKey,
    generation: u64,
}

/// What the booking modal is about to submit
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SelectedTripDraft {
    pub trip_id: String,
    pub time: String,
    /// Display date
    pub date: String,
    pub route: Route,
    /// Presentation only: the backend decides confirmed vs waitlisted
    pub is_waitlist: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookingModal {
    pub draft: SelectedTripDraft,
    /// Submit control is disabled while true
    pub submitting: bool,
}

/// Ticket for one booking request, issued by [`Dashboard::begin_booking`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSubmission {
    pub draft: SelectedTripDraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Confirmed {
        details: BookedTripDetails,
        notice: Notice,
    },
    Waitlisted {
        draft: SelectedTripDraft,
        position: Option<u32>,
        notice: Notice,
    },
    Failed(Notice),
    /// Nothing selected, or a submission is already in flight
    Ignored,
}

/// The student home screen: route/date tabs, the trip list and the booking modal
pub struct Dashboard {
    api: Arc<dyn BusApi>,
    intents: IntentSender<StudentEvent>,
    today: NaiveDate,
    route: Route,
    day: DayChoice,
    cache: HashMap<TripKey, Vec<TripRow>>,
    generation: u64,
    loading: bool,
    modal: Option<BookingModal>,
    notice: Option<Notice>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn BusApi>, intents: IntentSender<StudentEvent>, today: NaiveDate) -> Self {
        Self {
            api,
            intents,
            today,
            route: Route::CampusToCity,
            day: DayChoice::Today,
            cache: HashMap::new(),
            generation: 0,
            loading: false,
            modal: None,
            notice: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn day(&self) -> DayChoice {
        self.day
    }

    pub fn trip_date(&self) -> NaiveDate {
        self.day.resolve(self.today)
    }

    pub fn key(&self) -> TripKey {
        (self.route, self.trip_date())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Rows for the current route and day; empty until the first fetch lands
    pub fn rows(&self) -> &[TripRow] {
        self.cache.get(&self.key()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn modal(&self) -> Option<&BookingModal> {
        self.modal.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Roll the calendar forward, e.g. after midnight
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    // ------------------------------------------------------------------
    // Trip list
    // ------------------------------------------------------------------

    /// Switch route. Returns the fetch to issue when the selection changed.
    pub fn set_route(&mut self, route: Route) -> Option<TripRequest> {
        if self.route == route {
            return None;
        }
        self.route = route;
        Some(self.begin_fetch())
    }

    /// Switch day. Returns the fetch to issue when the selection changed.
    pub fn set_day(&mut self, day: DayChoice) -> Option<TripRequest> {
        if self.day == day {
            return None;
        }
        self.day = day;
        Some(self.begin_fetch())
    }

    /// Start a fetch for the current key
    pub fn begin_fetch(&mut self) -> TripRequest {
        self.generation += 1;
        self.loading = true;
        TripRequest {
            key: self.key(),
            generation: self.generation,
        }
    }

    /// Apply a fetch result. Returns `false` when the response was stale and discarded.
    pub fn apply_fetch(&mut self, request: TripRequest, result: CoreResult<Vec<Trip>>) -> bool {
        if request.generation != self.generation || request.key != self.key() {
            warn!(
                route = %request.key.0,
                trip_date = %request.key.1,
                "Discarding stale trip list response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(trips) => {
                let rows = transform_trips(&trips);
                debug!(count = rows.len(), "Trip list updated");
                self.cache.insert(request.key, rows);
            }
            Err(e) => {
                self.notice = Some(Notice::failure("Error", &e));
            }
        }
        true
    }

    /// Fetch and apply the current key in one step
    pub async fn refresh(&mut self) -> bool {
        let request = self.begin_fetch();
        let result = fetch_trips(self.api.as_ref(), request).await;
        self.apply_fetch(request, result)
    }

    pub async fn select_route(&mut self, route: Route) -> bool {
        match self.set_route(route) {
            Some(request) => {
                let result = fetch_trips(self.api.as_ref(), request).await;
                self.apply_fetch(request, result)
            }
            None => false,
        }
    }

    pub async fn select_day(&mut self, day: DayChoice) -> bool {
        match self.set_day(day) {
            Some(request) => {
                let result = fetch_trips(self.api.as_ref(), request).await;
                self.apply_fetch(request, result)
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Booking modal
    // ------------------------------------------------------------------

    /// Tap a row. Opens the modal for open and full rows; inert rows do nothing.
    pub fn tap_trip(&mut self, trip_id: &str) -> bool {
        if self.modal.as_ref().is_some_and(|m| m.submitting) {
            return false;
        }

        let draft = match self.rows().iter().find(|row| row.trip_id == trip_id) {
            Some(row) if row.is_actionable() => SelectedTripDraft {
                trip_id: row.trip_id.clone(),
                time: row.time.clone(),
                date: display_date(row.trip_date),
                route: row.route,
                is_waitlist: row.is_waitlist(),
            },
            _ => return false,
        };

        self.modal = Some(BookingModal {
            draft,
            submitting: false,
        });
        true
    }

    /// Close the modal and discard its draft. Ignored while submitting.
    pub fn close_modal(&mut self) {
        if self.modal.as_ref().is_some_and(|m| m.submitting) {
            return;
        }
        self.modal = None;
    }

    /// Drop the modal and its draft on a screen change
    pub fn discard_modal(&mut self) {
        if self.modal.take().is_some() {
            debug!("Booking modal discarded");
        }
    }

    /// Lock the modal for one submission. `None` when there is nothing to
    /// submit or a submission is already pending.
    pub fn begin_booking(&mut self) -> Option<BookingSubmission> {
        let modal = self.modal.as_mut()?;
        if modal.submitting || modal.draft.trip_id.is_empty() {
            return None;
        }
        modal.submitting = true;
        Some(BookingSubmission {
            draft: modal.draft.clone(),
        })
    }

    /// Reconcile a booking response into dashboard state
    pub fn finish_booking(
        &mut self,
        submission: BookingSubmission,
        result: CoreResult<BookingResult>,
    ) -> BookingOutcome {
        let draft = submission.draft;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                // Keep the modal and its selection so the user can retry
                if let Some(modal) = self.modal.as_mut() {
                    modal.submitting = false;
                }
                let notice = Notice::failure("Booking Failed", &e);
                self.notice = Some(notice.clone());
                return BookingOutcome::Failed(notice);
            }
        };

        self.modal = None;
        info!(
            booking_id = %response.booking_id,
            trip_id = %response.trip_id,
            status = ?response.status,
            "Booking resolved"
        );

        let outcome = match response.status {
            BookingStatus::Confirmed => {
                let message = if response.message.is_empty() {
                    "Booking confirmed!".to_string()
                } else {
                    response.message.clone()
                };
                let details = BookedTripDetails {
                    booking_id: response.booking_id,
                    trip_id: response.trip_id,
                    time: draft.time,
                    date: draft.date,
                    route: draft.route,
                    bus_number: None,
                    qr_token: response.qr_token,
                };
                self.intents.send(StudentEvent::BookingConfirmed(details.clone()));
                BookingOutcome::Confirmed {
                    details,
                    notice: Notice::new("Success", message),
                }
            }
            BookingStatus::Waitlist => {
                let mut message = match response.waitlist_position {
                    Some(position) => format!("You are #{} on the waitlist", position),
                    None => "You have been added to the waitlist".to_string(),
                };
                if !response.message.is_empty() {
                    message = format!("{}. {}", message, response.message);
                }
                BookingOutcome::Waitlisted {
                    draft,
                    position: response.waitlist_position,
                    notice: Notice::new("Added to Waitlist", message),
                }
            }
        };

        if let BookingOutcome::Confirmed { notice, .. } | BookingOutcome::Waitlisted { notice, .. } = &outcome {
            self.notice = Some(notice.clone());
        }
        outcome
    }

    /// Submit the modal's selection, then refresh the list on success
    pub async fn confirm_booking(&mut self) -> BookingOutcome {
        let submission = match self.begin_booking() {
            Some(submission) => submission,
            None => return BookingOutcome::Ignored,
        };

        let result = self.api.book_trip(&submission.draft.trip_id).await;
        let outcome = self.finish_booking(submission, result);

        if !matches!(outcome, BookingOutcome::Failed(_)) {
            self.refresh().await;
        }
        outcome
    }
}

/// Issue the network read for a request. Free of any dashboard borrow so
/// several may be outstanding at once.
pub async fn fetch_trips(api: &dyn BusApi, request: TripRequest) -> CoreResult<Vec<Trip>> {
    let (route, trip_date) = request.key;
    api.available_trips(route, trip_date).await
}
