use campusbus_core::trips::{format_time, total_seats};
use campusbus_core::{BusApi, CoreResult};
use campusbus_shared::models::{Route, Trip, TripStatus};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Notice;

/// A trip the operator can bind the device to
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ShiftTrip {
    pub trip_id: String,
    pub time: String,
    pub departure_time: String,
    pub route: Route,
    pub booked_count: i32,
    pub total_seats: i32,
}

impl ShiftTrip {
    fn from_trip(trip: &Trip) -> CoreResult<Self> {
        Ok(Self {
            trip_id: trip.trip_id.clone(),
            time: format_time(&trip.departure_time)?,
            departure_time: trip.departure_time.clone(),
            route: trip.route,
            booked_count: trip.booked_count,
            total_seats: total_seats(trip.capacity, trip.faculty_reserved),
        })
    }
}

/// Bus selection screen: pick a trip, confirm, start the shift
#[derive(Debug, Clone, Default)]
pub struct BusSelection {
    trips: Vec<ShiftTrip>,
    selected: Option<String>,
    confirming: bool,
}

impl BusSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trips(&self) -> &[ShiftTrip] {
        &self.trips
    }

    pub fn selected(&self) -> Option<&ShiftTrip> {
        let id = self.selected.as_deref()?;
        self.trips.iter().find(|t| t.trip_id == id)
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// Load the day's running trips on both routes, earliest first.
    /// A failing route does not hide the other one.
    pub async fn load(&mut self, api: &dyn BusApi, date: NaiveDate) -> Option<Notice> {
        let mut trips = Vec::new();
        let mut notice = None;

        for route in Route::all() {
            match api.available_trips(route, date).await {
                Ok(list) => trips.extend(
                    list.iter()
                        .filter(|t| t.status == TripStatus::Active)
                        .filter_map(|t| ShiftTrip::from_trip(t).ok()),
                ),
                Err(e) => notice = Some(Notice::failure("Error", &e)),
            }
        }

        trips.sort_by(|a, b| a.departure_time.cmp(&b.departure_time));
        tracing::info!(count = trips.len(), "Loaded trips for shift selection");
        self.trips = trips;
        if self.selected().is_none() {
            self.selected = None;
        }
        notice
    }

    pub fn select(&mut self, trip_id: &str) -> bool {
        if self.trips.iter().any(|t| t.trip_id == trip_id) {
            self.selected = Some(trip_id.to_string());
            true
        } else {
            false
        }
    }

    /// "Start Shift" pressed. Asks for confirmation, or complains when nothing is selected.
    pub fn request_start(&mut self) -> Result<(), Notice> {
        if self.selected().is_none() {
            return Err(Notice::new(
                "No Trip Selected",
                "Please select a trip before starting your shift.",
            ));
        }
        self.confirming = true;
        Ok(())
    }

    pub fn cancel_start(&mut self) {
        self.confirming = false;
    }

    /// Confirmation accepted. Returns the trip to bind the shift to.
    pub fn confirm_start(&mut self) -> Option<ShiftTrip> {
        if !self.confirming {
            return None;
        }
        self.confirming = false;
        self.selected().cloned()
    }
}
