use campusbus_shared::models::{Route, Trip};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::{CoreError, CoreResult};

/// Which day the dashboard is showing
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum DayChoice {
    Today,
    Tomorrow,
}

impl DayChoice {
    /// Resolve to a calendar date relative to `today`
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DayChoice::Today => today,
            DayChoice::Tomorrow => today + Duration::days(1),
        }
    }
}

/// Badge shown on a trip card
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RowStatus {
    BookingOpen,
    BusFull,
    BookingOpensSoon,
}

impl RowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::BookingOpen => "Booking Open",
            RowStatus::BusFull => "Bus Full",
            RowStatus::BookingOpensSoon => "Booking Opens Soon",
        }
    }
}

/// A trip as the dashboard lists it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TripRow {
    pub trip_id: String,
    /// 12-hour display time, e.g. `8:30 AM`
    pub time: String,
    /// 24-hour time as received
    pub departure_time: String,
    pub available_seats: i32,
    pub total_seats: i32,
    pub status: RowStatus,
    pub waitlist_count: i32,
    pub route: Route,
    pub trip_date: NaiveDate,
}

impl TripRow {
    pub fn from_trip(trip: &Trip) -> CoreResult<Self> {
        let available = available_seats(trip.capacity, trip.faculty_reserved, trip.booked_count);
        let status = if available <= 0 {
            RowStatus::BusFull
        } else {
            RowStatus::BookingOpen
        };

        Ok(Self {
            trip_id: trip.trip_id.clone(),
            time: format_time(&trip.departure_time)?,
            departure_time: trip.departure_time.clone(),
            available_seats: available,
            total_seats: total_seats(trip.capacity, trip.faculty_reserved),
            status,
            waitlist_count: trip.waitlist_count,
            route: trip.route,
            trip_date: trip.trip_date,
        })
    }

    /// Mark a row as not yet bookable. Seat counts stay as derived.
    pub fn opening_soon(mut self) -> Self {
        self.status = RowStatus::BookingOpensSoon;
        self
    }

    /// Only open and full rows respond to taps
    pub fn is_actionable(&self) -> bool {
        matches!(self.status, RowStatus::BookingOpen | RowStatus::BusFull)
    }

    /// Tapping a full bus asks to join the waitlist
    pub fn is_waitlist(&self) -> bool {
        self.status == RowStatus::BusFull
    }
}

/// Seats a student can still take. Faculty seats are never offered.
pub fn available_seats(capacity: i32, faculty_reserved: i32, booked_count: i32) -> i32 {
    capacity
        .saturating_sub(faculty_reserved)
        .saturating_sub(booked_count)
        .max(0)
}

/// Capacity shown to students
pub fn total_seats(capacity: i32, faculty_reserved: i32) -> i32 {
    capacity.saturating_sub(faculty_reserved)
}

/// Convert backend `HH:mm` to `h:mm AM/PM`. Hours 0 and 12 both display as 12.
/// Seconds, if present, are ignored.
pub fn format_time(time24: &str) -> CoreResult<String> {
    let trimmed = time24.trim();
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| CoreError::Validation(format!("Invalid departure time {:?}: {}", time24, e)))?;
    Ok(time.format("%-I:%M %p").to_string())
}

/// Transform a fetched list into display rows, keeping backend order.
///
/// Trips with an unreadable departure time are dropped rather than failing the whole list.
pub fn transform_trips(trips: &[Trip]) -> Vec<TripRow> {
    trips
        .iter()
        .filter_map(|trip| match TripRow::from_trip(trip) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(trip_id = %trip.trip_id, "Skipping trip: {}", e);
                None
            }
        })
        .collect()
}

/// `October 10, 2025`
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusbus_shared::models::TripStatus;

    fn trip(capacity: i32, faculty_reserved: i32, booked_count: i32) -> Trip {
        Trip {
            trip_id: "trip-1".to_string(),
            route: Route::CampusToCity,
            trip_date: NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(),
            departure_time: "17:30".to_string(),
            capacity,
            faculty_reserved,
            booked_count,
            waitlist_count: 0,
            status: TripStatus::Active,
            available_seats: None,
        }
    }

    #[test]
    fn test_format_time_boundaries() {
        assert_eq!(format_time("00:00").unwrap(), "12:00 AM");
        assert_eq!(format_time("12:00").unwrap(), "12:00 PM");
        assert_eq!(format_time("13:05").unwrap(), "1:05 PM");
        assert_eq!(format_time("23:59").unwrap(), "11:59 PM");
        assert_eq!(format_time("08:30").unwrap(), "8:30 AM");
        assert_eq!(format_time("08:30:00").unwrap(), "8:30 AM");
    }

    #[test]
    fn test_format_time_rejects_garbage() {
        assert!(format_time("").is_err());
        assert!(format_time("24:00").is_err());
        assert!(format_time("10:60").is_err());
        assert!(format_time("ten:30").is_err());
        assert!(format_time("10").is_err());
        assert!(format_time("08:30 PM").is_err());
        assert!(format_time("08:30:00:00").is_err());
    }

    #[test]
    fn test_format_time_covers_every_minute() {
        // Every display value maps back to the same 24h time
        for h in 0..24u32 {
            for m in 0..60u32 {
                let shown = format_time(&format!("{:02}:{:02}", h, m)).unwrap();
                let (clock, period) = shown.split_once(' ').unwrap();
                let (hh, mm) = clock.split_once(':').unwrap();
                let hh: u32 = hh.parse().unwrap();
                assert!((1..=12).contains(&hh));
                let back = match (hh, period) {
                    (12, "AM") => 0,
                    (12, "PM") => 12,
                    (x, "AM") => x,
                    (x, _) => x + 12,
                };
                assert_eq!(back, h);
                assert_eq!(mm.parse::<u32>().unwrap(), m);
            }
        }
    }

    #[test]
    fn test_seat_derivation() {
        let row = TripRow::from_trip(&trip(35, 0, 20)).unwrap();
        assert_eq!(row.available_seats, 15);
        assert_eq!(row.total_seats, 35);
        assert_eq!(row.status, RowStatus::BookingOpen);
        assert!(!row.is_waitlist());

        let row = TripRow::from_trip(&trip(40, 5, 30)).unwrap();
        assert_eq!(row.available_seats, 5);
        assert_eq!(row.total_seats, 35);
    }

    #[test]
    fn test_full_and_overbooked_never_negative() {
        let row = TripRow::from_trip(&trip(35, 0, 35)).unwrap();
        assert_eq!(row.available_seats, 0);
        assert_eq!(row.status, RowStatus::BusFull);
        assert!(row.is_actionable());
        assert!(row.is_waitlist());

        let row = TripRow::from_trip(&trip(35, 5, 40)).unwrap();
        assert_eq!(row.available_seats, 0);
        assert_eq!(row.status.label(), "Bus Full");

        for booked in 0..100 {
            assert!(available_seats(35, 5, booked) >= 0);
        }
    }

    #[test]
    fn test_extreme_counts_saturate() {
        assert_eq!(available_seats(i32::MAX, -1, 0), i32::MAX);
        assert_eq!(available_seats(i32::MIN, i32::MAX, i32::MAX), 0);
        assert_eq!(total_seats(i32::MAX, -1), i32::MAX);
        assert_eq!(total_seats(i32::MIN, 1), i32::MIN);
    }

    #[test]
    fn test_opening_soon_is_inert() {
        let open = TripRow::from_trip(&trip(35, 0, 0)).unwrap().opening_soon();
        let full = TripRow::from_trip(&trip(35, 0, 35)).unwrap().opening_soon();
        assert!(!open.is_actionable());
        assert!(!full.is_actionable());
        assert_eq!(open.available_seats, 35);
    }

    #[test]
    fn test_transform_skips_bad_times() {
        let mut bad = trip(35, 0, 0);
        bad.departure_time = "25:99".to_string();
        let rows = transform_trips(&[trip(35, 0, 1), bad]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time, "5:30 PM");
    }

    #[test]
    fn test_day_choice_and_display_date() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(DayChoice::Today.resolve(today), today);
        assert_eq!(
            DayChoice::Tomorrow.resolve(today),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert_eq!(display_date(today), "December 31, 2025");
        assert_eq!(
            display_date(NaiveDate::from_ymd_opt(2025, 10, 8).unwrap()),
            "October 8, 2025"
        );
    }
}
