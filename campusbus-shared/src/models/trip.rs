use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two directions the campus shuttle runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Route {
    CampusToCity,
    CityToCampus,
}

impl Route {
    /// Query-string / wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::CampusToCity => "CAMPUS_TO_CITY",
            Route::CityToCampus => "CITY_TO_CAMPUS",
        }
    }

    /// Human-readable label shown on tickets and confirmation screens
    pub fn display_name(&self) -> &'static str {
        match self {
            Route::CampusToCity => "Campus to City",
            Route::CityToCampus => "City to Campus",
        }
    }

    pub fn all() -> [Route; 2] {
        [Route::CampusToCity, Route::CityToCampus]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAMPUS_TO_CITY" => Ok(Route::CampusToCity),
            "CITY_TO_CAMPUS" => Ok(Route::CityToCampus),
            other => Err(format!("unknown route: {}", other)),
        }
    }
}

/// Backend lifecycle of a scheduled trip
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    Active,
    Cancelled,
    Completed,
}

/// A scheduled departure as served by `GET /api/trips/available`.
///
/// The backend owns capacity accounting; the client only reads these counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub trip_id: String,
    pub route: Route,
    pub trip_date: NaiveDate,
    /// 24-hour `HH:mm`
    pub departure_time: String,
    pub capacity: i32,
    pub faculty_reserved: i32,
    pub booked_count: i32,
    pub waitlist_count: i32,
    pub status: TripStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_seats: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_deserialization() {
        let json = r#"
            {
                "tripId": "trip-0830",
                "route": "CAMPUS_TO_CITY",
                "tripDate": "2025-10-10",
                "departureTime": "08:30",
                "capacity": 35,
                "facultyReserved": 5,
                "bookedCount": 12,
                "waitlistCount": 0,
                "status": "ACTIVE"
            }
        "#;
        let trip: Trip = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(trip.trip_id, "trip-0830");
        assert_eq!(trip.route, Route::CampusToCity);
        assert_eq!(trip.trip_date, NaiveDate::from_ymd_opt(2025, 10, 10).unwrap());
        assert_eq!(trip.status, TripStatus::Active);
        assert_eq!(trip.available_seats, None);
    }

    #[test]
    fn test_route_parse() {
        assert_eq!("CITY_TO_CAMPUS".parse::<Route>().unwrap(), Route::CityToCampus);
        assert!("CAMPUS_TO_MOON".parse::<Route>().is_err());
        assert_eq!(Route::CampusToCity.display_name(), "Campus to City");
    }
}
