// Incoming search requests and their validation
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FetchMode, HotelPreferences, SeatClass, TripType};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: u32,
        value: u32,
    },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("depart_date cannot be in the past.")]
    DepartureInPast { depart_date: NaiveDate, today: NaiveDate },

    #[error("{later} ({later_date}) cannot be before {earlier} ({earlier_date})")]
    DatesOutOfOrder {
        earlier: &'static str,
        earlier_date: NaiveDate,
        later: &'static str,
        later_date: NaiveDate,
    },

    #[error("{field} must be a non-negative number, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },
}

fn require_min(field: &'static str, value: u32, min: u32) -> Result<(), ValidationError> {
    if value < min {
        return Err(ValidationError::BelowMinimum { field, min, value });
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

fn require_order(
    earlier: &'static str,
    earlier_date: NaiveDate,
    later: &'static str,
    later_date: NaiveDate,
) -> Result<(), ValidationError> {
    if later_date < earlier_date {
        return Err(ValidationError::DatesOutOfOrder {
            earlier,
            earlier_date,
            later,
            later_date,
        });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(amount) if amount < 0.0 || amount.is_nan() => {
            Err(ValidationError::NegativeAmount { field, value: amount })
        }
        _ => Ok(()),
    }
}

fn default_hotel_fetch_mode() -> FetchMode {
    FetchMode::Live
}

fn default_flight_fetch_mode() -> FetchMode {
    FetchMode::Fallback
}

fn default_hotel_limit() -> u32 {
    3
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HotelSearchRequest {
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub location: String,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default = "default_hotel_fetch_mode")]
    pub fetch_mode: FetchMode,
    #[serde(default = "default_hotel_limit")]
    pub limit: u32,
    #[serde(default)]
    pub debug: bool,
}

impl HotelSearchRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("location", &self.location)?;
        require_min("adults", self.adults, 1)?;
        require_min("limit", self.limit, 1)?;
        require_order(
            "checkin_date",
            self.checkin_date,
            "checkout_date",
            self.checkout_date,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlightSearchRequest {
    pub date: NaiveDate,
    pub from_airport: String,
    pub to_airport: String,
    #[serde(default)]
    pub trip: TripType,
    #[serde(default)]
    pub seat: SeatClass,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants_in_seat: u32,
    #[serde(default)]
    pub infants_on_lap: u32,
    #[serde(default = "default_flight_fetch_mode")]
    pub fetch_mode: FetchMode,
}

impl FlightSearchRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("from_airport", &self.from_airport)?;
        require_text("to_airport", &self.to_airport)?;
        require_min("adults", self.adults, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TripPlanRequest {
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub hotel_preferences: Option<HotelPreferences>,
    #[serde(default)]
    pub max_total_budget: Option<f64>,
}

impl TripPlanRequest {
    // `today` is the caller's local calendar date
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        require_text("origin", &self.origin)?;
        require_text("destination", &self.destination)?;
        require_min("adults", self.adults, 1)?;

        if self.depart_date < today {
            return Err(ValidationError::DepartureInPast {
                depart_date: self.depart_date,
                today,
            });
        }
        if let Some(return_date) = self.return_date {
            require_order("depart_date", self.depart_date, "return_date", return_date)?;
        }

        require_non_negative("max_total_budget", self.max_total_budget)?;
        if let Some(preferences) = &self.hotel_preferences {
            require_non_negative("max_price_per_night", preferences.max_price_per_night)?;
        }
        Ok(())
    }

    pub fn travelers(&self) -> u64 {
        u64::from(self.adults) + u64::from(self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip_request() -> TripPlanRequest {
        TripPlanRequest {
            origin: "LHR".to_string(),
            destination: "CDG".to_string(),
            depart_date: date(2025, 6, 24),
            return_date: Some(date(2025, 6, 30)),
            adults: 1,
            children: 0,
            hotel_preferences: None,
            max_total_budget: None,
        }
    }

    #[test]
    fn test_flight_request_defaults() {
        let json = r#"{"date": "2025-01-01", "from_airport": "TPE", "to_airport": "MYJ", "adults": 2}"#;
        let request: FlightSearchRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.trip, TripType::OneWay);
        assert_eq!(request.seat, SeatClass::Economy);
        assert_eq!(request.fetch_mode, FetchMode::Fallback);
        assert_eq!(request.children, 0);
        assert_eq!(request.infants_on_lap, 0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_hotel_request_defaults() {
        let json = r#"{"checkin_date": "2025-06-23", "checkout_date": "2025-06-25", "location": "Tokyo", "adults": 2}"#;
        let request: HotelSearchRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.fetch_mode, FetchMode::Live);
        assert_eq!(request.limit, 3);
        assert!(!request.debug);
        assert!(request.validate().is_ok());
    }

    #[test_case(r#"{"date": "2025-13-01", "from_airport": "TPE", "to_airport": "MYJ", "adults": 1}"#; "#1 impossible month")]
    #[test_case(r#"{"date": "01/01/2025", "from_airport": "TPE", "to_airport": "MYJ", "adults": 1}"#; "#2 wrong date format")]
    #[test_case(r#"{"date": "2025-01-01", "from_airport": "TPE", "to_airport": "MYJ", "adults": -1}"#; "#3 negative count")]
    #[test_case(r#"{"date": "2025-01-01", "from_airport": "TPE", "to_airport": "MYJ", "adults": 1, "trip": "open-jaw"}"#; "#4 unknown trip type")]
    #[test_case(r#"{"date": "2025-01-01", "from_airport": "TPE", "adults": 1}"#; "#5 missing airport")]
    fn test_flight_request_shape_rejected(json: &str) {
        assert!(serde_json::from_str::<FlightSearchRequest>(json).is_err());
    }

    #[test]
    fn test_flight_request_rejects_zero_adults() {
        let json = r#"{"date": "2025-01-01", "from_airport": "TPE", "to_airport": "MYJ", "adults": 0}"#;
        let request: FlightSearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.validate(),
            Err(ValidationError::BelowMinimum {
                field: "adults",
                min: 1,
                value: 0
            })
        );
    }

    #[test]
    fn test_hotel_request_rules() {
        let json = r#"{"checkin_date": "2025-06-25", "checkout_date": "2025-06-23", "location": "Tokyo", "adults": 1}"#;
        let request: HotelSearchRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            request.validate(),
            Err(ValidationError::DatesOutOfOrder { .. })
        ));

        let mut request = HotelSearchRequest {
            checkout_date: date(2025, 6, 27),
            ..request
        };
        request.limit = 0;
        assert!(matches!(
            request.validate(),
            Err(ValidationError::BelowMinimum { field: "limit", .. })
        ));

        request.limit = 5;
        request.location = "   ".to_string();
        assert_eq!(request.validate(), Err(ValidationError::EmptyField("location")));
    }

    #[test_case(date(2025, 6, 24), true; "#1 departing today")]
    #[test_case(date(2025, 6, 1), true; "#2 departing later")]
    #[test_case(date(2025, 6, 25), false; "#3 departure already passed")]
    fn test_trip_request_departure(today: NaiveDate, accepted: bool) {
        let result = trip_request().validate(today);
        assert_eq!(result.is_ok(), accepted);
        if !accepted {
            assert_eq!(
                result.unwrap_err().to_string(),
                "depart_date cannot be in the past."
            );
        }
    }

    #[test]
    fn test_trip_request_return_before_departure() {
        let request = TripPlanRequest {
            return_date: Some(date(2025, 6, 20)),
            ..trip_request()
        };
        assert!(matches!(
            request.validate(date(2025, 6, 1)),
            Err(ValidationError::DatesOutOfOrder { later: "return_date", .. })
        ));
    }

    #[test]
    fn test_trip_request_negative_budget() {
        let request = TripPlanRequest {
            max_total_budget: Some(-5.0),
            ..trip_request()
        };
        assert!(matches!(
            request.validate(date(2025, 6, 1)),
            Err(ValidationError::NegativeAmount { field: "max_total_budget", .. })
        ));
    }

    #[test]
    fn test_trip_request_travelers() {
        let request = TripPlanRequest {
            adults: 2,
            children: 3,
            ..trip_request()
        };
        assert_eq!(request.travelers(), 5);

        let crowd = TripPlanRequest {
            adults: u32::MAX,
            children: 1,
            ..trip_request()
        };
        assert_eq!(crowd.travelers(), 4_294_967_296);
    }
}
