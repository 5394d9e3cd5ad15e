// Canonical records returned to API clients
use serde::{Deserialize, Serialize};

// Itinerary shape requested from the flight provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
    MultiCity,
}

impl TripType {
    // Order in which return-leg variants are tried
    pub const RETURN_VARIANTS: [TripType; 3] =
        [TripType::OneWay, TripType::RoundTrip, TripType::MultiCity];

    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::OneWay => "one-way",
            TripType::RoundTrip => "round-trip",
            TripType::MultiCity => "multi-city",
        }
    }
}

impl std::fmt::Display for TripType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeatClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

// Provider-specific data source selector: live scraping vs. fallback or local data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMode {
    Common,
    Fallback,
    ForceFallback,
    Local,
    Live,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlightRecord {
    pub name: String,
    pub departure: String,
    pub arrival: String,
    pub arrival_time_ahead: Option<String>,
    pub duration: Option<String>,
    pub stops: Option<u32>,
    pub delay: Option<String>,
    pub price: Option<f64>,
    pub is_best: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HotelRecord {
    pub name: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub url: Option<String>,
    pub amenities: Option<Vec<String>>,
}

/// Optional hotel constraints for trip planning; an absent field means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelPreferences {
    pub star_rating: Option<u8>,
    pub max_price_per_night: Option<f64>,
    pub amenities: Option<Vec<String>>,
}

impl HotelPreferences {
    // All active constraints must hold; a hotel missing the data a constraint needs fails it
    pub fn accepts(&self, hotel: &HotelRecord) -> bool {
        // zero and empty values are treated the same as absent
        let rating_ok = self.star_rating.filter(|min| *min > 0).map_or(true, |min| {
            hotel.rating.map_or(false, |rating| rating >= f64::from(min))
        });
        let price_ok = self
            .max_price_per_night
            .filter(|max| *max > 0.0)
            .map_or(true, |max| hotel.price.map_or(false, |price| price <= max));
        let amenities_ok = self
            .amenities
            .as_ref()
            .filter(|required| !required.is_empty())
            .map_or(true, |required| {
                hotel.amenities.as_ref().map_or(false, |offered| {
                    required.iter().all(|amenity| offered.contains(amenity))
                })
            });

        rating_ok && price_ok && amenities_ok
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlightSearchResponse {
    pub flights: Vec<FlightRecord>,
    pub current_price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HotelSearchResponse {
    pub hotels: Vec<HotelRecord>,
    pub lowest_price: Option<f64>,
    pub current_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CostBreakdown {
    pub flight: f64,
    pub hotel: f64,
    pub nights: i64,
    pub adults: u32,
    pub children: u32,
}

// A return-leg variant that failed and was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct LegWarning {
    pub trip_type: TripType,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TripPlanResult {
    #[serde(rename = "best_outbound_flight")]
    pub best_outbound: Option<FlightRecord>,
    #[serde(rename = "best_return_flight")]
    pub best_return: Option<FlightRecord>,
    pub best_hotel: Option<HotelRecord>,
    pub total_estimated_cost: f64,
    pub per_person_per_day: Option<f64>,
    pub breakdown: CostBreakdown,
    pub suggestions: Option<String>,
    // Kept in-process only, never part of the response body
    #[serde(skip)]
    pub warnings: Vec<LegWarning>,
}
