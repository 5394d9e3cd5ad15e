// Travel search API: hotel, flight and combined trip-plan endpoints over external search providers

pub mod api;
pub mod config;
pub mod flights;
pub mod hotels;
pub mod models;
pub mod normalize;
pub mod pricing;
pub mod provider;
pub mod requests;
pub mod trip;

// Re-export key types for convenience
pub use api::{router, ApiError, AppState};
pub use config::{AppConfig, ConfigError};
pub use flights::FlightSearchAdapter;
pub use hotels::HotelSearchAdapter;
pub use models::{
    FetchMode, FlightRecord, HotelPreferences, HotelRecord, SeatClass, TripPlanResult, TripType,
};
pub use normalize::{
    normalize_amenities, normalize_flag, normalize_price, normalize_rating, normalize_stops,
    normalize_text,
};
pub use provider::{FlightProvider, HotelProvider, ProviderError};
pub use requests::{FlightSearchRequest, HotelSearchRequest, TripPlanRequest, ValidationError};
pub use trip::{PlanError, TripPlanner};
