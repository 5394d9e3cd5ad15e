// Flight search adapter: request -> provider query, raw listings -> FlightRecord
use std::sync::Arc;

use crate::models::{FlightRecord, FlightSearchResponse};
use crate::normalize::{normalize_flag, normalize_price, normalize_stops, normalize_text};
use crate::provider::{FlightLeg, FlightProvider, FlightQuery, Passengers, ProviderError, RawFlight};
use crate::requests::FlightSearchRequest;

impl From<&FlightSearchRequest> for FlightQuery {
    fn from(request: &FlightSearchRequest) -> Self {
        FlightQuery {
            flight_data: vec![FlightLeg {
                date: request.date,
                from_airport: request.from_airport.clone(),
                to_airport: request.to_airport.clone(),
            }],
            trip: request.trip,
            seat: request.seat,
            passengers: Passengers {
                adults: request.adults,
                children: request.children,
                infants_in_seat: request.infants_in_seat,
                infants_on_lap: request.infants_on_lap,
            },
            fetch_mode: request.fetch_mode,
        }
    }
}

impl From<RawFlight> for FlightRecord {
    fn from(raw: RawFlight) -> Self {
        FlightRecord {
            stops: normalize_stops(&raw.stops),
            price: normalize_price(&raw.price),
            name: raw.name,
            departure: raw.departure,
            arrival: raw.arrival,
            arrival_time_ahead: normalize_text(&raw.arrival_time_ahead),
            duration: normalize_text(&raw.duration),
            delay: normalize_text(&raw.delay),
            is_best: normalize_flag(&raw.is_best),
        }
    }
}

#[derive(Clone)]
pub struct FlightSearchAdapter {
    provider: Arc<dyn FlightProvider>,
}

impl FlightSearchAdapter {
    pub fn new(provider: Arc<dyn FlightProvider>) -> Self {
        Self { provider }
    }

    // One provider call; listings keep the provider's order
    pub async fn search(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<FlightSearchResponse, ProviderError> {
        let query = FlightQuery::from(request);
        let result = self.provider.get_flights(&query).await?;

        Ok(FlightSearchResponse {
            flights: result.flights.into_iter().map(FlightRecord::from).collect(),
            current_price: normalize_text(&result.current_price),
        })
    }
}
