// Trip planner
// Sequences the outbound search, the return-leg variants and the hotel search, then picks the
// cheapest candidates and aggregates the estimated cost. Only the outbound and hotel legs are
// fatal; a failing return variant is skipped.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::flights::FlightSearchAdapter;
use crate::hotels::{filter_hotels, HotelSearchAdapter};
use crate::models::{FetchMode, FlightRecord, LegWarning, SeatClass, TripPlanResult, TripType};
use crate::pricing::{budget_suggestion, cheapest, estimate_costs, nights_between, CostInputs};
use crate::provider::ProviderError;
use crate::requests::{FlightSearchRequest, HotelSearchRequest, TripPlanRequest};

// Fixed search parameters used by the planner
pub const PLANNER_FLIGHT_FETCH_MODE: FetchMode = FetchMode::Local;
pub const PLANNER_HOTEL_FETCH_MODE: FetchMode = FetchMode::Live;
pub const PLANNER_HOTEL_LIMIT: u32 = 10;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Outbound flight search failed: {0}")]
    OutboundSearch(#[source] ProviderError),

    #[error("Hotel search failed: {0}")]
    HotelSearch(#[source] ProviderError),
}

#[derive(Clone)]
pub struct TripPlanner {
    flights: FlightSearchAdapter,
    hotels: HotelSearchAdapter,
}

impl TripPlanner {
    pub fn new(flights: FlightSearchAdapter, hotels: HotelSearchAdapter) -> Self {
        Self { flights, hotels }
    }

    fn flight_request(
        request: &TripPlanRequest,
        trip: TripType,
        inbound: bool,
    ) -> FlightSearchRequest {
        let (from, to, date) = match (inbound, request.return_date) {
            (true, Some(return_date)) => (&request.destination, &request.origin, return_date),
            _ => (&request.origin, &request.destination, request.depart_date),
        };

        FlightSearchRequest {
            date,
            from_airport: from.clone(),
            to_airport: to.clone(),
            trip,
            seat: SeatClass::Economy,
            adults: request.adults,
            children: request.children,
            infants_in_seat: 0,
            infants_on_lap: 0,
            fetch_mode: PLANNER_FLIGHT_FETCH_MODE,
        }
    }

    fn hotel_request(request: &TripPlanRequest) -> HotelSearchRequest {
        HotelSearchRequest {
            checkin_date: request.depart_date,
            checkout_date: request.return_date.unwrap_or(request.depart_date),
            location: request.destination.clone(),
            adults: request.adults,
            children: request.children,
            fetch_mode: PLANNER_HOTEL_FETCH_MODE,
            limit: PLANNER_HOTEL_LIMIT,
            debug: false,
        }
    }

    async fn best_outbound(
        &self,
        request: &TripPlanRequest,
    ) -> Result<Option<FlightRecord>, PlanError> {
        let search = Self::flight_request(request, TripType::OneWay, false);
        let response = self.flights.search(&search).await.map_err(|e| {
            error!("Outbound flight search error in trip plan: {}", e);
            PlanError::OutboundSearch(e)
        })?;

        Ok(cheapest(&response.flights).cloned())
    }

    // Cheapest return flight across all trip-type variants that answered
    async fn best_return(
        &self,
        request: &TripPlanRequest,
        warnings: &mut Vec<LegWarning>,
    ) -> Option<FlightRecord> {
        if request.return_date.is_none() {
            return None;
        }

        let mut best: Option<FlightRecord> = None;
        for trip_type in TripType::RETURN_VARIANTS {
            let search = Self::flight_request(request, trip_type, true);
            let response = match self.flights.search(&search).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        "Return flight search error for trip_type {} in trip plan: {}",
                        trip_type, e
                    );
                    warnings.push(LegWarning {
                        trip_type,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let Some(candidate) = cheapest(&response.flights) else {
                continue;
            };
            let Some(price) = candidate.price else {
                continue;
            };
            // Strictly cheaper only, so the earliest variant keeps a tie
            if best
                .as_ref()
                .and_then(|current| current.price)
                .map_or(true, |best_price| price < best_price)
            {
                best = Some(candidate.clone());
            }
        }
        best
    }

    pub async fn plan(&self, request: &TripPlanRequest) -> Result<TripPlanResult, PlanError> {
        let best_outbound = self.best_outbound(request).await?;

        let mut warnings = Vec::new();
        let best_return = self.best_return(request, &mut warnings).await;

        let hotel_search = Self::hotel_request(request);
        let hotel_response = self.hotels.search(&hotel_search).await.map_err(|e| {
            error!("Hotel search error in trip plan: {}", e);
            PlanError::HotelSearch(e)
        })?;
        let candidates = filter_hotels(&hotel_response.hotels, request.hotel_preferences.as_ref());
        let best_hotel = cheapest(candidates).cloned();

        let nights = nights_between(request.depart_date, request.return_date);
        let estimate = estimate_costs(&CostInputs {
            outbound: best_outbound.as_ref(),
            inbound: best_return.as_ref(),
            hotel: best_hotel.as_ref(),
            adults: request.adults,
            children: request.children,
            nights,
        });

        info!(
            "Planned trip {} -> {}: total {:.2} over {} night(s), {} return variant(s) skipped",
            request.origin,
            request.destination,
            estimate.total,
            nights,
            warnings.len()
        );

        Ok(TripPlanResult {
            best_outbound,
            best_return,
            best_hotel,
            total_estimated_cost: estimate.total,
            per_person_per_day: estimate.per_person_per_day,
            suggestions: budget_suggestion(estimate.total, request.max_total_budget),
            breakdown: estimate.breakdown,
            warnings,
        })
    }
}
