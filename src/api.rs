// HTTP API: routes, handlers and error-to-status mapping
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::flights::FlightSearchAdapter;
use crate::hotels::HotelSearchAdapter;
use crate::models::{FlightSearchResponse, HotelSearchResponse, TripPlanResult};
use crate::provider::{FlightProvider, HotelProvider, ProviderError};
use crate::requests::{FlightSearchRequest, HotelSearchRequest, TripPlanRequest, ValidationError};
use crate::trip::{PlanError, TripPlanner};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Single-search endpoints report provider failures as client errors
    #[error(transparent)]
    Search(ProviderError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::InvalidBody(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Search(_) => StatusCode::BAD_REQUEST,
            ApiError::Plan(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    flights: FlightSearchAdapter,
    hotels: HotelSearchAdapter,
    planner: TripPlanner,
}

impl AppState {
    pub fn new(flights: Arc<dyn FlightProvider>, hotels: Arc<dyn HotelProvider>) -> Self {
        let flights = FlightSearchAdapter::new(flights);
        let hotels = HotelSearchAdapter::new(hotels);
        let planner = TripPlanner::new(flights.clone(), hotels.clone());
        Self {
            flights,
            hotels,
            planner,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/hotels/search", post(search_hotels))
        .route("/flights/search", post(search_flights))
        .route("/trip/plan", post(plan_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Status {
    pub service: String,
    pub version: String,
}

async fn status() -> Json<Status> {
    Json(Status {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn search_hotels(
    State(state): State<AppState>,
    payload: Result<Json<HotelSearchRequest>, JsonRejection>,
) -> Result<Json<HotelSearchResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let response = state.hotels.search(&request).await.map_err(|e| {
        error!("Hotel search error: {}", e);
        ApiError::Search(e)
    })?;
    Ok(Json(response))
}

async fn search_flights(
    State(state): State<AppState>,
    payload: Result<Json<FlightSearchRequest>, JsonRejection>,
) -> Result<Json<FlightSearchResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let response = state.flights.search(&request).await.map_err(|e| {
        error!("Flight search error: {}", e);
        ApiError::Search(e)
    })?;
    Ok(Json(response))
}

async fn plan_trip(
    State(state): State<AppState>,
    payload: Result<Json<TripPlanRequest>, JsonRejection>,
) -> Result<Json<TripPlanResult>, ApiError> {
    let Json(request) = payload?;
    request.validate(Local::now().date_naive())?;

    let plan = state.planner.plan(&request).await?;
    Ok(Json(plan))
}
