// Search provider clients
// Flight and hotel data come from external scraping services. The adapters only see the
// traits below; the HTTP implementations forward the query as JSON and decode raw listings.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::{FetchMode, SeatClass, TripType};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid provider response: {0}")]
    Decode(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

// Query shapes sent to the flight provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightLeg {
    pub date: NaiveDate,
    pub from_airport: String,
    pub to_airport: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Passengers {
    pub adults: u32,
    pub children: u32,
    pub infants_in_seat: u32,
    pub infants_on_lap: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightQuery {
    pub flight_data: Vec<FlightLeg>,
    pub trip: TripType,
    pub seat: SeatClass,
    pub passengers: Passengers,
    pub fetch_mode: FetchMode,
}

// Query shapes sent to the hotel provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelStay {
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Guests {
    pub adults: u32,
    pub children: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelQuery {
    pub hotel_data: Vec<HotelStay>,
    pub guests: Guests,
    pub fetch_mode: FetchMode,
    pub limit: u32,
    pub debug: bool,
}

// Raw listings as the providers return them. Every optional field keeps whatever JSON
// shape the scraped page produced and is normalized by the adapters, so one malformed
// listing cannot fail the decode of the whole result set.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawFlight {
    pub name: String,
    pub departure: String,
    pub arrival: String,
    #[serde(default)]
    pub arrival_time_ahead: Value,
    #[serde(default)]
    pub duration: Value,
    #[serde(default)]
    pub stops: Value,
    #[serde(default)]
    pub delay: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub is_best: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawFlightResult {
    #[serde(default)]
    pub current_price: Value,
    #[serde(default)]
    pub flights: Vec<RawFlight>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawHotel {
    pub name: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub rating: Value,
    #[serde(default)]
    pub url: Value,
    #[serde(default)]
    pub amenities: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawHotelResult {
    #[serde(default)]
    pub hotels: Vec<RawHotel>,
    #[serde(default)]
    pub lowest_price: Value,
    #[serde(default)]
    pub current_price: Value,
}

#[async_trait]
pub trait FlightProvider: Send + Sync + 'static {
    async fn get_flights(&self, query: &FlightQuery) -> Result<RawFlightResult, ProviderError>;
}

#[async_trait]
pub trait HotelProvider: Send + Sync + 'static {
    async fn get_hotels(&self, query: &HotelQuery) -> Result<RawHotelResult, ProviderError>;
}

fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Client(e.to_string()))
}

// POST the query and decode the JSON listing, surfacing non-2xx bodies as the error message
async fn post_json<Q, R>(client: &Client, endpoint: &str, query: &Q) -> Result<R, ProviderError>
where
    Q: Serialize + Sync,
    R: DeserializeOwned,
{
    debug!("POST {}", endpoint);
    let response = client.post(endpoint).json(query).send().await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ProviderError::Upstream {
            status: status.as_u16(),
            message: if message.is_empty() {
                status.to_string()
            } else {
                message
            },
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct HttpFlightProvider {
    client: Client,
    endpoint: String,
}

impl HttpFlightProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl FlightProvider for HttpFlightProvider {
    async fn get_flights(&self, query: &FlightQuery) -> Result<RawFlightResult, ProviderError> {
        post_json(&self.client, &self.endpoint, query).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpHotelProvider {
    client: Client,
    endpoint: String,
}

impl HttpHotelProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl HotelProvider for HttpHotelProvider {
    async fn get_hotels(&self, query: &HotelQuery) -> Result<RawHotelResult, ProviderError> {
        post_json(&self.client, &self.endpoint, query).await
    }
}
