// Hotel search adapter: request -> provider query, raw listings -> HotelRecord
use std::sync::Arc;

use crate::models::{HotelPreferences, HotelRecord, HotelSearchResponse};
use crate::normalize::{normalize_amenities, normalize_price, normalize_rating, normalize_text};
use crate::provider::{Guests, HotelProvider, HotelQuery, HotelStay, ProviderError, RawHotel};
use crate::requests::HotelSearchRequest;

impl From<&HotelSearchRequest> for HotelQuery {
    fn from(request: &HotelSearchRequest) -> Self {
        HotelQuery {
            hotel_data: vec![HotelStay {
                checkin_date: request.checkin_date,
                checkout_date: request.checkout_date,
                location: request.location.clone(),
            }],
            guests: Guests {
                adults: request.adults,
                children: request.children,
            },
            fetch_mode: request.fetch_mode,
            limit: request.limit,
            debug: request.debug,
        }
    }
}

impl From<RawHotel> for HotelRecord {
    fn from(raw: RawHotel) -> Self {
        HotelRecord {
            price: normalize_price(&raw.price),
            name: raw.name,
            rating: normalize_rating(&raw.rating),
            url: normalize_text(&raw.url),
            amenities: normalize_amenities(&raw.amenities),
        }
    }
}

// Hotels satisfying every active preference, in provider order
pub fn filter_hotels<'a>(
    hotels: &'a [HotelRecord],
    preferences: Option<&HotelPreferences>,
) -> Vec<&'a HotelRecord> {
    match preferences {
        Some(preferences) => hotels.iter().filter(|h| preferences.accepts(h)).collect(),
        None => hotels.iter().collect(),
    }
}

#[derive(Clone)]
pub struct HotelSearchAdapter {
    provider: Arc<dyn HotelProvider>,
}

impl HotelSearchAdapter {
    pub fn new(provider: Arc<dyn HotelProvider>) -> Self {
        Self { provider }
    }

    pub async fn search(
        &self,
        request: &HotelSearchRequest,
    ) -> Result<HotelSearchResponse, ProviderError> {
        let query = HotelQuery::from(request);
        let result = self.provider.get_hotels(&query).await?;

        Ok(HotelSearchResponse {
            hotels: result.hotels.into_iter().map(HotelRecord::from).collect(),
            lowest_price: normalize_price(&result.lowest_price),
            current_price: normalize_price(&result.current_price),
        })
    }
}
