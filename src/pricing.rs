// Best-by-price selection and trip cost aggregation
use chrono::NaiveDate;

use crate::models::{CostBreakdown, FlightRecord, HotelRecord};

pub const BUDGET_SUGGESTION: &str =
    "Consider adjusting your dates, reducing hotel star rating, or increasing your budget.";

pub trait Priced {
    fn price(&self) -> Option<f64>;
}

impl Priced for FlightRecord {
    fn price(&self) -> Option<f64> {
        self.price
    }
}

impl Priced for HotelRecord {
    fn price(&self) -> Option<f64> {
        self.price
    }
}

/// Returns the lowest-priced item, skipping items without a price.
/// Ties keep the earliest item.
pub fn cheapest<'a, T, I>(items: I) -> Option<&'a T>
where
    T: Priced + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let Some(price) = item.price() else {
            continue;
        };
        match best {
            Some((_, best_price)) if price >= best_price => {}
            _ => best = Some((item, price)),
        }
    }
    best.map(|(item, _)| item)
}

// Hotel nights for a stay; one-way and same-day trips are costed as a single night
pub fn nights_between(depart_date: NaiveDate, return_date: Option<NaiveDate>) -> i64 {
    return_date
        .map(|back| (back - depart_date).num_days())
        .unwrap_or(1)
        .max(1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    pub total: f64,
    pub per_person_per_day: Option<f64>,
    pub breakdown: CostBreakdown,
}

pub struct CostInputs<'a> {
    pub outbound: Option<&'a FlightRecord>,
    pub inbound: Option<&'a FlightRecord>,
    pub hotel: Option<&'a HotelRecord>,
    pub adults: u32,
    pub children: u32,
    pub nights: i64,
}

pub fn estimate_costs(inputs: &CostInputs<'_>) -> CostEstimate {
    // summed in f64 so that huge party sizes cannot overflow
    let travelers = f64::from(inputs.adults) + f64::from(inputs.children);
    let fare = |flight: Option<&FlightRecord>| {
        flight
            .and_then(|f| f.price)
            .map_or(0.0, |price| price * travelers)
    };

    let flight_cost = fare(inputs.outbound) + fare(inputs.inbound);
    let hotel_cost = inputs
        .hotel
        .and_then(|h| h.price)
        .map_or(0.0, |price| price * inputs.nights as f64);
    let total = flight_cost + hotel_cost;

    let per_person_per_day = if travelers > 0.0 && inputs.nights > 0 {
        Some(total / (travelers * inputs.nights as f64))
    } else {
        None
    };

    CostEstimate {
        total,
        per_person_per_day,
        breakdown: CostBreakdown {
            flight: flight_cost,
            hotel: hotel_cost,
            nights: inputs.nights,
            adults: inputs.adults,
            children: inputs.children,
        },
    }
}

pub fn budget_suggestion(total: f64, max_total_budget: Option<f64>) -> Option<String> {
    match max_total_budget {
        Some(budget) if total > budget => Some(BUDGET_SUGGESTION.to_string()),
        _ => None,
    }
}
