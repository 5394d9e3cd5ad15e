// Normalization of provider listing fields
// Providers return listing fields in whatever shape the scraped page had, so every
// helper is total: a malformed field degrades to None instead of failing the whole result set.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

// First run of digits with optional dot / thousands-comma separators
const PRICE_PATTERN: &str = r"[\d,.]+";

fn price_regex() -> &'static Regex {
    static PRICE_REGEX: OnceLock<Regex> = OnceLock::new();
    PRICE_REGEX.get_or_init(|| Regex::new(PRICE_PATTERN).expect("price pattern is a valid regex"))
}

/// Coerces a raw provider price into a non-negative decimal.
///
/// Text such as `"$1,234.50"` yields `1234.5`; numbers pass through; anything else,
/// including text without digits, yields `None`.
pub fn normalize_price(value: &Value) -> Option<f64> {
    match value {
        Value::String(text) => parse_price_text(text),
        Value::Number(number) => number.as_f64().filter(|price| *price >= 0.0),
        _ => None,
    }
}

fn parse_price_text(text: &str) -> Option<f64> {
    let matched = price_regex().find(text)?;
    let digits = matched.as_str().replace(',', "");
    digits
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

/// Coerces a raw provider stop count into a non-negative integer.
pub fn normalize_stops(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => {
            if let Some(stops) = number.as_u64() {
                return u32::try_from(stops).ok();
            }
            // 2.0 is still a whole number of stops
            number
                .as_f64()
                .filter(|stops| stops.fract() == 0.0 && *stops >= 0.0 && *stops <= u32::MAX as f64)
                .map(|stops| stops as u32)
        }
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Coerces a raw hotel rating into a non-negative decimal. Text such as `"4.5/5"` yields `4.5`.
pub fn normalize_rating(value: &Value) -> Option<f64> {
    match value {
        Value::String(text) => parse_price_text(text),
        Value::Number(number) => number.as_f64().filter(|rating| *rating >= 0.0),
        _ => None,
    }
}

pub fn normalize_amenities(value: &Value) -> Option<Vec<String>> {
    match value {
        // non-text entries are dropped, the rest of the list survives
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
        ),
        Value::String(text) => Some(
            text.split(',')
                .map(str::trim)
                .filter(|amenity| !amenity.is_empty())
                .map(String::from)
                .collect(),
        ),
        _ => None,
    }
}

// Free-text listing fields (duration, delay, ...). Scalars are rendered as text.
pub fn normalize_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub fn normalize_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => text.trim().parse::<bool>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!("$1,234.50"), Some(1234.50); "currency symbol and thousands separator")]
    #[test_case(json!(42), Some(42.0); "integer passes through")]
    #[test_case(json!(99.5), Some(99.5); "float passes through")]
    #[test_case(json!("N/A"), None; "text without digits")]
    #[test_case(Value::Null, None; "null")]
    #[test_case(json!("EUR 89"), Some(89.0); "currency code prefix")]
    #[test_case(json!("1,299 total, 2 nights"), Some(1299.0); "first numeric run wins")]
    #[test_case(json!("..."), None; "dots only")]
    #[test_case(json!(true), None; "boolean")]
    #[test_case(json!([120]), None; "array")]
    #[test_case(json!(-10), None; "negative number")]
    fn test_normalize_price(value: Value, expected: Option<f64>) {
        assert_eq!(normalize_price(&value), expected);
    }

    #[test_case(json!("2"), Some(2); "numeric string")]
    #[test_case(json!(0), Some(0); "zero")]
    #[test_case(Value::Null, None; "null")]
    #[test_case(json!("nonstop"), None; "word")]
    #[test_case(json!(" 1 "), Some(1); "padded string")]
    #[test_case(json!(2.0), Some(2); "whole float")]
    #[test_case(json!(1.5), None; "fractional float")]
    #[test_case(json!(-1), None; "negative")]
    #[test_case(json!({"stops": 1}), None; "object")]
    fn test_normalize_stops(value: Value, expected: Option<u32>) {
        assert_eq!(normalize_stops(&value), expected);
    }

    #[test_case(json!(4.2), Some(4.2); "number passes through")]
    #[test_case(json!("4.5/5"), Some(4.5); "out of five text")]
    #[test_case(json!("Rated 3 stars"), Some(3.0); "embedded digit")]
    #[test_case(json!("unrated"), None; "no digits")]
    #[test_case(json!(-1.0), None; "negative")]
    #[test_case(Value::Null, None; "null")]
    fn test_normalize_rating(value: Value, expected: Option<f64>) {
        assert_eq!(normalize_rating(&value), expected);
    }

    #[test_case(json!(["Wi-Fi", "Pool"]), Some(vec!["Wi-Fi", "Pool"]); "string array")]
    #[test_case(json!(["Wi-Fi", 3, null, "Spa"]), Some(vec!["Wi-Fi", "Spa"]); "mixed array keeps text")]
    #[test_case(json!("Wi-Fi, Pool,"), Some(vec!["Wi-Fi", "Pool"]); "comma separated text")]
    #[test_case(json!([]), Some(vec![]); "empty array")]
    #[test_case(json!({"wifi": true}), None; "object")]
    #[test_case(Value::Null, None; "null")]
    fn test_normalize_amenities(value: Value, expected: Option<Vec<&str>>) {
        let expected = expected.map(|list| list.into_iter().map(String::from).collect::<Vec<_>>());
        assert_eq!(normalize_amenities(&value), expected);
    }

    #[test_case(json!("2 hr 15 min"), Some("2 hr 15 min"); "text")]
    #[test_case(json!(135), Some("135"); "number")]
    #[test_case(json!({"minutes": 10}), None; "object")]
    #[test_case(Value::Null, None; "null")]
    fn test_normalize_text(value: Value, expected: Option<&str>) {
        assert_eq!(normalize_text(&value).as_deref(), expected);
    }

    #[test_case(json!(true), Some(true); "boolean")]
    #[test_case(json!("false"), Some(false); "text")]
    #[test_case(json!("yes"), None; "other text")]
    #[test_case(json!(1), None; "number")]
    fn test_normalize_flag(value: Value, expected: Option<bool>) {
        assert_eq!(normalize_flag(&value), expected);
    }
}
