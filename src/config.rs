// Service configuration, read from the environment (and an optional .env file)
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const ADDR_VAR: &str = "TRAVEL_API_ADDR";
pub const FLIGHT_PROVIDER_URL_VAR: &str = "FLIGHT_PROVIDER_URL";
pub const HOTEL_PROVIDER_URL_VAR: &str = "HOTEL_PROVIDER_URL";
pub const PROVIDER_TIMEOUT_VAR: &str = "PROVIDER_TIMEOUT_SECS";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub flight_provider_url: String,
    pub hotel_provider_url: String,
    pub provider_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            flight_provider_url: "http://127.0.0.1:9001/flights".to_string(),
            hotel_provider_url: "http://127.0.0.1:9002/hotels".to_string(),
            provider_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    // Unset variables keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ADDR_VAR) {
            config.addr = value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    var: ADDR_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(value) = lookup(FLIGHT_PROVIDER_URL_VAR) {
            config.flight_provider_url = require_url(FLIGHT_PROVIDER_URL_VAR, value)?;
        }
        if let Some(value) = lookup(HOTEL_PROVIDER_URL_VAR) {
            config.hotel_provider_url = require_url(HOTEL_PROVIDER_URL_VAR, value)?;
        }
        if let Some(value) = lookup(PROVIDER_TIMEOUT_VAR) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: PROVIDER_TIMEOUT_VAR,
                    value: value.clone(),
                    reason: "expected a positive number of seconds".to_string(),
                })?;
            config.provider_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn require_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            var,
            value,
            reason: "expected an http(s) URL".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ADDR_VAR, "0.0.0.0:8080"),
            (FLIGHT_PROVIDER_URL_VAR, "https://flights.internal/search"),
            (PROVIDER_TIMEOUT_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.flight_provider_url, "https://flights.internal/search");
        assert_eq!(config.hotel_provider_url, AppConfig::default().hotel_provider_url);
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup_from(&[(PROVIDER_TIMEOUT_VAR, "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: PROVIDER_TIMEOUT_VAR,
                ..
            }
        ));

        let err = AppConfig::from_lookup(lookup_from(&[(HOTEL_PROVIDER_URL_VAR, "hotels.local")]))
            .unwrap_err();
        assert!(err.to_string().contains(HOTEL_PROVIDER_URL_VAR));

        assert!(AppConfig::from_lookup(lookup_from(&[(ADDR_VAR, "not-an-addr")])).is_err());
    }
}
