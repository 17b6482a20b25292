use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Location used when the caller does not supply one.
pub const DEFAULT_LOCATION: &str = "London,uk";

/// Resolve the location string actually sent upstream.
///
/// A missing or empty value falls back to [`DEFAULT_LOCATION`]; anything else is
/// passed through verbatim and left for the upstream provider to validate.
pub fn effective_location(raw: Option<&str>) -> String {
    match raw {
        Some(location) if !location.is_empty() => location.to_string(),
        _ => DEFAULT_LOCATION.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub location: String,
}

impl WeatherRequest {
    pub fn new(raw: Option<&str>) -> Self {
        Self { location: effective_location(raw) }
    }
}

/// The five-field payload returned to every client, independent of the
/// upstream provider's schema. Numbers are carried as the provider sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWeather {
    pub temperature: Number,
    pub humidity: Number,
    pub wind_speed: Number,
    pub weather: String,
    pub location: String,
}
