//! Reverse geocoding through Nominatim (OpenStreetMap). Free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{LocationResolver, LocationUnavailable};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("weather-core/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NominatimResolver {
    position: Option<Coordinates>,
    base_url: String,
    http: Client,
}

impl NominatimResolver {
    pub fn new(position: Option<Coordinates>) -> Result<Self, LocationUnavailable> {
        Self::new_with_base_url(position, NOMINATIM_URL)
    }

    pub fn new_with_base_url(
        position: Option<Coordinates>,
        base_url: &str,
    ) -> Result<Self, LocationUnavailable> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(LocationUnavailable::Lookup)?;

        Ok(Self {
            position,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl LocationResolver for NominatimResolver {
    async fn resolve_current_location(&self) -> Result<String, LocationUnavailable> {
        let position = self.position.ok_or(LocationUnavailable::NoPosition)?;

        let response = self
            .http
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("lat", position.latitude.to_string()),
                ("lon", position.longitude.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(LocationUnavailable::Lookup)?;

        if !response.status().is_success() {
            return Err(LocationUnavailable::Status(response.status()));
        }

        let body: NominatimResponse = response.json().await.map_err(LocationUnavailable::Lookup)?;

        let city = body
            .address
            .and_then(|a| a.city)
            .filter(|c| !c.is_empty())
            .ok_or(LocationUnavailable::NoCity)?;

        tracing::debug!(%city, "reverse geocoded current position");
        Ok(city)
    }
}
