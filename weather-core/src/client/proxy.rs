use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::NormalizedWeather;

use super::{ClientError, WeatherApi};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for `GET /api/weather/{location}` on a running proxy.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: Url,
    http: Client,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed =
            Url::parse(base_url).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;

        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self { base_url: parsed, http: Client::new() })
    }

    /// Builds the endpoint url, percent-encoding the location as one path segment.
    pub fn weather_url(&self, location: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "weather", location]);
        }
        url
    }
}

#[async_trait]
impl WeatherApi for ProxyClient {
    async fn fetch(&self, location: &str) -> Result<NormalizedWeather, ClientError> {
        let res = self.http.get(self.weather_url(location)).send().await?;

        let status = res.status();
        if !status.is_success() {
            let message = match res.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(ClientError::Server { status, message });
        }

        Ok(res.json().await?)
    }
}
