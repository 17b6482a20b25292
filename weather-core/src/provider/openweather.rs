use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Number;
use std::{fmt, time::Duration};

use crate::{
    model::{NormalizedWeather, WeatherRequest},
    provider::{ProviderError, truncate_body},
};

use super::WeatherProvider;

pub const OPENWEATHER_CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherOptions {
    /// Current-conditions endpoint.
    pub url: String,
    /// Value of the `units` query parameter.
    pub units: String,
    pub timeout: Duration,
}

impl Default for OpenWeatherOptions {
    fn default() -> Self {
        Self {
            url: OPENWEATHER_CURRENT_URL.to_string(),
            units: "metric".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    options: OpenWeatherOptions,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, options: OpenWeatherOptions) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(ProviderError::Transport)?;

        Ok(Self { api_key, options, http })
    }

    async fn fetch_current(&self, location: &str) -> Result<NormalizedWeather, ProviderError> {
        let res = self
            .http
            .get(&self.options.url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", self.options.units.as_str()),
            ])
            .send()
            .await
            // The request url carries the api key.
            .map_err(|e| ProviderError::Transport(e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url()))?;

        if !status.is_success() {
            return Err(ProviderError::Status { status, body: truncate_body(&body) });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Shape(format!("invalid current weather JSON: {e}")))?;

        parsed.try_into()
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("url", &self.options.url)
            .field("units", &self.options.units)
            .field("timeout", &self.options.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Number,
    humidity: Number,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Number,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl TryFrom<OwCurrentResponse> for NormalizedWeather {
    type Error = ProviderError;

    fn try_from(v: OwCurrentResponse) -> Result<Self, Self::Error> {
        let OwCurrentResponse { name, main, weather, wind } = v;

        let condition = weather
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Shape("response contained no weather[0]".into()))?;

        Ok(NormalizedWeather {
            temperature: main.temp,
            humidity: main.humidity,
            wind_speed: wind.speed,
            weather: condition.description,
            location: name,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<NormalizedWeather, ProviderError> {
        self.fetch_current(&request.location).await
    }
}
