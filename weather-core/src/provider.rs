use crate::{NormalizedWeather, WeatherRequest};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

pub use openweather::{OpenWeatherOptions, OpenWeatherProvider};

/// Why an upstream lookup failed. Callers outside the process only ever see a
/// generic failure; these variants exist for logs.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to reach upstream weather provider: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream weather provider responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected upstream response shape: {0}")]
    Shape(String),
}

impl ProviderError {
    /// Short, stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Transport(_) => "transport",
            ProviderError::Status { .. } => "status",
            ProviderError::Shape(_) => "shape",
        }
    }

    pub fn upstream_status(&self) -> Option<StatusCode> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            ProviderError::Transport(err) => err.status(),
            ProviderError::Shape(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Transport(err) if err.is_timeout())
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<NormalizedWeather, ProviderError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
