//! Client side of the weather proxy: an HTTP client for the proxy and the
//! query session that drives a user-facing view.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use thiserror::Error;

use crate::NormalizedWeather;

pub mod proxy;
pub mod session;

pub use proxy::ProxyClient;
pub use session::{ERROR_MESSAGE, QuerySession, QueryState};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid weather proxy url '{0}'")]
    InvalidUrl(String),

    #[error("request to weather proxy failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather proxy responded with status {status}: {message}")]
    Server { status: StatusCode, message: String },
}

#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<NormalizedWeather, ClientError>;
}

#[async_trait]
impl<T: WeatherApi + ?Sized> WeatherApi for Arc<T> {
    async fn fetch(&self, location: &str) -> Result<NormalizedWeather, ClientError> {
        (**self).fetch(location).await
    }
}
