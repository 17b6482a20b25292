use config::{Config, ConfigError};
use serde::Deserialize;
use std::{fmt, time::Duration};
use weather_core::provider::{OpenWeatherOptions, openweather::OPENWEATHER_CURRENT_URL};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Process configuration, read from environment variables (`API_KEY`, `PORT`,
/// `APP_ENV`, ...).
#[derive(Clone, Deserialize)]
pub struct Settings {
    #[serde(rename = "app_env")]
    pub environment: Environment,
    pub bind_host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub upstream_url: String,
    #[serde(with = "humantime_serde")]
    pub upstream_timeout: Duration,
    pub units: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env(config::Environment::default())
    }

    pub fn from_env(source: config::Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app_env", "development")?
            .set_default("bind_host", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("upstream_url", OPENWEATHER_CURRENT_URL)?
            .set_default("upstream_timeout", "10s")?
            .set_default("units", "metric")?
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// The upstream credential, treating an empty value as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn upstream_options(&self) -> OpenWeatherOptions {
        OpenWeatherOptions {
            url: self.upstream_url.clone(),
            units: self.units.clone(),
            timeout: self.upstream_timeout,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("environment", &self.environment)
            .field("bind_host", &self.bind_host)
            .field("port", &self.port)
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("upstream_url", &self.upstream_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("units", &self.units)
            .finish()
    }
}
