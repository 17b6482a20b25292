//! Core library for the weather proxy.
//!
//! This crate defines:
//! - The normalized weather contract and the effective-location rule
//! - The upstream provider abstraction and its OpenWeather implementation
//! - The client query session, proxy client and current-location capability
//! - Client configuration handling
//!
//! It is used by `weather-proxy` and `weather-cli`.

pub mod client;
pub mod config;
pub mod location;
pub mod model;
pub mod provider;

pub use client::{ClientError, ProxyClient, QuerySession, QueryState, WeatherApi};
pub use config::Config;
pub use location::{LocationResolver, LocationUnavailable};
pub use model::{DEFAULT_LOCATION, NormalizedWeather, WeatherRequest, effective_location};
pub use provider::{ProviderError, WeatherProvider};
