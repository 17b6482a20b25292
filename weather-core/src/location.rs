//! Current-location capability used by clients to pick a place automatically.

use async_trait::async_trait;
use thiserror::Error;

pub mod nominatim;

pub use nominatim::{Coordinates, NominatimResolver};

#[derive(Debug, Error)]
pub enum LocationUnavailable {
    #[error("no coordinates available for the current position")]
    NoPosition,

    #[error("reverse geocoding request failed: {0}")]
    Lookup(#[source] reqwest::Error),

    #[error("reverse geocoding responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("reverse geocoding returned no city")]
    NoCity,
}

#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve_current_location(&self) -> Result<String, LocationUnavailable>;
}

/// Resolver that always yields the same place, or nothing at all.
#[derive(Debug, Clone, Default)]
pub struct FixedLocation(pub Option<String>);

#[async_trait]
impl LocationResolver for FixedLocation {
    async fn resolve_current_location(&self) -> Result<String, LocationUnavailable> {
        self.0.clone().ok_or(LocationUnavailable::NoPosition)
    }
}
