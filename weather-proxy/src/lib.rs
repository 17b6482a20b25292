//! HTTP proxy in front of the upstream weather provider.
//!
//! Exposes `GET /api/weather/{location}`, returning the normalized five-field
//! payload or a fixed error body.

pub mod error;
pub mod routes;
pub mod settings;
pub mod startup;

pub use settings::Settings;
pub use startup::App;
