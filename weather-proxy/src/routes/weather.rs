use actix_web::web;
use serde::Deserialize;
use weather_core::{NormalizedWeather, WeatherProvider, WeatherRequest};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LocationPath {
    pub location: Option<String>,
}

/// `GET /api/weather/{location}`, also mounted without the segment.
#[tracing::instrument(skip(provider))]
pub async fn weather<P: WeatherProvider + 'static>(
    provider: web::Data<P>,
    path: web::Path<LocationPath>,
) -> Result<web::Json<NormalizedWeather>, ApiError> {
    let request = WeatherRequest::new(path.location.as_deref());

    match provider.get_weather(&request).await {
        Ok(weather) => Ok(web::Json(weather)),
        Err(err) => {
            tracing::error!(
                location = %request.location,
                kind = err.kind(),
                upstream_status = ?err.upstream_status(),
                timeout = err.is_timeout(),
                error = %err,
                "failed to fetch weather data"
            );
            Err(ApiError::FetchFailed)
        }
    }
}
