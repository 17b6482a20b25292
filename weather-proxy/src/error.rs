use actix_web::{HttpResponse, ResponseError, body::BoxBody, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP callers. Underlying causes are logged where they
/// occur and never reach the response body.
#[derive(Clone, Copy, Debug, Error)]
pub enum ApiError {
    #[error("Error fetching weather data")]
    FetchFailed,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::FetchFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let error = ErrorResponse { error: self.to_string() };
        HttpResponse::build(self.status_code()).json(&error)
    }
}
