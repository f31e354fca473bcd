//! Error taxonomy for the weather pipeline and its HTTP mapping.
//!
//! Every failure the service can report is one [`WeatherError`] variant.
//! Handlers return `Result<_, WeatherError>` and let [`IntoResponse`] pick
//! the status code and body, so no route builds error responses by hand.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::transform::TransformError;

// ---

pub const MISSING_KEY_MESSAGE: &str = "API Key is not configured on the server.";
pub const MISSING_LOCATION_MESSAGE: &str = "City or coordinates are required.";
pub const GENERIC_MESSAGE: &str = "An error occurred on the server.";
pub const NO_DASHBOARD_MESSAGE: &str = "No dashboard has been loaded yet.";

#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider credential is not configured.
    #[error("provider API key is not configured")]
    Config,

    /// Neither a city nor a coordinate pair was supplied.
    #[error("no location provided: {0}")]
    Input(String),

    /// No dashboard refresh has succeeded yet.
    #[error("no dashboard has been published")]
    NoDashboard,

    /// The provider answered with a non-success status.
    #[error("upstream responded with {status}")]
    Upstream { status: StatusCode, body: String },

    /// The provider could not be reached or its body could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider documents did not have the expected shape.
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    /// Anything else.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// JSON body used for every error we author ourselves.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        // ---
        match self {
            WeatherError::Config => {
                tracing::error!("Rejecting request: {}", self);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_MESSAGE)
            }
            WeatherError::Input(ref reason) => {
                tracing::debug!("Rejecting request: {}", reason);
                error_response(StatusCode::BAD_REQUEST, MISSING_LOCATION_MESSAGE)
            }
            WeatherError::NoDashboard => {
                error_response(StatusCode::NOT_FOUND, NO_DASHBOARD_MESSAGE)
            }
            WeatherError::Upstream { status, body } => {
                tracing::warn!("Passing through upstream status {}", status);
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            WeatherError::Network(_) | WeatherError::Transform(_) | WeatherError::Unexpected(_) => {
                tracing::error!("Backend error: {}", self);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE)
            }
        }
    }
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    (status, Json(ErrorBody { message })).into_response()
}
