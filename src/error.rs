//! Error taxonomy for the request path.
//!
//! Every variant maps to one HTTP status. The client only ever sees a short
//! generic phrase; the detail goes to the operator log.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

// ---

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ---
    #[error("malformed query string: {0}")]
    InvalidQuery(String),

    #[error("invalid duration value: {0}")]
    InvalidDuration(String),

    #[error("invalid limit value: {0}")]
    InvalidLimit(String),

    #[error("failed to parse request body: {0}")]
    InvalidBody(String),

    #[error("invalid device id: {0}")]
    InvalidDeviceId(String),

    #[error("no weather data available")]
    NoData,

    #[error("no historical weather data available")]
    NoHistoricalData,

    #[error("device id allocation gave up after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("store call `{operation}` did not finish within {after:?}")]
    StoreTimeout {
        operation: &'static str,
        after: Duration,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl AppError {
    // ---
    pub fn status_code(&self) -> StatusCode {
        // ---
        match self {
            AppError::InvalidQuery(_)
            | AppError::InvalidDuration(_)
            | AppError::InvalidLimit(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidDeviceId(_) => StatusCode::BAD_REQUEST,
            AppError::NoData
            | AppError::NoHistoricalData
            | AppError::AllocationExhausted { .. }
            | AppError::Store(_)
            | AppError::StoreTimeout { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Phrase returned to the client.
    fn public_message(&self) -> &'static str {
        // ---
        match self {
            AppError::InvalidQuery(_) => "Invalid query string",
            AppError::InvalidDuration(_) => "Invalid duration",
            AppError::InvalidLimit(_) => "Invalid limit value",
            AppError::InvalidBody(_) => "Failed to parse request body",
            AppError::InvalidDeviceId(_) => "Invalid device id",
            AppError::NoData | AppError::NoHistoricalData => "Failed to fetch weather data",
            AppError::AllocationExhausted { .. } => "Failed to generate device id",
            AppError::Store(_) | AppError::StoreTimeout { .. } => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Rejected request: {}", self);
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
