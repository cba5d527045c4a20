use http::StatusCode;
use thiserror::Error;
use tracing::error;

use crate::response::{message, ApiResponse};

/// Everything a handler can fail with. Not-found is not an error: handlers
/// answer it with a 404 envelope directly.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Missing query parameter {0}")]
    MissingQueryParameter(&'static str),

    #[error("Missing request body")]
    MissingBody,

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Missing field {0} in request body")]
    MissingField(&'static str),

    #[error("Store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl RouterError {
    /// Translates the error into an envelope; store faults become a 500.
    pub fn into_response(self) -> ApiResponse {
        match self {
            RouterError::Store(e) => {
                error!("Store operation failed: {e:#}");
                message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            other => message(StatusCode::BAD_REQUEST, other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;
