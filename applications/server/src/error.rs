/// Server error types
use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Missing or unusable configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote authorization failed
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Missing or invalid request parameter
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Non-success storage response, passed through verbatim
    #[error("Upstream returned {status}")]
    Upstream { status: StatusCode, body: String },

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Upstream request failed before a response arrived
    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] aria_core::AriaError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // Upstream errors bypass the JSON envelope: status and body are
        // forwarded exactly as storage produced them.
        if let ServerError::Upstream { status, body } = self {
            tracing::warn!(status = %status, "passing through upstream error");
            return Response::builder()
                .status(status)
                .body(Body::from(body))
                .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response());
        }

        let (status, error_message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ServerError::Auth(msg) => {
                tracing::error!("Authorization error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Http(ref e) => {
                tracing::error!("Upstream request error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Upstream request failed".to_string(),
                )
            }
            ServerError::Catalog(ref e) => {
                tracing::error!("Catalog error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Catalog error".to_string(),
                )
            }
            ServerError::Upstream { .. } => unreachable!("handled above"),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
