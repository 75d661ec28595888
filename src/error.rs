//! Central failure type for the gateway.
//!
//! # Responsibilities
//! - Classify failures as operational (safe to show) or internal
//! - Map every failure to exactly one HTTP status code
//! - Render the single JSON error shape `{ status, message }`
//!
//! # Design Decisions
//! - Every stage raises a `GatewayError` instead of writing its own response;
//!   `IntoResponse` is the only place a failure becomes bytes on the wire
//! - Internal failures log full detail server-side and return a generic body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::search::SearchError;

/// Failure raised by any pipeline stage or route handler.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or missing request input.
    #[error("{0}")]
    BadRequest(String),

    /// No route matched; carries the requested path.
    #[error("Can't find {0} on this server!")]
    NotFound(String),

    /// The request deadline elapsed before a response was produced.
    #[error("Request timeout")]
    Timeout,

    /// The client exhausted its request quota for the current window.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The upstream search collaborator could not be reached.
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// Unclassified programming error. Detail is logged, never sent.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status code this failure renders with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Operational failures carry messages safe to show to the client.
    pub fn is_operational(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

/// Wire shape of every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric HTTP status, duplicated in the body for clients that
    /// only inspect the payload.
    pub status: u16,
    /// Safe-to-display message.
    pub message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if self.is_operational() {
            self.to_string()
        } else {
            tracing::error!(error = %self, "unclassified failure reached the error stage");
            "Something went wrong".to_string()
        };

        let body = ErrorBody {
            status: status.as_u16(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<SearchError> for GatewayError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidQuery(msg) => Self::BadRequest(msg),
            SearchError::Upstream(detail) => {
                tracing::warn!(error = %detail, "upstream search request failed");
                Self::UpstreamUnavailable("Search service is temporarily unavailable".to_string())
            }
        }
    }
}
