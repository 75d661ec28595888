//! Route dispatch.
//!
//! # Responsibilities
//! - Mount the content-search route groups under the shared `/v1` prefix
//! - Fall through to the 404 failure, carrying the requested path
//!
//! # Design Decisions
//! - Groups are ordered and independent; each owns its handler table
//! - Handlers are thin: validate, delegate to the search collaborator,
//!   wrap the payload — failures propagate as `GatewayError`
//! - Explicit fallback rather than a silent default

pub mod book;
pub mod data;
pub mod hadith;
pub mod mohdith;
pub mod sharh;

use axum::{extract::Request, response::Response, Router};

use crate::error::GatewayError;
use crate::http::server::AppState;

/// All `/v1` route groups, in mount order.
pub fn v1_router() -> Router<AppState> {
    Router::new()
        .merge(hadith::router())
        .merge(sharh::router())
        .merge(mohdith::router())
        .merge(book::router())
        .merge(data::router())
}

/// Terminal 404 for anything no group matched.
pub async fn not_found(req: Request) -> Response {
    use axum::response::IntoResponse;
    GatewayError::NotFound(req.uri().path().to_string()).into_response()
}
