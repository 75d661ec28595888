//! Hadith Gateway Library
//!
//! Request-processing pipeline for the hadith search API: security headers,
//! per-request timeout, fixed-window rate limiting, query normalization,
//! `/v1` content-search route groups, a documentation toggle, and one
//! central error stage. In embedded mode the pipeline is consumed as a
//! plain `axum::Router` via [`GatewayServer::into_router`].

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod search;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::{DeploymentMode, GatewayConfig};
pub use error::GatewayError;
pub use http::{AppState, GatewayServer};
pub use lifecycle::Shutdown;
pub use search::{DorarClient, SearchService};
