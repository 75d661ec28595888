//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (attach protective response headers on the way out)
//!     → rate_limit.rs (check per-IP window quota)
//!     → Pass to normalization and routing
//! ```
//!
//! # Design Decisions
//! - Fail closed: an over-quota client is rejected before dispatch
//! - Headers are fixed and configuration-independent
//! - No trust in client input; X-Forwarded-For counts only behind a
//!   declared trusted proxy

pub mod headers;
pub mod rate_limit;

pub use headers::SecurityHeadersLayer;
pub use rate_limit::{RateLimiterLayer, RateLimiterState};
