//! Resilience subsystem.
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every request has a deadline
//! - Deadline enforcement is composable middleware, not handler logic
//! - No retries: an operational failure is terminal for that request

pub mod timeout;

pub use timeout::RequestTimeoutLayer;
