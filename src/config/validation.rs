//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (parsing handles syntactic)
//! - Validate value ranges (timeouts > 0, windows > 0)
//! - Check the upstream base URL is well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::GatewayConfig;
use thiserror::Error;
use url::Url;

/// A single semantic configuration problem.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("rate limit window must be greater than zero")]
    ZeroWindow,

    #[error("rate limit max requests must be greater than zero")]
    ZeroMaxRequests,

    #[error("body limit must be greater than zero")]
    ZeroBodyLimit,

    #[error("upstream base url is not valid: {0}")]
    BadUpstreamUrl(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeouts.request_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError::ZeroWindow);
    }
    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::ZeroMaxRequests);
    }
    if config.limits.body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if let Err(e) = Url::parse(&config.upstream.base_url) {
        errors.push(ValidationError::BadUpstreamUrl(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
