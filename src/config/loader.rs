//! Configuration loading from the environment.
//!
//! Mirrors the shape of `schema.rs`: every variable has a default, so a bare
//! environment yields a fully usable configuration. Parse failures are
//! reported per variable rather than silently falling back.

use crate::config::schema::{DeploymentMode, GatewayConfig};
use crate::config::validation::{validate_config, ValidationError};
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from process environment variables.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();

    if let Some(port) = parse_var("GATEWAY_PORT")? {
        config.listener.port = port;
    }
    if let Some(mode) = read_var("GATEWAY_MODE") {
        config.listener.mode = parse_mode(&mode)?;
    }
    if let Some(ms) = parse_var("REQUEST_TIMEOUT_MS")? {
        config.timeouts.request_ms = ms;
    }
    if let Some(bytes) = parse_var("BODY_LIMIT_BYTES")? {
        config.limits.body_bytes = bytes;
    }
    if let Some(secs) = parse_var("RATE_LIMIT_WINDOW_SECS")? {
        config.rate_limit.window_secs = secs;
    }
    if let Some(max) = parse_var("RATE_LIMIT_MAX")? {
        config.rate_limit.max_requests = max;
    }
    if let Some(trusted) = parse_var("TRUST_PROXY")? {
        config.rate_limit.trust_proxy = trusted;
    }
    if let Some(path) = read_var("OPENAPI_PATH") {
        config.docs.openapi_path = path;
    }
    if let Some(base) = read_var("UPSTREAM_BASE_URL") {
        config.upstream.base_url = base;
    }
    if let Some(addr) = read_var("METRICS_ADDRESS") {
        config.observability.metrics_address = Some(addr);
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn read_var(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match read_var(name) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|e| ConfigError::Invalid {
            var: name,
            reason: format!("{e} (got {raw:?})"),
        }),
    }
}

/// Parse a deployment mode string, case-insensitively.
pub fn parse_mode(raw: &str) -> Result<DeploymentMode, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "standalone" => Ok(DeploymentMode::Standalone),
        "embedded" => Ok(DeploymentMode::Embedded),
        other => Err(ConfigError::Invalid {
            var: "GATEWAY_MODE",
            reason: format!("expected standalone or embedded, got {other:?}"),
        }),
    }
}
