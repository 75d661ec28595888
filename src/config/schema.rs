//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All values are externally supplied (environment, optionally overridden on
//! the command line) and frozen for the lifetime of the process.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (port, deployment mode).
    pub listener: ListenerConfig,

    /// Request limits (body size).
    pub limits: LimitConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Documentation artifact settings.
    pub docs: DocsConfig,

    /// Upstream search collaborator settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// How the pipeline is hosted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Own the listen socket and supervise the process.
    #[default]
    Standalone,
    /// Expose the pipeline as a callable router; the host supervises.
    Embedded,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Port to bind in standalone mode.
    pub port: u16,

    /// Deployment mode.
    pub mode: DeploymentMode,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            mode: DeploymentMode::Standalone,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum request body size in bytes.
    pub body_bytes: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            body_bytes: 10 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request deadline in milliseconds.
    pub request_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_ms: 10_000 }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window length in seconds.
    pub window_secs: u64,

    /// Maximum requests per client per window.
    pub max_requests: u32,

    /// A trusted proxy fronts the gateway; client identity may be taken
    /// from `X-Forwarded-For`. Off by default: the header is forgeable.
    pub trust_proxy: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 100,
            trust_proxy: false,
        }
    }
}

/// Documentation artifact settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Path to the OpenAPI YAML artifact loaded at startup.
    pub openapi_path: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            openapi_path: "api-docs/openapi.yaml".to_string(),
        }
    }
}

/// Upstream search collaborator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the search backend.
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dorar.net".to_string(),
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Address for the Prometheus exporter; disabled when unset.
    pub metrics_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.port, 5000);
        assert_eq!(config.listener.mode, DeploymentMode::Standalone);
        assert_eq!(config.timeouts.request_ms, 10_000);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert!(!config.rate_limit.trust_proxy);
        assert!(config.observability.metrics_address.is_none());
    }

    #[test]
    fn mode_deserializes_lowercase() {
        let mode: DeploymentMode = serde_json::from_str("\"embedded\"").unwrap();
        assert_eq!(mode, DeploymentMode::Embedded);
    }
}
