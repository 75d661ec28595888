//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ CLI overrides)
//!     → loader.rs (read & parse per variable)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared with all subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so an empty environment still boots
//! - Validation separates syntactic (parsing) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::{DeploymentMode, GatewayConfig, RateLimitConfig};
