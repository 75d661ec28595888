//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (normalize flags, strip internal parameters)
//!     → routing layer dispatches a group handler
//!     → docs.rs for the documentation surface
//!     → error stage renders any failure
//! ```

pub mod docs;
pub mod request;
pub mod server;

pub use request::{AudienceTab, RequestContext};
pub use server::{AppState, GatewayServer};
