//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main):
//!     Load config → Validate → Build server → Bind listener → Supervise
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Supervision (supervisor.rs):
//!     Escaped failure → Log identity + message → Exit non-zero
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then the pipeline, then the listener
//! - Fail fast: an escaped failure never leaves the process half-alive
//! - Embedded mode skips all of this; the host supervises

pub mod shutdown;
pub mod signals;
pub mod supervisor;

pub use shutdown::Shutdown;
