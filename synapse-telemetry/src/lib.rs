//! # synapse-telemetry
//!
//! Structured logging for the Synapse query router, built on `tracing`.
//!
//! Call [`init_telemetry`] once in your `main`, then use the re-exported
//! macros throughout the workspace:
//!
//! ```rust
//! use synapse_telemetry::{init_telemetry, info};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry("synapse-router")?;
//!     info!("router starting");
//!     Ok(())
//! }
//! ```

pub mod init;

// Re-export tracing macros for convenience
pub use tracing::{Span, debug, error, info, instrument, trace, warn};

pub use init::init_telemetry;
