//! GeoFetch Common Library
//!
//! Shared infrastructure for the GeoFetch workspace.
//!
//! Currently this is the logging layer: every binary in the workspace
//! initializes tracing through [`logging::init_logging`] so log output,
//! format, and filtering are configured the same way everywhere.
//!
//! # Example
//!
//! ```no_run
//! use geofetch_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("service starting");
//!     Ok(())
//! }
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig};
