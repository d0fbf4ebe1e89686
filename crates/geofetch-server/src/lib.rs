//! GeoFetch Server Library
//!
//! HTTP service for retrieving RNA-seq study data from NCBI GEO.
//!
//! # Overview
//!
//! One POST endpoint drives a four-step sequence:
//!
//! 1. **Search**: query the GEO DataSets index via E-utilities `esearch`
//! 2. **Detail**: fetch per-study XML metadata via `efetch`
//! 3. **Extract**: pull the embedded `ftp://` transfer location per record
//! 4. **Download**: list and retrieve the study files over FTP into
//!    per-study local subdirectories
//!
//! Every phase is sequential and fail-fast: the first error aborts the
//! remaining work and the request. Already-written files are left in place.
//!
//! # Framework Stack
//!
//! - **Axum**: web framework, routes and handlers
//! - **reqwest**: NCBI E-utilities client with bounded timeouts
//! - **suppaftp**: FTP transfers, driven from the blocking pool
//! - **tracing**: structured logging via `geofetch-common`

pub mod api;
pub mod config;
pub mod destination;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod ftp;
pub mod middleware;
pub mod ncbi;
pub mod sanitize;

// Re-export commonly used types
pub use api::AppState;
pub use error::{AppError, ServerResult};
