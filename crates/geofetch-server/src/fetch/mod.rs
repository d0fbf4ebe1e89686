//! RNA-seq fetch operation
//!
//! The service's one write operation: search GEO DataSets, fetch per-study
//! XML detail, extract each study's FTP location, and download the listed
//! files under the resolved destination directory.
//!
//! Module layout follows the usual vertical slice:
//! - `pipeline.rs` - the search -> detail -> extract -> download sequence
//! - `routes.rs` - HTTP route definition and handler

pub mod pipeline;
pub mod routes;

use serde::Deserialize;

use crate::destination::ConflictPolicy;

/// Default tissue when the request omits it
pub const DEFAULT_TISSUE: &str = "hippocampus";

/// Default data type when the request omits it
pub const DEFAULT_DATA_TYPE: &str = "rna-seq";

/// Body of `POST /fetch_rnaseq_data`
///
/// Only `organism` is required (checked after sanitization, not by serde, so
/// a missing field and an all-punctuation value fail the same way).
#[derive(Debug, Clone, Deserialize)]
pub struct FetchRequest {
    #[serde(default)]
    pub organism: String,
    pub tissue: Option<String>,
    pub data_type: Option<String>,
    #[serde(default)]
    pub on_conflict: ConflictPolicy,
    pub redirect_dir: Option<String>,
}

/// Outcome of a completed fetch pipeline
///
/// Tagged alternative to ad hoc per-branch JSON: the route handler maps each
/// variant onto the fixed wire messages.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Every record was processed; records without a transfer location were
    /// skipped silently
    Completed { studies: usize, files: usize },
    /// The base directory existed and the caller chose not to overwrite it
    Cancelled,
}
