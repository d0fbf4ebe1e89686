//! Destination directory resolution
//!
//! Decides where downloaded study files land before any transfer starts.
//! Conflict handling is driven by an explicit request field instead of an
//! interactive prompt, so a request never blocks waiting for an operator:
//!
//! - base dir absent: create it and proceed (policy is irrelevant)
//! - exists + `overwrite`: recursively delete, recreate, proceed
//! - exists + `cancel`: end the request with a cancellation outcome
//! - exists + `redirect`: create a sibling directory named by the request
//!   and proceed with it instead

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::AppError;
use crate::sanitize::sanitize;

/// How to handle an already-existing base directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Delete the existing directory recursively and recreate it
    Overwrite,
    /// End the request without touching the directory. Default: the least
    /// destructive choice when the caller did not say.
    #[default]
    Cancel,
    /// Write into an alternate sibling directory named by `redirect_dir`
    Redirect,
}

/// Result of resolving the destination directory
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Proceed with downloads into this directory
    Proceed(PathBuf),
    /// The caller chose not to overwrite; nothing was fetched
    Cancelled,
}

/// Resolve the destination directory for one request.
pub fn resolve(
    base_dir: &Path,
    policy: ConflictPolicy,
    redirect_dir: Option<&str>,
) -> Result<Resolution, AppError> {
    if !base_dir.exists() {
        std::fs::create_dir_all(base_dir)?;
        info!(dir = %base_dir.display(), "created base directory");
        return Ok(Resolution::Proceed(base_dir.to_path_buf()));
    }

    match policy {
        ConflictPolicy::Cancel => Ok(Resolution::Cancelled),
        ConflictPolicy::Overwrite => {
            std::fs::remove_dir_all(base_dir)?;
            std::fs::create_dir_all(base_dir)?;
            info!(dir = %base_dir.display(), "overwrote base directory");
            Ok(Resolution::Proceed(base_dir.to_path_buf()))
        },
        ConflictPolicy::Redirect => {
            let name = redirect_dir.map(sanitize).unwrap_or_default();
            if name.is_empty() {
                return Err(AppError::Validation(
                    "Redirect policy requires a redirect_dir name.".to_string(),
                ));
            }

            let alternate = base_dir
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(name);
            // Idempotent if the alternate directory already exists
            std::fs::create_dir_all(&alternate)?;
            info!(dir = %alternate.display(), "redirected to alternate directory");
            Ok(Resolution::Proceed(alternate))
        },
    }
}
