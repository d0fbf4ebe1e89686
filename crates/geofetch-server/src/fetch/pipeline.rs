//! Fetch pipeline orchestration
//!
//! Fully sequential per request: one search, then one detail fetch per
//! identifier, then one FTP transfer per extracted location. The first
//! failure in any phase aborts the remainder of that phase and the request;
//! files already written stay on disk.

use tracing::{info, warn};

use super::{FetchOutcome, FetchRequest, DEFAULT_DATA_TYPE, DEFAULT_TISSUE};
use crate::api::response::ERR_ORGANISM_REQUIRED;
use crate::api::AppState;
use crate::destination::{self, Resolution};
use crate::error::{AppError, ServerResult};
use crate::extract;
use crate::ftp::StudyFetcher;
use crate::sanitize::sanitize;

/// Execute the full fetch sequence for one request.
pub async fn run(state: &AppState, request: FetchRequest) -> ServerResult<FetchOutcome> {
    let term = build_term(&request)?;
    info!(%term, "searching GEO DataSets");

    let ids = state.ncbi.search(&term).await?;
    if ids.is_empty() {
        info!(%term, "search matched no records");
        return Err(AppError::NoRecords);
    }
    info!(count = ids.len(), "search returned record identifiers");

    // Sequential, fail-fast: the first efetch failure aborts the batch.
    let mut details = Vec::with_capacity(ids.len());
    for id in &ids {
        details.push(state.ncbi.fetch_detail(id).await?);
    }

    let base_dir = &state.config.storage.base_dir;
    let dest = match destination::resolve(
        base_dir,
        request.on_conflict,
        request.redirect_dir.as_deref(),
    )? {
        Resolution::Cancelled => {
            info!(dir = %base_dir.display(), "fetch cancelled by caller");
            return Ok(FetchOutcome::Cancelled);
        },
        Resolution::Proceed(path) => path,
    };

    let fetcher = StudyFetcher::new(state.config.ftp.clone());
    let mut studies = 0;
    let mut files = 0;

    // Study directories are numbered by ordinal position in the detail
    // list, so skipped records leave gaps.
    for (idx, detail) in details.iter().enumerate() {
        let Some(location) = extract::ftp_location(detail) else {
            warn!(record = idx + 1, "no transfer location in detail, skipping");
            continue;
        };

        let study_dir = dest.join(format!("study_{}", idx + 1));
        files += fetcher.download_study(location, &study_dir).await?;
        studies += 1;
    }

    info!(studies, files, dir = %dest.display(), "fetch completed");

    Ok(FetchOutcome::Completed { studies, files })
}

/// Build the GEO search term from the sanitized request fields.
///
/// Omitted tissue/data type fall back to their defaults untouched; provided
/// values are sanitized like every other piece of user input.
fn build_term(request: &FetchRequest) -> ServerResult<String> {
    let organism = sanitize(&request.organism);
    if organism.is_empty() {
        return Err(AppError::Validation(ERR_ORGANISM_REQUIRED.to_string()));
    }

    let tissue = match request.tissue.as_deref() {
        Some(value) => sanitize(value),
        None => DEFAULT_TISSUE.to_string(),
    };
    let data_type = match request.data_type.as_deref() {
        Some(value) => sanitize(value),
        None => DEFAULT_DATA_TYPE.to_string(),
    };

    Ok(format!("{} {} {}", organism, tissue, data_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::ConflictPolicy;

    fn request(organism: &str) -> FetchRequest {
        FetchRequest {
            organism: organism.to_string(),
            tissue: None,
            data_type: None,
            on_conflict: ConflictPolicy::Cancel,
            redirect_dir: None,
        }
    }

    #[test]
    fn test_build_term_defaults() {
        let term = build_term(&request("mouse")).unwrap();
        assert_eq!(term, "mouse hippocampus rna-seq");
    }

    #[test]
    fn test_build_term_sanitizes_fields() {
        let mut req = request("mouse!");
        req.tissue = Some("cortex;".to_string());
        req.data_type = Some("chip-seq".to_string());

        let term = build_term(&req).unwrap();
        assert_eq!(term, "mouse cortex chipseq");
    }

    #[test]
    fn test_build_term_missing_organism() {
        assert!(matches!(
            build_term(&request("")),
            Err(AppError::Validation(_))
        ));
        // Sanitizes to empty, same failure
        assert!(matches!(
            build_term(&request("!!!")),
            Err(AppError::Validation(_))
        ));
    }
}
