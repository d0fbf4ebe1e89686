//! Fetch routes

use axum::response::IntoResponse;
use axum::{extract::State, response::Response, routing::post, Json, Router};
use tracing::info;

use super::{pipeline, FetchOutcome, FetchRequest};
use crate::api::response::{MessageResponse, MSG_CANCELLED, MSG_SUCCESS};
use crate::api::AppState;
use crate::error::AppError;

/// Create fetch routes
pub fn fetch_routes() -> Router<AppState> {
    Router::new().route("/fetch_rnaseq_data", post(fetch_rnaseq_data))
}

/// Fetch RNA-seq study data
///
/// POST /fetch_rnaseq_data
/// Body: `{"organism": "...", "tissue"?, "data_type"?, "on_conflict"?, "redirect_dir"?}`
async fn fetch_rnaseq_data(
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> Result<Response, AppError> {
    match pipeline::run(&state, request).await? {
        FetchOutcome::Completed { studies, files } => {
            info!(studies, files, "fetch request completed");
            Ok(MessageResponse::new(MSG_SUCCESS).into_response())
        },
        FetchOutcome::Cancelled => Ok(MessageResponse::new(MSG_CANCELLED).into_response()),
    }
}
