//! HTTP surface
//!
//! Two routes: the fetch operation and a health check. The router is built
//! from an [`AppState`] so integration tests can point the service at mock
//! NCBI endpoints and a temporary base directory.

pub mod response;

use axum::{response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::fetch;
use crate::middleware;
use crate::ncbi::NcbiClient;
use response::HealthResponse;

/// Application state shared across handlers
///
/// Built once at startup from the loaded configuration; handlers never read
/// process-wide state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ncbi: NcbiClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let ncbi = NcbiClient::new(config.ncbi.clone())?;
        Ok(Self {
            config: Arc::new(config),
            ncbi,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.config.cors);

    Router::new()
        .route("/health", get(health_check))
        .merge(fetch::routes::fetch_routes())
        .with_state(state)
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(cors)
}

/// Health check handler: static status, no side effects
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::running())
}
