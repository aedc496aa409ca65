//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Datasets
        .route("/united-school", get(handlers::united_school))
        .route("/st-mary", get(handlers::st_mary))

        .with_state(state)
}
