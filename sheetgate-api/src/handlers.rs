//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use tracing::instrument;

use sheetgate_core::constants::{ST_MARY_KEY, UNITED_SCHOOL_KEY};

use crate::dto::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /united-school
pub async fn united_school(State(state): State<Arc<AppState>>) -> Result<Response> {
    serve_dataset(&state, UNITED_SCHOOL_KEY).await
}

/// GET /st-mary
pub async fn st_mary(State(state): State<Arc<AppState>>) -> Result<Response> {
    serve_dataset(&state, ST_MARY_KEY).await
}

#[instrument(skip(state))]
async fn serve_dataset(state: &AppState, dataset: &str) -> Result<Response> {
    let data = state
        .datasets
        .load(dataset, state.config.spreadsheet_id(dataset))
        .await?;

    Ok(Json(data.as_ref()).into_response())
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cached_datasets: state.datasets.cached_datasets(),
    })
}
