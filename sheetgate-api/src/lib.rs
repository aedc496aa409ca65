//! # Sheetgate API Server
//!
//! Serves Google Sheets datasets as JSON, caching each one for five minutes.
//!
//! ## Endpoints
//!
//! - `GET /united-school` - Records of the `UNITED_SCHOOL` spreadsheet
//! - `GET /st-mary` - Records of the `ST_MARY` spreadsheet
//! - `GET /health` - Liveness and cache occupancy
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheetgate_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config)?;
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod service;
mod state;
mod dto;
mod error;

#[cfg(test)]
mod testing;

pub use routes::create_router;
pub use service::DatasetService;
pub use state::{AppState, ApiConfig, DATASETS};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use sheetgate_core::error::Result;

/// API server for Sheetgate.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server backed by the Google Sheets client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::with_state(Arc::new(AppState::new(config)?)))
    }

    /// Creates a server around prepared state.
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Server is running on http://{}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with configuration from the environment.
pub async fn start_server() -> std::io::Result<()> {
    let config = ApiConfig::from_env();
    let port = config.port;
    let server = ApiServer::new(config).map_err(std::io::Error::other)?;
    server.run(([0, 0, 0, 0], port)).await
}
