//! HTTP API for attribute lookups and haircut prediction
//!
//! ## Endpoints
//!
//! - `GET /genderHaircut`, `/hairLength`, `/faceShape`, `/hairType`,
//!   `/hairDensity` - distinct dataset labels, e.g. `{"hairTypeList": [...]}`
//! - `POST /predict` - `{"features": {...}}` to `{"prediction": <label>}`
//! - `GET /health` - liveness and model status

mod handlers;
#[cfg(test)]
mod tests;

use crate::config::ServerConfig;
use crate::dataset::AttributeCatalog;
use crate::metrics::ServiceMetrics;
use crate::pipeline::PredictionPipeline;
use crate::types::attribute::Attribute;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

pub use handlers::HealthResponse;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Distinct labels per attribute, read-only after startup
    catalog: Arc<AttributeCatalog>,
    /// Validation, encoding and the model handle
    pipeline: Arc<PredictionPipeline>,
    /// Metrics collector for the predict path
    metrics: Arc<ServiceMetrics>,
}

impl AppState {
    pub fn new(catalog: AttributeCatalog, pipeline: PredictionPipeline) -> Self {
        Self::with_metrics(catalog, pipeline, Arc::new(ServiceMetrics::new()))
    }

    pub fn with_metrics(
        catalog: AttributeCatalog,
        pipeline: PredictionPipeline,
        metrics: Arc<ServiceMetrics>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            pipeline: Arc::new(pipeline),
            metrics,
        }
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    pub fn pipeline(&self) -> &PredictionPipeline {
        &self.pipeline
    }

    pub fn metrics(&self) -> &Arc<ServiceMetrics> {
        &self.metrics
    }
}

/// Build the router with all routes
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/predict", post(handlers::predict_handler))
        .route("/health", get(handlers::health_handler));

    for attribute in Attribute::ALL {
        router = router.route(
            &format!("/{}", attribute.route_name()),
            get(move |State(state): State<AppState>| async move {
                handlers::lookup_handler(&state, attribute)
            }),
        );
    }

    router.with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("HTTP server error")
}
