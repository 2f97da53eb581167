//! Haircut Recommender - Main Entry Point
//!
//! Loads the dataset and model once, then serves lookups and predictions.

use anyhow::Result;
use haircut_recommender::{
    api::{self, AppState},
    codec::CategoryCodec,
    config::{AppConfig, LoggingConfig},
    dataset::AttributeCatalog,
    metrics::{MetricsReporter, ServiceMetrics},
    models::inference::PredictionInvoker,
    pipeline::PredictionPipeline,
    types::Attribute,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("haircut_recommender={}", config.level)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Optional config path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    init_logging(&config.logging)?;
    info!("Starting Haircut Recommender");

    // Load the dataset and derive the lookup lists
    let catalog = AttributeCatalog::load(&config.dataset.path)?;
    for attribute in Attribute::ALL {
        info!(
            attribute = %attribute,
            labels = ?catalog.distinct_values(attribute),
            "Lookup list ready"
        );
    }
    catalog.check_drift(&CategoryCodec::new(), config.dataset.fail_on_drift)?;

    // A missing model only disables /predict
    let invoker = PredictionInvoker::load(&config.model);
    if !invoker.is_loaded() {
        warn!("Serving without a model; /predict will answer 500");
    }

    let metrics = Arc::new(ServiceMetrics::new());
    if config.metrics.report_interval_secs > 0 {
        let reporter = MetricsReporter::new(metrics.clone(), config.metrics.report_interval_secs);
        tokio::spawn(reporter.start());
    }

    let state = AppState::with_metrics(catalog, PredictionPipeline::new(invoker), metrics.clone());
    api::serve(&config.server, state).await?;

    info!("Service shutting down...");
    metrics.print_summary();

    Ok(())
}
