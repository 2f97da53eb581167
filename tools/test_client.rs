//! Test Prediction Client
//!
//! Generates random feature records and posts them to a running service's
//! `/predict` endpoint, then reports how the responses were distributed.

use futures::stream::{self, StreamExt};
use haircut_recommender::{Attribute, CategoryCodec};
use rand::Rng;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Random request generator for testing
struct RequestGenerator {
    rng: rand::rngs::ThreadRng,
    codec: CategoryCodec,
}

impl RequestGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
            codec: CategoryCodec::new(),
        }
    }

    /// Every attribute present with a declared label
    fn generate_valid(&mut self) -> Value {
        let mut features = Map::new();
        for attribute in Attribute::ALL {
            let labels = self.codec.labels(attribute);
            let label = labels[self.rng.gen_range(0..labels.len())];
            features.insert(attribute.column_name().to_string(), json!(label));
        }
        json!({ "features": features })
    }

    /// A valid record with one attribute dropped or given an unknown label
    fn generate_invalid(&mut self) -> Value {
        let mut body = self.generate_valid();
        let attribute = Attribute::ALL[self.rng.gen_range(0..Attribute::ALL.len())];

        if let Some(features) = body["features"].as_object_mut() {
            if self.rng.gen_bool(0.5) {
                features.remove(attribute.column_name());
            } else {
                features.insert(attribute.column_name().to_string(), json!("Unknown"));
            }
        }
        body
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("test_client=info".parse()?),
        )
        .init();

    info!("Starting Test Prediction Client");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let base_url = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("http://localhost:5001");
    let count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);
    let invalid_rate: f64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0.1);
    let concurrency: usize = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(4);

    info!(
        base_url = %base_url,
        count = count,
        invalid_rate = invalid_rate,
        concurrency = concurrency,
        "Configuration loaded"
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let url = format!("{}/predict", base_url.trim_end_matches('/'));

    let mut generator = RequestGenerator::new();
    let mut rng = rand::thread_rng();
    let bodies: Vec<Value> = (0..count)
        .map(|_| {
            if rng.gen_bool(invalid_rate.clamp(0.0, 1.0)) {
                generator.generate_invalid()
            } else {
                generator.generate_valid()
            }
        })
        .collect();

    let start = Instant::now();
    let results: Vec<Result<(u16, Value), reqwest::Error>> = stream::iter(bodies)
        .map(|body| {
            let client = client.clone();
            let url = url.clone();
            async move {
                let response = client.post(&url).json(&body).send().await?;
                let status = response.status().as_u16();
                let payload = response.json::<Value>().await.unwrap_or(Value::Null);
                Ok((status, payload))
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    let elapsed = start.elapsed();

    let mut by_status: BTreeMap<u16, usize> = BTreeMap::new();
    let mut predictions: BTreeMap<String, usize> = BTreeMap::new();
    let mut transport_errors = 0;

    for result in results {
        match result {
            Ok((status, payload)) => {
                *by_status.entry(status).or_insert(0) += 1;
                if let Some(prediction) = payload.get("prediction") {
                    *predictions.entry(prediction.to_string()).or_insert(0) += 1;
                }
            }
            Err(e) => {
                transport_errors += 1;
                warn!(error = %e, "Request failed");
            }
        }
    }

    info!(
        "Completed {} requests in {:.2}s ({:.1} req/s)",
        count,
        elapsed.as_secs_f64(),
        count as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    for (status, n) in &by_status {
        info!(status = status, count = n, "Responses by status");
    }
    for (prediction, n) in &predictions {
        info!(prediction = %prediction, count = n, "Predictions");
    }
    if transport_errors > 0 {
        warn!(count = transport_errors, "Transport errors");
    }

    Ok(())
}
