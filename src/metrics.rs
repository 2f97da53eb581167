//! Request statistics for the predict path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for the prediction service
pub struct ServiceMetrics {
    /// Successful predictions
    pub predictions_served: AtomicU64,
    /// Failed predict requests
    pub predictions_failed: AtomicU64,
    /// Failures by error kind
    failures_by_kind: RwLock<HashMap<&'static str, u64>>,
    /// Predicted label distribution
    labels: RwLock<HashMap<String, u64>>,
    /// Request latencies (in microseconds)
    latencies: RwLock<Vec<u64>>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            predictions_failed: AtomicU64::new(0),
            failures_by_kind: RwLock::new(HashMap::new()),
            labels: RwLock::new(HashMap::new()),
            latencies: RwLock::new(Vec::with_capacity(1000)),
            start_time: Instant::now(),
        }
    }

    /// Record a successful prediction
    pub fn record_prediction(&self, latency: Duration, label: &str) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);
        self.record_latency(latency);

        if let Ok(mut labels) = self.labels.write() {
            *labels.entry(label.to_string()).or_insert(0) += 1;
        }
    }

    /// Record a failed predict request
    pub fn record_failure(&self, latency: Duration, kind: &'static str) {
        self.predictions_failed.fetch_add(1, Ordering::Relaxed);
        self.record_latency(latency);

        if let Ok(mut by_kind) = self.failures_by_kind.write() {
            *by_kind.entry(kind).or_insert(0) += 1;
        }
    }

    fn record_latency(&self, latency: Duration) {
        if let Ok(mut times) = self.latencies.write() {
            times.push(latency.as_micros() as u64);
            // Keep only the most recent samples
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }
    }

    /// Latency statistics over the retained samples
    pub fn get_latency_stats(&self) -> LatencyStats {
        let times = match self.latencies.read() {
            Ok(times) => times,
            Err(_) => return LatencyStats::default(),
        };
        if times.is_empty() {
            return LatencyStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Requests per second since startup
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let total = self.predictions_served.load(Ordering::Relaxed)
            + self.predictions_failed.load(Ordering::Relaxed);
        if elapsed > 0.0 {
            total as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn get_failures_by_kind(&self) -> HashMap<&'static str, u64> {
        self.failures_by_kind
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn get_label_distribution(&self) -> HashMap<String, u64> {
        self.labels.read().map(|m| m.clone()).unwrap_or_default()
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let served = self.predictions_served.load(Ordering::Relaxed);
        let failed = self.predictions_failed.load(Ordering::Relaxed);
        let latency = self.get_latency_stats();

        info!(
            served,
            failed,
            throughput = format!("{:.2} req/s", self.get_throughput()),
            mean_us = latency.mean_us,
            p50_us = latency.p50_us,
            p95_us = latency.p95_us,
            p99_us = latency.p99_us,
            "Prediction metrics"
        );

        for (kind, count) in self.get_failures_by_kind() {
            info!(kind, count, "Failures by kind");
        }

        let mut labels: Vec<(String, u64)> = self.get_label_distribution().into_iter().collect();
        labels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        for (label, count) in labels {
            let pct = if served > 0 {
                count as f64 / served as f64 * 100.0
            } else {
                0.0
            };
            info!(label = %label, count, share = format!("{:.1}%", pct), "Recommended haircut");
        }
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Latency statistics
#[derive(Debug, Default)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Periodically logs a metrics summary
pub struct MetricsReporter {
    metrics: Arc<ServiceMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<ServiceMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        // First tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}
