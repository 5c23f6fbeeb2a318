//! Prometheus metrics infrastructure

use std::sync::Arc;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;

/// Prometheus metrics handle for rendering the exposition text
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics in Prometheus text format
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
///
/// Returns `None` when disabled or when a recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            register_default_metrics();

            tracing::info!("Prometheus metrics initialized");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

fn register_default_metrics() {
    gauge!("bucket_allocator_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a successful allocation
pub fn record_allocation(experiment_id: &str, bucket: &str) {
    counter!("bucket_allocations_total", &allocation_labels(experiment_id, bucket)).increment(1);
}

/// Record a failed allocation
pub fn record_allocation_error(experiment_id: &str, kind: &str) {
    let labels = [
        ("experiment", experiment_id.to_string()),
        ("kind", kind.to_string()),
    ];

    counter!("bucket_allocation_errors_total", &labels).increment(1);
}

/// Record the outcome of a configuration attempt ("published" or "rejected")
pub fn record_configuration(experiment_id: &str, status: &str) {
    let labels = [
        ("experiment", experiment_id.to_string()),
        ("status", status.to_string()),
    ];

    counter!("experiment_configurations_total", &labels).increment(1);
}

fn allocation_labels(experiment_id: &str, bucket: &str) -> [(&'static str, String); 2] {
    [
        ("experiment", experiment_id.to_string()),
        ("bucket", bucket.to_string()),
    ]
}
