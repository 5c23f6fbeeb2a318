//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    init_metrics, record_allocation, record_allocation_error, record_configuration,
    PrometheusMetrics,
};
