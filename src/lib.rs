//! Bucket Allocator
//!
//! Deterministic assignment of sampled entities to A/B experiment buckets:
//! - Validation and normalization of percentage splits
//! - Name-ordered slot tables cached per experiment
//! - Seeded xxHash32 so every instance allocates identically
//! - Registry with lock-free reads, safe to share between threads

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    AllocationError, BucketDefinition, BucketValidationError, BucketedSample, ExperimentConfig,
    Sample, SlotTable,
};
pub use infrastructure::allocation::{ExperimentRegistry, Xxh32Hasher};
pub use infrastructure::services::AllocationService;

use std::sync::Arc;

use tracing::info;

/// Create a registry holding every experiment defined in the configuration
///
/// Fails on the first invalid experiment definition.
pub fn bootstrap_registry(config: &AppConfig) -> Result<Arc<ExperimentRegistry>, AllocationError> {
    let registry = Arc::new(ExperimentRegistry::new());

    for experiment in &config.experiments {
        registry.configure(&experiment.id, &experiment.buckets)?;
    }

    info!(
        experiments = config.experiments.len(),
        "Experiment registry initialized"
    );

    Ok(registry)
}

/// Create an allocation service backed by a freshly bootstrapped registry
pub fn create_allocation_service(config: &AppConfig) -> Result<AllocationService, AllocationError> {
    Ok(AllocationService::new(bootstrap_registry(config)?))
}
