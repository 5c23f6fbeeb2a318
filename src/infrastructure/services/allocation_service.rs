//! Allocation service
//!
//! Maps samples to experiment buckets using the configurations published in
//! an [`ExperimentRegistry`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::bucket::{BucketDefinition, ExperimentConfig};
use crate::domain::error::AllocationError;
use crate::domain::sample::{compose_key, hash_to_point, BucketHasher, BucketedSample, Sample};
use crate::infrastructure::allocation::{ExperimentRegistry, Xxh32Hasher};
use crate::infrastructure::observability::{record_allocation, record_allocation_error};

/// Service assigning samples to buckets
///
/// Cheap to share between threads: all state lives in the registry, and
/// allocation only reads published snapshots.
#[derive(Debug)]
pub struct AllocationService<H: BucketHasher = Xxh32Hasher> {
    registry: Arc<ExperimentRegistry>,
    hasher: H,
}

impl AllocationService<Xxh32Hasher> {
    /// Create a service using the production hasher
    pub fn new(registry: Arc<ExperimentRegistry>) -> Self {
        Self::with_hasher(registry, Xxh32Hasher)
    }
}

impl<H: BucketHasher> AllocationService<H> {
    /// Create a service with a custom hasher
    pub fn with_hasher(registry: Arc<ExperimentRegistry>, hasher: H) -> Self {
        Self { registry, hasher }
    }

    /// Get the underlying registry
    pub fn registry(&self) -> &Arc<ExperimentRegistry> {
        &self.registry
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Publish a bucket configuration for an experiment
    pub fn configure(
        &self,
        experiment_id: &str,
        buckets: &[BucketDefinition],
    ) -> Result<Arc<ExperimentConfig>, AllocationError> {
        self.registry.configure(experiment_id, buckets)
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Assign a sample, identified by its ordered key parts, to a bucket
    pub fn allocate<S: AsRef<str>>(
        &self,
        experiment_id: &str,
        key_parts: &[S],
    ) -> Result<String, AllocationError> {
        let result = self.resolve_bucket(experiment_id, key_parts);

        match &result {
            Ok(bucket) => record_allocation(experiment_id, bucket),
            Err(e) => record_allocation_error(experiment_id, e.kind()),
        }

        result
    }

    /// Assign a sample and build the record the caller persists
    pub fn allocate_sample(&self, sample: &Sample) -> Result<BucketedSample, AllocationError> {
        let bucket = self.allocate(&sample.experiment_id, &sample.key_parts())?;
        Ok(BucketedSample::new(sample.clone(), bucket))
    }

    fn resolve_bucket<S: AsRef<str>>(
        &self,
        experiment_id: &str,
        key_parts: &[S],
    ) -> Result<String, AllocationError> {
        let key = compose_key(experiment_id, key_parts)?;
        let hash = self.hasher.hash(&key);
        let point = hash_to_point(hash);

        let slot_table = self.registry.get_slot_table(experiment_id)?;

        let bucket = match slot_table.find(point) {
            Some(slot) => slot.bucket_name(),
            None => {
                warn!(
                    experiment_id = %experiment_id,
                    point = point,
                    "No slot matched point, using last slot"
                );
                slot_table.bucket_for(point)
            }
        };

        debug!(
            experiment_id = %experiment_id,
            bucket = %bucket,
            hash = hash,
            "Allocated sample to bucket"
        );

        Ok(bucket.to_string())
    }
}
