//! In-memory registry of published experiment configurations

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

use crate::domain::bucket::{BucketDefinition, ExperimentConfig, SlotTable};
use crate::domain::error::AllocationError;
use crate::infrastructure::observability::record_configuration;

type ConfigMap = HashMap<String, Arc<ExperimentConfig>>;

/// Thread-safe store of the current configuration of every experiment
///
/// The map of configurations is published as one immutable snapshot and
/// replaced copy-on-write. Readers load the current snapshot without taking
/// any lock. Writers for the same experiment serialize on a per-experiment
/// mutex that only lives while a write holds or waits on it, so configuring
/// one experiment never waits on another.
#[derive(Debug)]
pub struct ExperimentRegistry {
    published: ArcSwap<ConfigMap>,
    write_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Default for ExperimentRegistry {
    fn default() -> Self {
        Self {
            published: ArcSwap::from_pointee(HashMap::new()),
            write_locks: Mutex::new(HashMap::new()),
        }
    }
}

impl ExperimentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, normalize and publish a bucket configuration
    ///
    /// Replaces any previous configuration of the experiment. On failure the
    /// previous configuration stays in place.
    pub fn configure(
        &self,
        experiment_id: &str,
        buckets: &[BucketDefinition],
    ) -> Result<Arc<ExperimentConfig>, AllocationError> {
        if experiment_id.is_empty() {
            return Err(AllocationError::invalid_input("experiment ID cannot be empty"));
        }

        let write_lock = self.write_lock_for(experiment_id)?;
        let result = match lock_experiment(&write_lock) {
            Ok(_guard) => self.publish(experiment_id, buckets),
            Err(e) => Err(e),
        };

        drop(write_lock);
        self.release_write_lock(experiment_id)?;

        result
    }

    /// Get the current configuration snapshot of an experiment
    pub fn get_config(&self, experiment_id: &str) -> Result<Arc<ExperimentConfig>, AllocationError> {
        self.published
            .load()
            .get(experiment_id)
            .cloned()
            .ok_or_else(|| AllocationError::not_configured(experiment_id))
    }

    /// Get the cached slot table of an experiment
    pub fn get_slot_table(&self, experiment_id: &str) -> Result<Arc<SlotTable>, AllocationError> {
        Ok(self.get_config(experiment_id)?.slot_table())
    }

    /// Check if an experiment has a published configuration
    pub fn contains(&self, experiment_id: &str) -> bool {
        self.published.load().contains_key(experiment_id)
    }

    /// IDs of all configured experiments, sorted
    pub fn experiment_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.published.load().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of configured experiments
    pub fn len(&self) -> usize {
        self.published.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the configuration of an experiment
    ///
    /// Waits for an in-flight `configure` of the same experiment.
    pub fn remove(&self, experiment_id: &str) -> Result<bool, AllocationError> {
        let write_lock = self.write_lock_for(experiment_id)?;
        let result = match lock_experiment(&write_lock) {
            Ok(_guard) => Ok(self.unpublish(experiment_id)),
            Err(e) => Err(e),
        };

        drop(write_lock);
        self.release_write_lock(experiment_id)?;

        let removed = result?;

        if removed {
            info!(experiment_id = %experiment_id, "Experiment configuration removed");
        }

        Ok(removed)
    }

    /// Build the configuration and swap it into the published map
    ///
    /// Caller holds the experiment's write lock.
    fn publish(
        &self,
        experiment_id: &str,
        buckets: &[BucketDefinition],
    ) -> Result<Arc<ExperimentConfig>, AllocationError> {
        debug!(experiment_id = %experiment_id, buckets = buckets.len(), "Configuring experiment");

        let config = match ExperimentConfig::new(experiment_id, buckets) {
            Ok(config) => Arc::new(config),
            Err(e) => {
                warn!(experiment_id = %experiment_id, error = %e, "Rejected bucket configuration");
                record_configuration(experiment_id, "rejected");
                return Err(AllocationError::invalid_configuration(experiment_id, e));
            }
        };

        self.published.rcu(|current| {
            let mut next = ConfigMap::clone(current);
            next.insert(experiment_id.to_string(), Arc::clone(&config));
            next
        });

        info!(
            experiment_id = %experiment_id,
            buckets = config.buckets().len(),
            "Experiment configuration published"
        );
        record_configuration(experiment_id, "published");

        Ok(config)
    }

    /// Caller holds the experiment's write lock.
    fn unpublish(&self, experiment_id: &str) -> bool {
        if !self.contains(experiment_id) {
            return false;
        }

        self.published.rcu(|current| {
            let mut next = ConfigMap::clone(current);
            next.remove(experiment_id);
            next
        });

        true
    }

    /// Fetch or lazily create the per-experiment write lock
    ///
    /// The registry-wide mutex is held only for the lookup/insert.
    fn write_lock_for(&self, experiment_id: &str) -> Result<Arc<Mutex<()>>, AllocationError> {
        let mut locks = self.lock_table()?;

        Ok(Arc::clone(
            locks
                .entry(experiment_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        ))
    }

    /// Drop the per-experiment write lock once no writer holds or waits on it
    ///
    /// The caller must have dropped its own handle first.
    fn release_write_lock(&self, experiment_id: &str) -> Result<(), AllocationError> {
        let mut locks = self.lock_table()?;

        if locks
            .get(experiment_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(experiment_id);
        }

        Ok(())
    }

    fn lock_table(&self) -> Result<MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>>, AllocationError> {
        self.write_locks.lock().map_err(|e| {
            AllocationError::internal(format!("Failed to acquire registry lock: {}", e))
        })
    }
}

fn lock_experiment(lock: &Mutex<()>) -> Result<MutexGuard<'_, ()>, AllocationError> {
    lock.lock().map_err(|e| {
        AllocationError::internal(format!("Failed to acquire experiment lock: {}", e))
    })
}
