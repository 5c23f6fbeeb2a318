//! Bucket domain entities

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::slot_table::SlotTable;
use super::validation::{normalize_buckets, BucketValidationError};

// ============================================================================
// BucketDefinition
// ============================================================================

/// A named percentage share of an experiment's traffic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketDefinition {
    #[serde(alias = "bucket_name")]
    name: String,
    #[serde(alias = "percentage_distribution")]
    percentage: f64,
}

impl BucketDefinition {
    /// Create a new bucket definition
    pub fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }

    /// Get the bucket name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the percentage share (0-100)
    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

// ============================================================================
// ExperimentConfig
// ============================================================================

/// Published bucket configuration of one experiment
///
/// Never mutated after construction; reconfiguring an experiment replaces the
/// whole value.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    experiment_id: String,
    buckets: Vec<BucketDefinition>,
    slot_table: Arc<SlotTable>,
}

impl ExperimentConfig {
    /// Validate and normalize the buckets, then build the slot table
    pub fn new(
        experiment_id: impl Into<String>,
        buckets: &[BucketDefinition],
    ) -> Result<Self, BucketValidationError> {
        let buckets = normalize_buckets(buckets)?;
        let slot_table = SlotTable::build(&buckets)?;

        Ok(Self {
            experiment_id: experiment_id.into(),
            buckets,
            slot_table: Arc::new(slot_table),
        })
    }

    /// Get the experiment ID
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the normalized buckets in submission order
    pub fn buckets(&self) -> &[BucketDefinition] {
        &self.buckets
    }

    /// Get a shared handle to the cached slot table
    pub fn slot_table(&self) -> Arc<SlotTable> {
        Arc::clone(&self.slot_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_definition_accessors() {
        let bucket = BucketDefinition::new("control", 30.0);
        assert_eq!(bucket.name(), "control");
        assert_eq!(bucket.percentage(), 30.0);
    }

    #[test]
    fn test_bucket_definition_deserializes_legacy_field_names() {
        let json = r#"{"bucket_name": "control", "percentage_distribution": 30}"#;
        let bucket: BucketDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(bucket, BucketDefinition::new("control", 30.0));
    }

    #[test]
    fn test_bucket_definition_serialization() {
        let bucket = BucketDefinition::new("variant1", 50.0);
        let json = serde_json::to_value(&bucket).unwrap();
        assert_eq!(json["name"], "variant1");
        assert_eq!(json["percentage"], 50.0);
    }

    #[test]
    fn test_experiment_config_builds_slot_table() {
        let config = ExperimentConfig::new(
            "exp-1",
            &[
                BucketDefinition::new("variant2", 20.0),
                BucketDefinition::new("control", 30.0),
                BucketDefinition::new("variant1", 50.0),
            ],
        )
        .unwrap();

        assert_eq!(config.experiment_id(), "exp-1");
        assert_eq!(config.buckets()[0].name(), "variant2");

        let names: Vec<_> = config
            .slot_table()
            .slots()
            .iter()
            .map(|s| s.bucket_name().to_string())
            .collect();
        assert_eq!(names, vec!["control", "variant1", "variant2"]);
    }

    #[test]
    fn test_experiment_config_shares_slot_table() {
        let config =
            ExperimentConfig::new("exp-1", &[BucketDefinition::new("only", 100.0)]).unwrap();
        assert!(Arc::ptr_eq(&config.slot_table(), &config.slot_table()));
    }

    #[test]
    fn test_experiment_config_rejects_invalid_buckets() {
        let result = ExperimentConfig::new("exp-1", &[BucketDefinition::new("A", 90.0)]);
        assert_eq!(
            result.unwrap_err(),
            BucketValidationError::InvalidPercentageSum(90.0)
        );
    }
}
