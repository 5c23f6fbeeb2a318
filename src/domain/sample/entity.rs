//! Sample entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entity/value pair to be assigned to a bucket of an experiment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub experiment_id: String,
    /// Kind of entity being sampled (e.g. "user")
    pub sampled_entity: String,
    /// Value identifying the entity (e.g. a user ID)
    pub sampled_value: String,
}

impl Sample {
    /// Create a new sample
    pub fn new(
        experiment_id: impl Into<String>,
        sampled_entity: impl Into<String>,
        sampled_value: impl Into<String>,
    ) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            sampled_entity: sampled_entity.into(),
            sampled_value: sampled_value.into(),
        }
    }

    /// Key parts in hashing order: entity first, then value
    pub fn key_parts(&self) -> [&str; 2] {
        [self.sampled_entity.as_str(), self.sampled_value.as_str()]
    }
}

/// Immutable record of an allocation decision
///
/// Produced by the allocator and persisted by the caller. Completing a sample
/// yields a new record instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedSample {
    experiment_id: String,
    sampled_entity: String,
    sampled_value: String,
    allocated_bucket: String,
    complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BucketedSample {
    /// Record that `sample` was allocated to `bucket`
    pub fn new(sample: Sample, allocated_bucket: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            experiment_id: sample.experiment_id,
            sampled_entity: sample.sampled_entity,
            sampled_value: sample.sampled_value,
            allocated_bucket: allocated_bucket.into(),
            complete: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    pub fn sampled_entity(&self) -> &str {
        &self.sampled_entity
    }

    pub fn sampled_value(&self) -> &str {
        &self.sampled_value
    }

    pub fn allocated_bucket(&self) -> &str {
        &self.allocated_bucket
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Return a completed copy of this record
    ///
    /// Completing an already completed sample keeps its original completion
    /// time.
    pub fn mark_complete(&self) -> Self {
        if self.complete {
            return self.clone();
        }

        let now = Utc::now();
        Self {
            complete: true,
            completed_at: Some(now),
            updated_at: now,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_key_parts_order() {
        let sample = Sample::new("exp-1", "user", "user123");
        assert_eq!(sample.key_parts(), ["user", "user123"]);
    }

    #[test]
    fn test_new_bucketed_sample() {
        let record = BucketedSample::new(Sample::new("exp-1", "user", "user123"), "control");

        assert_eq!(record.experiment_id(), "exp-1");
        assert_eq!(record.sampled_entity(), "user");
        assert_eq!(record.sampled_value(), "user123");
        assert_eq!(record.allocated_bucket(), "control");
        assert!(!record.is_complete());
        assert!(record.completed_at().is_none());
        assert_eq!(record.created_at(), record.updated_at());
    }

    #[test]
    fn test_mark_complete_returns_new_record() {
        let record = BucketedSample::new(Sample::new("exp-1", "user", "user123"), "control");
        let completed = record.mark_complete();

        assert!(!record.is_complete());
        assert!(completed.is_complete());
        assert!(completed.completed_at().is_some());
        assert_eq!(completed.allocated_bucket(), "control");
        assert_eq!(completed.created_at(), record.created_at());
        assert!(completed.updated_at() >= record.updated_at());
    }

    #[test]
    fn test_mark_complete_is_idempotent() {
        let completed = BucketedSample::new(Sample::new("exp-1", "user", "u1"), "A").mark_complete();
        let again = completed.mark_complete();
        assert_eq!(again, completed);
    }

    #[test]
    fn test_serialization_skips_missing_completion() {
        let record = BucketedSample::new(Sample::new("exp-1", "user", "u1"), "A");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["allocated_bucket"], "A");
        assert_eq!(json["complete"], false);
        assert!(json.get("completed_at").is_none());
    }
}
