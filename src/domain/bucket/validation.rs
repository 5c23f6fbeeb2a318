//! Bucket configuration validation and normalization

use std::collections::HashSet;

use thiserror::Error;

use super::entity::BucketDefinition;

/// Tolerance used for every floating point comparison on the percentage scale
pub const FLOAT_TOLERANCE: f64 = 1e-6;

/// Percentages of one experiment must add up to this value
pub const TOTAL_PERCENTAGE: f64 = 100.0;

/// Validation errors for bucket configurations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BucketValidationError {
    #[error("At least one bucket must be provided")]
    NoBuckets,

    #[error("Bucket name cannot be empty")]
    EmptyBucketName,

    #[error("Duplicate bucket name: '{0}'")]
    DuplicateBucketName(String),

    #[error("Bucket '{name}' has invalid percentage {percentage}, expected a value between 0 and 100")]
    InvalidPercentage { name: String, percentage: f64 },

    #[error("Bucket percentages must sum to 100 (got {0})")]
    InvalidPercentageSum(f64),
}

/// Sum the percentages in submission order
pub fn percentage_sum(buckets: &[BucketDefinition]) -> f64 {
    buckets.iter().map(BucketDefinition::percentage).sum()
}

/// Validate a bucket configuration without modifying it
pub fn validate_buckets(buckets: &[BucketDefinition]) -> Result<(), BucketValidationError> {
    if buckets.is_empty() {
        return Err(BucketValidationError::NoBuckets);
    }

    let mut seen = HashSet::with_capacity(buckets.len());

    for bucket in buckets {
        if bucket.name().is_empty() {
            return Err(BucketValidationError::EmptyBucketName);
        }

        if !seen.insert(bucket.name()) {
            return Err(BucketValidationError::DuplicateBucketName(
                bucket.name().to_string(),
            ));
        }

        let percentage = bucket.percentage();

        // NaN fails this check as well
        if !(0.0..=TOTAL_PERCENTAGE).contains(&percentage) {
            return Err(BucketValidationError::InvalidPercentage {
                name: bucket.name().to_string(),
                percentage,
            });
        }
    }

    let total = percentage_sum(buckets);

    if (total - TOTAL_PERCENTAGE).abs() > FLOAT_TOLERANCE {
        return Err(BucketValidationError::InvalidPercentageSum(total));
    }

    Ok(())
}

/// Validate the buckets and return a copy whose percentages sum to exactly 100
///
/// Any residual within [`FLOAT_TOLERANCE`] is added to the last bucket in
/// submission order. The remaining buckets are returned untouched and in the
/// same order.
pub fn normalize_buckets(
    buckets: &[BucketDefinition],
) -> Result<Vec<BucketDefinition>, BucketValidationError> {
    validate_buckets(buckets)?;

    let mut normalized = buckets.to_vec();
    let total = percentage_sum(&normalized);

    if total != TOTAL_PERCENTAGE {
        if let Some((last, rest)) = normalized.split_last_mut() {
            // Equals last + (100 - total), taken from the other buckets so the
            // stored percentages add up to exactly 100.0
            let adjusted = TOTAL_PERCENTAGE - percentage_sum(rest);
            *last = BucketDefinition::new(last.name(), adjusted);
        }
    }

    Ok(normalized)
}
