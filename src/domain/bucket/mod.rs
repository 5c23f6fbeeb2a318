//! Bucket domain module
//!
//! Bucket definitions, validation and normalization of percentage splits,
//! and the slot table used for point lookups.

mod entity;
mod slot_table;
mod validation;

pub use entity::{BucketDefinition, ExperimentConfig};
pub use slot_table::{Slot, SlotTable};
pub use validation::{
    normalize_buckets, percentage_sum, validate_buckets, BucketValidationError, FLOAT_TOLERANCE,
    TOTAL_PERCENTAGE,
};
