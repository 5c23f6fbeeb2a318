//! Domain layer - Core allocation types and rules

pub mod bucket;
pub mod error;
pub mod sample;

pub use bucket::{
    BucketDefinition, BucketValidationError, ExperimentConfig, Slot, SlotTable, FLOAT_TOLERANCE,
};
pub use error::AllocationError;
pub use sample::{BucketHasher, BucketedSample, Sample};
