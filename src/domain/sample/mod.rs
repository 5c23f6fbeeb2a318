//! Sample domain module
//!
//! Sampled entities, their composite hash keys and the allocation records
//! handed back to callers for persistence.

mod entity;
mod hasher;
mod key;

pub use entity::{BucketedSample, Sample};
pub use hasher::{hash_to_point, BucketHasher, HASH_SPACE};
pub use key::{compose_key, KEY_SEPARATOR};

#[cfg(test)]
pub use hasher::MockBucketHasher;
