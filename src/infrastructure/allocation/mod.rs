//! Infrastructure layer for bucket allocation
//!
//! Provides the production hasher and the in-memory experiment registry.

mod hashing;
mod registry;

pub use hashing::{Xxh32Hasher, BUCKET_HASH_SEED};
pub use registry::ExperimentRegistry;
