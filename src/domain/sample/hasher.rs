//! Hashing seam for bucket allocation

use crate::domain::bucket::TOTAL_PERCENTAGE;

#[cfg(test)]
use mockall::automock;

/// Size of the 32-bit hash space
pub const HASH_SPACE: f64 = 4_294_967_296.0;

/// Maps a composite sample key to a 32-bit hash
///
/// Implementations must be stable across processes and releases: changing
/// the output for any key reshuffles live allocations.
#[cfg_attr(test, automock)]
pub trait BucketHasher: Send + Sync {
    fn hash(&self, key: &str) -> u32;
}

/// Project a hash value onto `[0, 100)`
pub fn hash_to_point(hash: u32) -> f64 {
    (f64::from(hash) / HASH_SPACE) * TOTAL_PERCENTAGE
}
