//! Seeded xxHash32 for bucket allocation
//!
//! Ensures the same sample key always hashes to the same value on every
//! instance of the engine.

use xxhash_rust::xxh32::xxh32;

use crate::domain::sample::BucketHasher;

/// Seed shared by every deployed instance; changing it reshuffles all allocations
pub const BUCKET_HASH_SEED: u32 = 42;

/// Production hasher: xxHash32 with [`BUCKET_HASH_SEED`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh32Hasher;

impl BucketHasher for Xxh32Hasher {
    fn hash(&self, key: &str) -> u32 {
        xxh32(key.as_bytes(), BUCKET_HASH_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::hash_to_point;

    #[test]
    fn test_hash_same_input() {
        let hash1 = Xxh32Hasher.hash("exp-1:user:user123");
        let hash2 = Xxh32Hasher.hash("exp-1:user:user123");
        assert_eq!(hash1, hash2, "Same inputs should produce same hash");
    }

    #[test]
    fn test_hash_uses_fixed_seed() {
        let key = "exp-1:user:user123";
        assert_eq!(Xxh32Hasher.hash(key), xxh32(key.as_bytes(), 42));
        assert_ne!(Xxh32Hasher.hash(key), xxh32(key.as_bytes(), 0));
    }

    #[test]
    fn test_independent_instances_agree() {
        let a = Xxh32Hasher;
        let b = Xxh32Hasher::default();

        for i in 0..100 {
            let key = format!("exp-1:user:{}", i);
            assert_eq!(a.hash(&key), b.hash(&key));
        }
    }

    #[test]
    fn test_hash_distribution() {
        // Project onto ten equal ranges of the percentage scale
        let mut buckets = [0u32; 10];

        for i in 0..10_000 {
            let hash = Xxh32Hasher.hash(&format!("exp-1:user:{}", i));
            let point = hash_to_point(hash);
            buckets[(point / 10.0) as usize] += 1;
        }

        for count in buckets {
            assert!(count > 850, "Range has too few items: {}", count);
            assert!(count < 1150, "Range has too many items: {}", count);
        }
    }
}
