//! Cumulative threshold table used to map a point on the percentage scale to a bucket

use serde::Serialize;

use super::entity::BucketDefinition;
use super::validation::{BucketValidationError, FLOAT_TOLERANCE, TOTAL_PERCENTAGE};

/// Upper bound of one bucket's range on the 0-100 scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    bucket_name: String,
    upper_bound: f64,
}

impl Slot {
    /// Get the bucket name owning this slot
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Get the cumulative upper bound of this slot
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }
}

/// Slots sorted by bucket name, covering `[0, 100]` without gaps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotTable {
    slots: Vec<Slot>,
}

impl SlotTable {
    /// Build the table from normalized buckets
    ///
    /// Buckets are ordered by name, not by submission order, so that every
    /// instance assigns the same numeric range to the same bucket. The last
    /// bound is pinned to exactly 100.
    pub fn build(buckets: &[BucketDefinition]) -> Result<Self, BucketValidationError> {
        if buckets.is_empty() {
            return Err(BucketValidationError::NoBuckets);
        }

        let mut sorted: Vec<&BucketDefinition> = buckets.iter().collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));

        let mut threshold = 0.0;
        let mut slots: Vec<Slot> = sorted
            .into_iter()
            .map(|bucket| {
                threshold += bucket.percentage();
                Slot {
                    bucket_name: bucket.name().to_string(),
                    upper_bound: threshold,
                }
            })
            .collect();

        if let Some(last) = slots.last_mut() {
            last.upper_bound = TOTAL_PERCENTAGE;
        }

        Ok(Self { slots })
    }

    /// Get the slots in lookup order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false for a built table
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Binary search for the slot containing `point`
    ///
    /// A slot matches when `point <= upper_bound + ε` and the point lies
    /// above the previous slot's bound (`point > previous - ε`). Returns
    /// `None` only if no slot matches, which cannot happen for points in
    /// `[0, 100)`.
    pub fn find(&self, point: f64) -> Option<&Slot> {
        if self.slots.is_empty() {
            return None;
        }

        // Inclusive bounds: the probe sequence decides which slot wins for a
        // point inside the ε band of a boundary, so it must not change.
        let mut low = 0;
        let mut high = self.slots.len() - 1;

        while low <= high {
            let mid = (low + high) / 2;

            if point <= self.slots[mid].upper_bound + FLOAT_TOLERANCE {
                if mid == 0 || point > self.slots[mid - 1].upper_bound - FLOAT_TOLERANCE {
                    return Some(&self.slots[mid]);
                }
                high = mid - 1;
            } else {
                low = mid + 1;
            }
        }

        None
    }

    /// Resolve the bucket name for `point`, falling back to the last slot
    pub fn bucket_for(&self, point: f64) -> &str {
        match self.find(point).or_else(|| self.slots.last()) {
            Some(slot) => slot.bucket_name(),
            None => "",
        }
    }
}
