//! One-to-many index over a dense key domain.
//!
//! Groups the positions `0..n` by a key function `key(i) -> Option<usize>`
//! into a flat array partitioned by per-key offsets. Used for the call tree,
//! where the key of a stack is its prefix and `None` marks a root.
//!
//! # Performance
//!
//! - Construction: two passes over the input plus a prefix sum over the keys, O(n + k)
//! - `children_of()`: O(1), returns a slice into the flat array

/// Maps every key in `0..key_count` (plus the `None` sentinel) to the
/// positions whose key it is, in ascending position order.
#[derive(Debug, Clone, Default)]
pub struct OneToManyIndex {
    /// `offsets[k]..offsets[k + 1]` is the slice of `values` for key `k`.
    /// Key `key_count` holds the `None` bucket.
    offsets: Vec<usize>,
    values: Vec<usize>,
}

impl OneToManyIndex {
    /// Build the index from the key of every position.
    ///
    /// Positions whose key is `>= key_count` are left out.
    pub fn new(key_count: usize, keys: &[Option<usize>]) -> Self {
        let none_bucket = key_count;
        let bucket = |key: Option<usize>| match key {
            None => Some(none_bucket),
            Some(k) if k < key_count => Some(k),
            Some(_) => None,
        };

        // Pass 1: count per bucket, shifted by one for the prefix sum.
        let mut offsets = vec![0usize; key_count + 2];
        for &key in keys {
            if let Some(b) = bucket(key) {
                offsets[b + 1] += 1;
            }
        }
        for i in 1..offsets.len() {
            offsets[i] += offsets[i - 1];
        }

        // Pass 2: place positions at the cursor of their bucket.
        let mut cursor = offsets.clone();
        let mut values = vec![0usize; offsets[key_count + 1]];
        for (position, &key) in keys.iter().enumerate() {
            if let Some(b) = bucket(key) {
                values[cursor[b]] = position;
                cursor[b] += 1;
            }
        }

        Self { offsets, values }
    }

    /// Number of keys, not counting the `None` sentinel.
    pub fn key_count(&self) -> usize {
        self.offsets.len().saturating_sub(2)
    }

    /// Positions whose key is `key`; empty for unknown keys.
    pub fn children_of(&self, key: usize) -> &[usize] {
        if key >= self.key_count() {
            return &[];
        }
        self.bucket(key)
    }

    /// Positions whose key is `None`.
    pub fn roots(&self) -> &[usize] {
        if self.offsets.is_empty() {
            return &[];
        }
        self.bucket(self.key_count())
    }

    fn bucket(&self, b: usize) -> &[usize] {
        &self.values[self.offsets[b]..self.offsets[b + 1]]
    }
}
