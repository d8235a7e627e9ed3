use crate::utils::validation::{validate_bin_breaks, ConfigError};

/// Maps variant lengths onto an ordered set of size buckets.
///
/// Boundaries `b1 < b2 < ... < bn` define the buckets `[0, b1)`, `[b1, b2)`, ...,
/// `[bn, +inf)`. With no boundaries there is a single unbounded bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LengthBinner {
    breaks: Vec<u64>,
}

impl LengthBinner {
    /// Create a binner from strictly ascending boundaries
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BinBreaksNotAscending` if the boundaries are not strictly
    /// increasing.
    pub fn new(breaks: Vec<u64>) -> Result<Self, ConfigError> {
        validate_bin_breaks(&breaks)?;
        Ok(Self { breaks })
    }

    /// Boundaries this binner was built from
    #[must_use]
    pub fn breaks(&self) -> &[u64] {
        &self.breaks
    }

    /// Total number of buckets, including the final unbounded one
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.breaks.len() + 1
    }

    /// Index of the bucket holding `length`: the first boundary strictly greater than
    /// `length`, or the unbounded bucket
    #[must_use]
    pub fn bucket_of(&self, length: u64) -> usize {
        self.breaks.partition_point(|&b| b <= length)
    }

    /// Inclusive lower and exclusive upper bound of `bucket`; `None` upper means unbounded
    #[must_use]
    pub fn bounds(&self, bucket: usize) -> (u64, Option<u64>) {
        let lower = if bucket == 0 {
            0
        } else {
            self.breaks.get(bucket - 1).copied().unwrap_or(0)
        };
        (lower, self.breaks.get(bucket).copied())
    }
}
