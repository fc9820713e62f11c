//! Named weighted delay distributions

use serde::{Deserialize, Serialize};

use super::{Bucket, TimingError};

/// Ordered set of weighted buckets. Always has a positive total weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile", into = "RawProfile")]
pub struct DelayProfile {
    name: String,
    buckets: Vec<Bucket>,
    total_weight: u64,
}

/// Unvalidated wire form of a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProfile {
    name: String,
    buckets: Vec<Bucket>,
}

impl TryFrom<RawProfile> for DelayProfile {
    type Error = TimingError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        DelayProfile::new(raw.name, raw.buckets)
    }
}

impl From<DelayProfile> for RawProfile {
    fn from(profile: DelayProfile) -> Self {
        Self {
            name: profile.name,
            buckets: profile.buckets,
        }
    }
}

impl DelayProfile {
    /// Build a profile, rejecting empty or zero-weight bucket lists
    pub fn new(name: impl Into<String>, buckets: Vec<Bucket>) -> Result<Self, TimingError> {
        let name = name.into();

        if buckets.is_empty() {
            return Err(TimingError::EmptyProfile(name));
        }

        for bucket in &buckets {
            bucket.validate()?;
        }

        let total_weight: u64 = buckets.iter().map(|b| b.weight as u64).sum();
        if total_weight == 0 {
            return Err(TimingError::ZeroTotalWeight(name));
        }

        Ok(Self {
            name,
            buckets,
            total_weight,
        })
    }

    /// Profile name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Buckets in scan order
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Sum of all bucket weights
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Selection probability of the bucket at `index`
    pub fn probability(&self, index: usize) -> f64 {
        self.buckets
            .get(index)
            .map(|b| b.weight as f64 / self.total_weight as f64)
            .unwrap_or(0.0)
    }

    /// Bucket whose cumulative weight first exceeds `roll`.
    ///
    /// Falls back to the last bucket if the scan runs off the end.
    pub fn select(&self, roll: u64) -> &Bucket {
        let mut cumulative = 0u64;
        for bucket in &self.buckets {
            cumulative += bucket.weight as u64;
            if roll < cumulative {
                return bucket;
            }
        }

        // Non-empty is guaranteed by construction
        &self.buckets[self.buckets.len() - 1]
    }
}
