//! Weighted sub-ranges of a delay distribution

use serde::{Deserialize, Serialize};

use super::TimingError;

/// Unit a bucket's bounds are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayUnit {
    /// Whole game ticks
    Ticks,
    /// Wall-clock milliseconds, converted to ticks when sampled
    Milliseconds,
}

/// One weighted range inside a [`DelayProfile`](super::DelayProfile)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Inclusive lower bound
    pub min: u32,
    /// Inclusive upper bound
    pub max: u32,
    /// Relative selection weight
    pub weight: u32,
    /// Unit of `min` and `max`
    pub unit: DelayUnit,
}

impl Bucket {
    /// Bucket measured in ticks
    pub const fn ticks(min: u32, max: u32, weight: u32) -> Self {
        Self {
            min,
            max,
            weight,
            unit: DelayUnit::Ticks,
        }
    }

    /// Bucket measured in milliseconds
    pub const fn millis(min: u32, max: u32, weight: u32) -> Self {
        Self {
            min,
            max,
            weight,
            unit: DelayUnit::Milliseconds,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), TimingError> {
        if self.min > self.max {
            return Err(TimingError::InvertedRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Convert a raw value drawn from this bucket into ticks (always >= 1)
    pub fn to_ticks(&self, value: u32, tick_duration_ms: u32) -> u32 {
        match self.unit {
            DelayUnit::Ticks => value.max(1),
            DelayUnit::Milliseconds => {
                let ticks = (value as f64 / tick_duration_ms.max(1) as f64).round() as u32;
                ticks.max(1)
            }
        }
    }

    /// Tick range this bucket can produce after conversion
    pub fn tick_range(&self, tick_duration_ms: u32) -> (u32, u32) {
        (
            self.to_ticks(self.min, tick_duration_ms),
            self.to_ticks(self.max, tick_duration_ms),
        )
    }
}
