//! Weighted-bucket delay sampler

use std::time::Duration;

use crate::stealth::Humanizer;

use super::DelayProfile;

/// Draws tick counts from [`DelayProfile`]s
pub struct DelaySampler {
    /// Random source owned by this sampler
    humanizer: Humanizer,
    /// Real-world length of one tick
    tick_duration_ms: u32,
    /// Emit per-draw debug lines
    debug: bool,
}

impl DelaySampler {
    /// Create a sampler for the given tick length
    pub fn new(humanizer: Humanizer, tick_duration_ms: u32) -> Self {
        Self {
            humanizer,
            tick_duration_ms: tick_duration_ms.max(1),
            debug: false,
        }
    }

    /// Enable or disable per-draw debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Tick length this sampler converts milliseconds with
    pub fn tick_duration_ms(&self) -> u32 {
        self.tick_duration_ms
    }

    /// Sample a delay in ticks. The result is always at least 1.
    pub fn sample(&mut self, profile: &DelayProfile) -> u32 {
        let roll = self.humanizer.below(profile.total_weight());
        let bucket = profile.select(roll);

        let raw = self
            .humanizer
            .range_inclusive(bucket.min as i64, bucket.max as i64) as u32;
        let ticks = bucket.to_ticks(raw, self.tick_duration_ms);

        if self.debug {
            log::debug!(
                "delay '{}': roll {} -> [{}, {}] {:?}, raw {} -> {} ticks",
                profile.name(),
                roll,
                bucket.min,
                bucket.max,
                bucket.unit,
                raw,
                ticks
            );
        }

        ticks
    }

    /// Sample a delay and express it as wall time
    pub fn sample_duration(&mut self, profile: &DelayProfile) -> Duration {
        let ticks = self.sample(profile);
        Duration::from_millis(ticks as u64 * self.tick_duration_ms as u64)
    }
}
