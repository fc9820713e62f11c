//! Delay distribution sampling
//!
//! Turns hand-tuned weighted buckets into randomized wait durations
//! measured in game ticks.

pub mod bucket;
pub mod presets;
pub mod profile;
pub mod sampler;

pub use bucket::{Bucket, DelayUnit};
pub use profile::DelayProfile;
pub use sampler::DelaySampler;

/// Delay profile errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimingError {
    #[error("Delay profile '{0}' has no buckets")]
    EmptyProfile(String),
    #[error("Delay profile '{0}' has zero total weight")]
    ZeroTotalWeight(String),
    #[error("Bucket range is inverted: min {min} > max {max}")]
    InvertedRange { min: u32, max: u32 },
    #[error("Unknown delay profile: {0}")]
    UnknownProfile(String),
}
