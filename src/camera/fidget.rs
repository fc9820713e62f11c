//! Idle fidget draws
//!
//! Interval, magnitude and pitch-target distributions used by the idle
//! scheduler in [`CameraController::maybe_fidget`](super::CameraController::maybe_fidget).

use std::time::{Duration, Instant};

use crate::config::settings::{CameraSettings, FidgetSettings};
use crate::stealth::Humanizer;

use super::angle::HALF_WRAP;

/// What a fidget poll did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FidgetOutcome {
    /// First poll of the session; the first fidget is now scheduled
    Scheduled { next: Instant },
    /// Not due yet
    Waiting { next: Instant },
    /// Due, but a rotation is still in flight; retried on a later poll
    Busy,
    /// Due too soon after the previous fidget; pushed back by the cooldown
    Deferred { next: Instant },
    /// A fidget rotation was started
    Performed {
        /// Signed yaw change in cyclic units
        yaw_delta: i32,
        /// Pitch target, if the pitch is also moving
        pitch_target: Option<i32>,
        /// Whether the follow-up was scheduled as a quick cluster
        clustered: bool,
        /// When the next fidget is due
        next: Instant,
    },
}

impl FidgetOutcome {
    pub fn is_performed(&self) -> bool {
        matches!(self, FidgetOutcome::Performed { .. })
    }
}

/// Longest gap the scheduler will ever produce (one day)
pub const MAX_INTERVAL_SECS: f64 = 86_400.0;

/// Seconds as a [`Duration`]. NaN and negative values give zero, and the
/// result never exceeds [`MAX_INTERVAL_SECS`].
pub fn seconds(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(secs.min(MAX_INTERVAL_SECS))
}

/// Gaussian gap around `mean_secs`, clamped to `[min_interval, 3 * mean]`.
///
/// A NaN mean falls back to the configured one.
pub fn sample_interval(
    humanizer: &mut Humanizer,
    settings: &FidgetSettings,
    mean_secs: f64,
) -> Duration {
    let mean = if mean_secs.is_nan() {
        settings.mean_interval_secs
    } else {
        mean_secs
    };
    let mean = mean.max(0.0).min(MAX_INTERVAL_SECS);
    let low = settings.min_interval_secs;
    let high = (3.0 * mean).max(low);
    let secs = humanizer.gaussian(mean, mean / 3.0).max(low).min(high);
    seconds(secs)
}

/// Short follow-up gap used when fidgets cluster
pub fn sample_cluster_interval(humanizer: &mut Humanizer, settings: &FidgetSettings) -> Duration {
    seconds(humanizer.uniform(settings.cluster_min_secs, settings.cluster_max_secs))
}

/// Signed yaw change: random direction, `min(cap, |N(0, sd)| + base)` units,
/// never more than half a turn
pub fn sample_yaw_delta(humanizer: &mut Humanizer, settings: &FidgetSettings) -> i32 {
    let magnitude = (humanizer.gaussian(0.0, settings.magnitude_sd).abs() + settings.magnitude_base)
        .min(settings.magnitude_cap)
        .max(0.0)
        .min(HALF_WRAP as f64)
        .round() as i32;
    humanizer.sign() * magnitude
}

/// Pitch target biased towards the middle of the valid range
pub fn sample_pitch_target(
    humanizer: &mut Humanizer,
    camera: &CameraSettings,
    settings: &FidgetSettings,
) -> i32 {
    let (min, max) = (camera.pitch_min, camera.pitch_max);
    let span = max - min;
    let roll = humanizer.unit();

    let (low, high) = if roll < settings.pitch_mid_probability {
        (min + span / 3, max - span / 3)
    } else if roll < settings.pitch_mid_probability + settings.pitch_high_probability {
        (max - span / 5, max)
    } else {
        (min, min + span / 5)
    };

    humanizer.range_inclusive(low as i64, high as i64) as i32
}
