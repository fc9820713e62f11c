//! Rotate-to-target and idle fidget state machine

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::settings::{CameraSettings, FidgetSettings};
use crate::stealth::Humanizer;

use super::angle::{bearing, degrees_to_units, distance, normalize, shortest_delta};
use super::fidget::{self, FidgetOutcome};
use super::motion::Motion;
use super::{CameraMutator, PositionSource, WorldPoint};

/// Cross-context cancellation flag for in-flight motions.
///
/// Checked once per poll, before any step is issued.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Request cancellation of every in-flight motion
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Everything the controller remembers between polls
#[derive(Debug, Clone, Default)]
pub struct CameraState {
    /// Last yaw commanded to the camera
    pub commanded_yaw: Option<i32>,
    /// Last pitch commanded to the camera
    pub commanded_pitch: Option<i32>,
    /// When the last rotation started
    pub last_movement: Option<Instant>,
    /// When the last fidget was performed
    pub last_fidget: Option<Instant>,
    /// When the next fidget is due
    pub next_fidget: Option<Instant>,
    yaw_motion: Option<Motion>,
    pitch_motion: Option<Motion>,
}

impl CameraState {
    /// In-flight yaw motion
    pub fn yaw_motion(&self) -> Option<&Motion> {
        self.yaw_motion.as_ref()
    }

    /// In-flight pitch motion
    pub fn pitch_motion(&self) -> Option<&Motion> {
        self.pitch_motion.as_ref()
    }
}

/// Camera motion controller
pub struct CameraController<C, P> {
    /// Host camera
    camera: C,
    /// Local player position
    positions: P,
    /// Random source owned by this controller
    humanizer: Humanizer,
    /// Rotation tuning
    settings: CameraSettings,
    /// Fidget tuning
    fidget: FidgetSettings,
    /// Scheduling and motion state
    state: CameraState,
    /// Cancellation flag shared with other contexts
    cancel: CancelHandle,
    /// Emit per-step debug lines
    debug: bool,
}

impl<C: CameraMutator, P: PositionSource> CameraController<C, P> {
    /// Create a controller driving `camera`
    pub fn new(
        camera: C,
        positions: P,
        humanizer: Humanizer,
        settings: CameraSettings,
        fidget: FidgetSettings,
    ) -> Self {
        Self {
            camera,
            positions,
            humanizer,
            settings,
            fidget,
            state: CameraState::default(),
            cancel: CancelHandle::default(),
            debug: false,
        }
    }

    /// Enable or disable per-step debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn positions_mut(&mut self) -> &mut P {
        &mut self.positions
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Handle that cancels in-flight motions from anywhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Whether a yaw or pitch motion is still in flight
    pub fn is_moving(&self) -> bool {
        self.state.yaw_motion.is_some() || self.state.pitch_motion.is_some()
    }

    /// Drop in-flight motions, leaving the camera where it was last put
    pub fn cancel(&mut self) {
        self.state.yaw_motion = None;
        self.state.pitch_motion = None;
    }

    /// Forget all scheduling and motion state, e.g. on session start/stop
    pub fn reset(&mut self) {
        self.state = CameraState::default();
        self.cancel.take();
    }

    /// Heading from the local player to `target`
    pub fn bearing_to(&self, target: WorldPoint) -> Option<i32> {
        self.positions
            .local_position()
            .map(|from| bearing(from, target))
    }

    /// Start a smoothed rotation towards `target`, aiming up to
    /// `randomness_degrees` off centre.
    ///
    /// Returns false when the camera is already close enough or the player
    /// position is unknown.
    pub fn rotate_to(&mut self, target: WorldPoint, randomness_degrees: f64, now: Instant) -> bool {
        let Some(base) = self.bearing_to(target) else {
            log::warn!("Cannot rotate: local position unknown");
            return false;
        };

        let spread = if randomness_degrees.is_finite() {
            degrees_to_units(randomness_degrees.abs())
        } else {
            0.0
        };
        let offset = if spread > 0.0 {
            self.humanizer.uniform(-spread, spread)
        } else {
            0.0
        };
        let target_yaw = normalize((base as f64 + offset).round() as i32);

        self.rotate_to_yaw(target_yaw, now)
    }

    /// Start a smoothed rotation to an explicit yaw
    pub fn rotate_to_yaw(&mut self, target_yaw: i32, now: Instant) -> bool {
        let current = self.camera.yaw();
        let delta = shortest_delta(current, target_yaw);

        if delta.abs() <= self.settings.rotation_threshold {
            if self.debug {
                log::debug!("rotation skipped: delta {} within threshold", delta);
            }
            return false;
        }

        self.start_rotation(current, delta, now);
        true
    }

    /// Make sure `target` is roughly in front of the camera.
    ///
    /// Returns true if it already was. Otherwise starts a rotation with a
    /// small aim offset and returns false.
    pub fn ensure_visible(&mut self, target: WorldPoint, now: Instant) -> bool {
        let Some(target_yaw) = self.bearing_to(target) else {
            log::warn!("Cannot check visibility: local position unknown");
            return false;
        };

        let limit = degrees_to_units(self.settings.visibility_degrees).round() as i32;
        if distance(self.camera.yaw(), target_yaw) <= limit {
            return true;
        }

        let randomness = self.settings.visibility_randomness_degrees;
        self.rotate_to(target, randomness, now);
        false
    }

    fn start_rotation(&mut self, current: i32, delta: i32, now: Instant) {
        let millis = self.humanizer.range_inclusive(
            self.settings.min_rotation_ms as i64,
            self.settings.max_rotation_ms as i64,
        ) as u64;
        let steps = (delta.unsigned_abs() / self.settings.units_per_step.max(1))
            .max(self.settings.min_steps)
            .min(self.settings.max_steps);

        let motion = Motion::yaw(current, delta, steps, Duration::from_millis(millis), now);
        if self.debug {
            log::debug!(
                "rotation {} -> {} ({:+}) in {} steps over {}ms",
                current,
                motion.target(),
                delta,
                steps,
                millis
            );
        }

        self.state.yaw_motion = Some(motion);
        self.state.last_movement = Some(now);
    }

    fn start_pitch(&mut self, target: i32, now: Instant) {
        let millis = self.humanizer.range_inclusive(
            self.fidget.pitch_min_ms as i64,
            self.fidget.pitch_max_ms as i64,
        ) as u64;
        let steps = self.humanizer.range_inclusive(
            self.fidget.pitch_min_steps as i64,
            self.fidget.pitch_max_steps as i64,
        ) as u32;

        let motion = Motion::pitch(
            self.camera.pitch(),
            target,
            (self.settings.pitch_min, self.settings.pitch_max),
            steps,
            Duration::from_millis(millis),
            now,
        );
        self.state.pitch_motion = Some(motion);
    }

    /// Advance in-flight motions to `now`.
    ///
    /// Issues at most one command per axis. Returns true while any motion
    /// is still in flight.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancel.take() {
            if self.debug {
                log::debug!("motion cancelled at yaw {:?}", self.state.commanded_yaw);
            }
            self.cancel();
            return false;
        }

        if let Some(motion) = self.state.yaw_motion.as_mut() {
            if let Some(step) = motion.advance(now) {
                self.camera.set_yaw(step.value);
                self.state.commanded_yaw = Some(step.value);

                let target = motion.target();
                if step.finished {
                    self.state.yaw_motion = None;
                } else if distance(self.camera.yaw(), target) <= self.settings.rotation_threshold {
                    // Early exit: one exact set to the target
                    self.camera.set_yaw(target);
                    self.state.commanded_yaw = Some(target);
                    self.state.yaw_motion = None;
                }
            }
        }

        if let Some(motion) = self.state.pitch_motion.as_mut() {
            if let Some(step) = motion.advance(now) {
                self.camera.set_pitch(step.value);
                self.state.commanded_pitch = Some(step.value);
                if step.finished {
                    self.state.pitch_motion = None;
                }
            }
        }

        self.is_moving()
    }

    /// Poll the idle fidget scheduler.
    ///
    /// The first call only schedules. Later calls perform a fidget once it
    /// is due, unless one happened within the cooldown.
    pub fn maybe_fidget(&mut self, mean_interval_secs: f64, now: Instant) -> FidgetOutcome {
        let Some(due) = self.state.next_fidget else {
            let first =
                fidget::sample_interval(&mut self.humanizer, &self.fidget, mean_interval_secs);
            let next = now + first;
            self.state.next_fidget = Some(next);
            return FidgetOutcome::Scheduled { next };
        };

        if now < due {
            return FidgetOutcome::Waiting { next: due };
        }

        if self.state.yaw_motion.is_some() {
            return FidgetOutcome::Busy;
        }

        let cooldown = fidget::seconds(self.fidget.cooldown_secs);
        if let Some(last) = self.state.last_fidget {
            if now.saturating_duration_since(last) < cooldown {
                let next = now + cooldown;
                self.state.next_fidget = Some(next);
                if self.debug {
                    log::debug!("fidget deferred: previous one was too recent");
                }
                return FidgetOutcome::Deferred { next };
            }
        }

        let yaw_delta = fidget::sample_yaw_delta(&mut self.humanizer, &self.fidget);
        let current = self.camera.yaw();
        self.start_rotation(current, yaw_delta, now);

        let pitch_target = if self.humanizer.chance(self.fidget.pitch_probability) {
            let target =
                fidget::sample_pitch_target(&mut self.humanizer, &self.settings, &self.fidget);
            self.start_pitch(target, now);
            Some(target)
        } else {
            None
        };

        let clustered = self.humanizer.chance(self.fidget.cluster_probability);
        let gap = if clustered {
            fidget::sample_cluster_interval(&mut self.humanizer, &self.fidget)
        } else {
            fidget::sample_interval(&mut self.humanizer, &self.fidget, mean_interval_secs)
        };
        let next = now + gap;

        self.state.last_fidget = Some(now);
        self.state.next_fidget = Some(next);

        if self.debug {
            log::debug!(
                "fidget: yaw {:+}, pitch {:?}, next in {:.1}s{}",
                yaw_delta,
                pitch_target,
                gap.as_secs_f64(),
                if clustered { " (clustered)" } else { "" }
            );
        }

        FidgetOutcome::Performed {
            yaw_delta,
            pitch_target,
            clustered,
            next,
        }
    }
}
