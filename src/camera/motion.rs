//! Incremental camera motion
//!
//! A [`Motion`] is a planned, stepped interpolation from a start value to a
//! target. It never sleeps: the owner calls [`Motion::advance`] whenever it
//! polls, and the motion jumps to the latest step whose deadline has passed.

use std::time::{Duration, Instant};

use super::angle::normalize;

/// Which camera axis a motion drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Cyclic heading, wraps modulo 2048
    Yaw,
    /// Bounded tilt, clamped to a range
    Pitch { min: i32, max: i32 },
}

/// One commanded value produced by [`Motion::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionStep {
    /// Value to command on the axis
    pub value: i32,
    /// Step index reached (1-based)
    pub step: u32,
    /// Whether this was the last step
    pub finished: bool,
}

/// Stepped interpolation state
#[derive(Debug, Clone)]
pub struct Motion {
    axis: Axis,
    start: i32,
    delta: i32,
    target: i32,
    steps: u32,
    completed: u32,
    interval: Duration,
    started_at: Instant,
}

impl Motion {
    /// Yaw motion rotating by `delta` units over `duration`
    pub fn yaw(start: i32, delta: i32, steps: u32, duration: Duration, now: Instant) -> Self {
        let steps = steps.max(1);
        Self {
            axis: Axis::Yaw,
            start,
            delta,
            target: normalize(start + delta),
            steps,
            completed: 0,
            interval: duration / steps,
            started_at: now,
        }
    }

    /// Pitch motion from `start` to `target`, clamped to `[min, max]`
    pub fn pitch(
        start: i32,
        target: i32,
        (min, max): (i32, i32),
        steps: u32,
        duration: Duration,
        now: Instant,
    ) -> Self {
        let steps = steps.max(1);
        let start = start.clamp(min, max);
        let target = target.clamp(min, max);
        Self {
            axis: Axis::Pitch { min, max },
            start,
            delta: target - start,
            target,
            steps,
            completed: 0,
            interval: duration / steps,
            started_at: now,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Final value of the motion
    pub fn target(&self) -> i32 {
        self.target
    }

    /// Total planned steps
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Steps already issued
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Steps still to issue
    pub fn remaining(&self) -> u32 {
        self.steps - self.completed
    }

    /// Time between two steps
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.steps
    }

    /// Interpolated value after `step` of `steps`
    pub fn value_at(&self, step: u32) -> i32 {
        let step = step.min(self.steps);
        let offset = (self.delta as i64 * step as i64 / self.steps as i64) as i32;
        let value = self.start + offset;
        match self.axis {
            Axis::Yaw => normalize(value),
            Axis::Pitch { min, max } => value.clamp(min, max),
        }
    }

    /// Latest step whose deadline has passed at `now`
    pub fn due_step(&self, now: Instant) -> u32 {
        if self.interval.is_zero() {
            return self.steps;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_nanos();
        let due = elapsed / self.interval.as_nanos();
        due.min(self.steps as u128) as u32
    }

    /// Move to the latest due step, if any new step is due
    pub fn advance(&mut self, now: Instant) -> Option<MotionStep> {
        let due = self.due_step(now);
        if due <= self.completed {
            return None;
        }

        self.completed = due;
        Some(MotionStep {
            value: self.value_at(due),
            step: due,
            finished: self.is_finished(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_motion_wraps() {
        let now = Instant::now();
        let motion = Motion::yaw(2000, 100, 4, Duration::from_millis(400), now);
        assert_eq!(motion.target(), 52);
        assert_eq!(motion.value_at(1), 2025);
        assert_eq!(motion.value_at(2), 2);
        assert_eq!(motion.value_at(4), 52);
    }

    #[test]
    fn test_negative_yaw_motion() {
        let now = Instant::now();
        let motion = Motion::yaw(10, -30, 3, Duration::from_millis(300), now);
        assert_eq!(motion.target(), 2028);
        assert_eq!(motion.value_at(1), 0);
        assert_eq!(motion.value_at(3), 2028);
    }

    #[test]
    fn test_advance_one_step_per_interval() {
        let start = Instant::now();
        let mut motion = Motion::yaw(0, 500, 5, Duration::from_millis(500), start);
        assert_eq!(motion.interval(), Duration::from_millis(100));

        assert!(motion.advance(start).is_none());
        assert!(motion.advance(start + Duration::from_millis(50)).is_none());

        let step = motion.advance(start + Duration::from_millis(100)).unwrap();
        assert_eq!((step.value, step.step, step.finished), (100, 1, false));

        // Repeated poll inside the same interval does nothing
        assert!(motion.advance(start + Duration::from_millis(150)).is_none());
    }

    #[test]
    fn test_advance_catches_up() {
        let start = Instant::now();
        let mut motion = Motion::yaw(0, 500, 5, Duration::from_millis(500), start);

        let step = motion.advance(start + Duration::from_millis(320)).unwrap();
        assert_eq!(step.step, 3);
        assert_eq!(motion.remaining(), 2);

        let last = motion.advance(start + Duration::from_secs(5)).unwrap();
        assert_eq!((last.value, last.finished), (500, true));
        assert!(motion.advance(start + Duration::from_secs(6)).is_none());
    }

    #[test]
    fn test_pitch_clamped() {
        let now = Instant::now();
        let motion = Motion::pitch(100, 500, (128, 383), 5, Duration::from_millis(250), now);
        assert_eq!(motion.target(), 383);
        for step in 0..=5 {
            let v = motion.value_at(step);
            assert!((128..=383).contains(&v));
        }
        assert_eq!(motion.value_at(0), 128);
    }
}
