//! Camera motion control
//!
//! Computes bearings in a cyclic angle space, plans smoothed rotations and
//! pitch changes, and schedules idle fidgets. Motions are advanced by
//! polling; nothing in this module blocks.

pub mod angle;
pub mod controller;
pub mod fidget;
pub mod motion;

use serde::{Deserialize, Serialize};

pub use angle::{bearing, normalize, shortest_delta, HALF_WRAP, WRAP};
pub use controller::{CameraController, CameraState, CancelHandle};
pub use fidget::FidgetOutcome;
pub use motion::{Axis, Motion, MotionStep};

/// Tile position in the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
}

impl WorldPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Host camera the controller drives
pub trait CameraMutator {
    /// Live yaw in `[0, WRAP)`
    fn yaw(&self) -> i32;
    /// Live pitch
    fn pitch(&self) -> i32;
    /// Request a new yaw
    fn set_yaw(&mut self, yaw: i32);
    /// Request a new pitch
    fn set_pitch(&mut self, pitch: i32);
}

/// Where the local player currently stands
pub trait PositionSource {
    fn local_position(&self) -> Option<WorldPoint>;
}
