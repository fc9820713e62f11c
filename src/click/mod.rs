//! Click point sampling
//!
//! Picks a randomized point inside a target shape, biased towards its
//! centre the way a hand naturally aims.

pub mod sampler;
pub mod shape;

pub use sampler::ClickSampler;
pub use shape::{Point, Polygon, Rect, Shape};

/// A shape to click plus how strongly to aim at its centre
#[derive(Debug, Clone)]
pub struct ClickTarget<S: Shape> {
    /// Region the click must land in
    pub shape: S,
    /// Probability in [0, 1] of a centre-biased draw
    pub center_bias: f64,
}

impl<S: Shape> ClickTarget<S> {
    /// Create a target; the bias is clamped into [0, 1]
    pub fn new(shape: S, center_bias: f64) -> Self {
        Self {
            shape,
            center_bias: center_bias.clamp(0.0, 1.0),
        }
    }
}
