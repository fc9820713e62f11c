//! Randomness primitives shared by every humanized behaviour
//!
//! Each component owns its own [`Humanizer`], so there is never a generator
//! shared between two callers. Seed one explicitly to make a run repeatable.

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

/// Per-component random source with the draws the emulation needs
pub struct Humanizer {
    rng: StdRng,
}

impl Default for Humanizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Humanizer {
    /// Create a humanizer seeded from system entropy
    pub fn new() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    /// Create a deterministic humanizer
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derive an independent child generator
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.next_u64())
    }

    /// Raw 64 random bits
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform float in [0, 1)
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform float in [low, high). Returns `low` for an empty or
    /// non-finite range.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high.is_nan() || low.is_nan() || high <= low || !(high - low).is_finite() {
            return low;
        }
        self.rng.random_range(low..high)
    }

    /// Uniform integer in [0, bound). Returns 0 when `bound` is 0.
    pub fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }

    /// Uniform integer in [low, high], inclusive on both ends
    pub fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    /// Uniform index in [0, len). Returns 0 when `len` is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    /// Bernoulli draw that succeeds with the given probability.
    ///
    /// Probabilities outside [0, 1] saturate; NaN never succeeds.
    pub fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() || probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.rng.random_bool(probability)
    }

    /// Standard normal draw (Box-Muller)
    pub fn standard_normal(&mut self) -> f64 {
        // 1 - unit() lies in (0, 1], so ln never sees zero
        let u1 = 1.0 - self.unit();
        let u2 = self.unit();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }

    /// Normal draw with the given mean and standard deviation
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }

    /// Pick `count` distinct indices out of `len`, capped at `len`
    pub fn distinct_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, count.min(len)).into_vec()
    }

    /// +1 or -1 with equal probability
    pub fn sign(&mut self) -> i32 {
        if self.rng.random_bool(0.5) {
            1
        } else {
            -1
        }
    }
}
