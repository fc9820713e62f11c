//! Centre-biased rejection sampling of click points

use crate::config::settings::ClickSettings;
use crate::stealth::Humanizer;

use super::{ClickTarget, Point, Shape};

/// Picks human-looking click points inside target shapes
pub struct ClickSampler {
    /// Random source owned by this sampler
    humanizer: Humanizer,
    /// Attempt count, spread and default bias
    settings: ClickSettings,
    /// Emit per-draw debug lines
    debug: bool,
}

impl ClickSampler {
    /// Create a click sampler
    pub fn new(humanizer: Humanizer, settings: ClickSettings) -> Self {
        Self {
            humanizer,
            settings,
            debug: false,
        }
    }

    /// Enable or disable per-draw debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sample a point for `shape`. Never fails.
    ///
    /// With probability `center_bias` each attempt is drawn from a Gaussian
    /// around the bounding-box centre, otherwise uniformly over the box.
    /// After `max_attempts` misses the box centre is returned, which for a
    /// concave shape may lie outside it.
    pub fn sample_point<S: Shape + ?Sized>(&mut self, shape: &S, center_bias: f64) -> Point {
        let bounds = shape.bounds();
        if bounds.is_empty() {
            return bounds.origin();
        }

        let bias = center_bias.clamp(0.0, 1.0);
        let (w, h) = (bounds.width as f64, bounds.height as f64);
        let cx = bounds.x as f64 + w / 2.0;
        let cy = bounds.y as f64 + h / 2.0;
        let max_x = bounds.x + bounds.width - 1;
        let max_y = bounds.y + bounds.height - 1;

        for attempt in 0..self.settings.max_attempts {
            let (x, y) = if self.humanizer.chance(bias) {
                (
                    self.humanizer.gaussian(cx, self.settings.spread * w),
                    self.humanizer.gaussian(cy, self.settings.spread * h),
                )
            } else {
                (
                    self.humanizer.uniform(bounds.x as f64, bounds.x as f64 + w),
                    self.humanizer.uniform(bounds.y as f64, bounds.y as f64 + h),
                )
            };

            let point = Point::new(
                (x.floor() as i32).clamp(bounds.x, max_x),
                (y.floor() as i32).clamp(bounds.y, max_y),
            );

            if shape.contains(point) {
                if self.debug {
                    log::debug!("click point {:?} after {} attempt(s)", point, attempt + 1);
                }
                return point;
            }
        }

        let fallback = bounds.center();
        if self.debug {
            log::debug!(
                "no contained point after {} attempts, using box centre {:?}",
                self.settings.max_attempts,
                fallback
            );
        }
        fallback
    }

    /// Sample a point using the target's own bias
    pub fn sample_target<S: Shape>(&mut self, target: &ClickTarget<S>) -> Point {
        self.sample_point(&target.shape, target.center_bias)
    }

    /// Sample a point using the configured default bias
    pub fn sample_default<S: Shape + ?Sized>(&mut self, shape: &S) -> Point {
        let bias = self.settings.default_center_bias;
        self.sample_point(shape, bias)
    }

    /// Offset each axis by a uniform amount in `[-max_offset, max_offset]`.
    ///
    /// No containment check is made.
    pub fn jitter(&mut self, point: Point, max_offset: i32) -> Point {
        let max = i64::from(max_offset.unsigned_abs());
        let dx = self.humanizer.range_inclusive(-max, max);
        let dy = self.humanizer.range_inclusive(-max, max);
        Point::new(offset(point.x, dx), offset(point.y, dy))
    }

    /// Jitter by the configured default offset
    pub fn jitter_default(&mut self, point: Point) -> Point {
        let max = self.settings.jitter;
        self.jitter(point, max)
    }
}

/// Shift a coordinate, saturating at the `i32` range
fn offset(value: i32, delta: i64) -> i32 {
    (i64::from(value) + delta).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::click::{Polygon, Rect};

    fn sampler(seed: u64) -> ClickSampler {
        ClickSampler::new(Humanizer::from_seed(seed), ClickSettings::default())
    }

    #[test]
    fn test_zero_area_returns_origin() {
        let mut sampler = sampler(1);
        assert_eq!(
            sampler.sample_point(&Rect::new(40, 50, 0, 10), 0.5),
            Point::new(40, 50)
        );

        let flat = Polygon::from(vec![(3, 7), (9, 7), (20, 7)]);
        assert_eq!(sampler.sample_point(&flat, 0.5), Point::new(3, 7));
    }

    #[test]
    fn test_rect_always_contains() {
        let mut sampler = sampler(2);
        let rect = Rect::new(100, 200, 37, 12);

        for bias in [0.0, 0.5, 1.0] {
            for _ in 0..2000 {
                let p = sampler.sample_point(&rect, bias);
                assert!(rect.contains(p), "{p:?} outside {rect:?}");
            }
        }
    }

    #[test]
    fn test_convex_polygons_always_contain() {
        let mut sampler = sampler(3);
        let shapes = [
            Polygon::from(vec![(0, 0), (100, 0), (0, 100)]),
            Polygon::from(vec![(50, 0), (100, 25), (100, 75), (50, 100), (0, 75), (0, 25)]),
            Polygon::from(vec![(10, 10), (90, 40), (20, 60)]),
        ];

        for shape in &shapes {
            for bias in [0.0, 0.7, 1.0] {
                for _ in 0..2000 {
                    let p = sampler.sample_point(shape, bias);
                    assert!(shape.contains(p), "{p:?} outside {shape:?}");
                }
            }
        }
    }

    #[test]
    fn test_fallback_is_box_centre() {
        let mut sampler = sampler(4);
        // Collinear vertices: non-empty box but nothing is inside
        let sliver = Polygon::from(vec![(0, 0), (10, 10), (20, 20)]);
        assert_eq!(sampler.sample_point(&sliver, 0.5), Point::new(10, 10));
    }

    #[test]
    fn test_center_bias_tightens_spread() {
        let rect = Rect::new(0, 0, 200, 200);
        let centre = (100.0, 100.0);
        let mut sampler = sampler(5);

        let mut mean_dist = |bias: f64| {
            let n = 3000;
            (0..n)
                .map(|_| {
                    let p = sampler.sample_point(&rect, bias);
                    ((p.x as f64 - centre.0).powi(2) + (p.y as f64 - centre.1).powi(2)).sqrt()
                })
                .sum::<f64>()
                / n as f64
        };

        let biased = mean_dist(1.0);
        let uniform = mean_dist(0.0);
        assert!(biased < uniform, "biased {biased} vs uniform {uniform}");
    }

    #[test]
    fn test_sample_target_uses_shape() {
        let mut sampler = sampler(6);
        let target = ClickTarget::new(Rect::new(5, 5, 3, 3), 0.9);

        for _ in 0..200 {
            assert!(target.shape.contains(sampler.sample_target(&target)));
        }
    }

    #[test]
    fn test_jitter_bounds() {
        let mut sampler = sampler(7);
        let origin = Point::new(50, 50);

        for _ in 0..1000 {
            let p = sampler.jitter(origin, 3);
            assert!((47..=53).contains(&p.x));
            assert!((47..=53).contains(&p.y));
        }

        assert_eq!(sampler.jitter(origin, 0), origin);
    }

    #[test]
    fn test_jitter_extreme_offsets_saturate() {
        let mut sampler = sampler(8);

        for _ in 0..100 {
            // Most negative offset must not overflow
            sampler.jitter(Point::new(0, 0), i32::MIN);

            let edge = sampler.jitter(Point::new(i32::MAX, i32::MIN), 5);
            assert!(edge.x >= i32::MAX - 5);
            assert!(edge.y <= i32::MIN + 5);
        }
    }
}
