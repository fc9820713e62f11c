//! Cyclic angle arithmetic
//!
//! Headings are integers modulo [`WRAP`]; 2048 units make a full turn.

use super::WorldPoint;

/// Units in a full turn
pub const WRAP: i32 = 2048;

/// Units in half a turn
pub const HALF_WRAP: i32 = WRAP / 2;

/// Normalize any angle into `[0, WRAP)`
pub fn normalize(angle: i32) -> i32 {
    angle.rem_euclid(WRAP)
}

/// Convert degrees to (fractional) cyclic units
pub fn degrees_to_units(degrees: f64) -> f64 {
    degrees * WRAP as f64 / 360.0
}

/// Signed shortest rotation taking `current` onto `target`.
///
/// The result lies in `[-HALF_WRAP, HALF_WRAP]`.
pub fn shortest_delta(current: i32, target: i32) -> i32 {
    let mut delta = normalize(target) - normalize(current);
    if delta > HALF_WRAP {
        delta -= WRAP;
    } else if delta < -HALF_WRAP {
        delta += WRAP;
    }
    delta
}

/// Unsigned angular distance between two headings
pub fn distance(a: i32, b: i32) -> i32 {
    shortest_delta(a, b).abs()
}

/// Heading from one world position to another, in `[0, WRAP)`
pub fn bearing(from: WorldPoint, to: WorldPoint) -> i32 {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    let degrees = dy.atan2(dx).to_degrees();
    normalize(degrees_to_units(90.0 - degrees).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(0), 0);
        assert_eq!(normalize(2048), 0);
        assert_eq!(normalize(-1), 2047);
        assert_eq!(normalize(5000), 904);
    }

    #[test]
    fn test_shortest_delta_wraps() {
        // 10 -> 2040 is 18 units backwards, not 2030 forwards
        assert_eq!(shortest_delta(10, 2040), -18);
        assert_eq!(shortest_delta(2040, 10), 18);
        assert_eq!(distance(10, 2040), 18);
        assert_eq!(shortest_delta(100, 300), 200);
        assert_eq!(shortest_delta(300, 100), -200);
    }

    #[test]
    fn test_shortest_delta_half_turn() {
        assert_eq!(shortest_delta(0, HALF_WRAP), HALF_WRAP);
        assert!(shortest_delta(0, HALF_WRAP + 1) < 0);
    }

    #[test]
    fn test_bearing_quadrants() {
        let origin = WorldPoint::new(0, 0);
        assert_eq!(bearing(origin, WorldPoint::new(0, 10)), 0);
        assert_eq!(bearing(origin, WorldPoint::new(10, 0)), 512);
        assert_eq!(bearing(origin, WorldPoint::new(0, -10)), 1024);
        assert_eq!(bearing(origin, WorldPoint::new(-10, 0)), 1536);
        assert_eq!(bearing(origin, WorldPoint::new(10, 10)), 256);
    }

    #[test]
    fn test_degrees_to_units() {
        assert_eq!(degrees_to_units(360.0), 2048.0);
        assert_eq!(degrees_to_units(90.0), 512.0);
    }
}
