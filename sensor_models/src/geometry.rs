//! Vehicle-frame geometry: distance, bearing, polar↔cartesian conversion.
//!
//! # Frame convention
//! The vehicle sits at the origin facing along +x (bearing 0°). Bearings are
//! measured counter-clockwise in degrees and normalised into (-180, 180].

use nalgebra::Point2;

/// Top-down position in the vehicle-centered frame (meters).
pub type Point = Point2<f64>;

/// Tolerance applied to the inclusive range and sector-edge comparisons.
pub const GEOMETRY_EPS: f64 = 1e-9;

/// Shorthand for `Point::new(x, y)`.
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Euclidean distance from the vehicle origin to `p`.
pub fn distance(p: &Point) -> f64 {
    (p.x * p.x + p.y * p.y).sqrt()
}

/// Signed bearing from the forward axis to `p`, in degrees within (-180, 180].
///
/// The exact origin has no defined bearing; it is reported as 0°, which places
/// an obstacle sitting on the vehicle inside every sector.
pub fn bearing_deg(p: &Point) -> f64 {
    if p.x == 0.0 && p.y == 0.0 {
        return 0.0;
    }
    let b = p.y.atan2(p.x).to_degrees();
    // atan2(-0.0, x<0) lands on -180
    if b <= -180.0 {
        b + 360.0
    } else {
        b
    }
}

/// Point at `range_m` along `bearing_deg` from the origin.
pub fn polar_to_cartesian(range_m: f64, bearing_deg: f64) -> Point {
    let rad = bearing_deg.to_radians();
    point(range_m * rad.cos(), range_m * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance_is_euclidean() {
        assert_abs_diff_eq!(distance(&point(3.0, 4.0)), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(distance(&point(10.0, 5.0)), 11.1803, epsilon = 1e-4);
        assert_eq!(distance(&point(0.0, 0.0)), 0.0);
    }

    #[test]
    fn bearing_quadrants() {
        assert_abs_diff_eq!(bearing_deg(&point(1.0, 0.0)), 0.0);
        assert_abs_diff_eq!(bearing_deg(&point(0.0, 1.0)), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bearing_deg(&point(0.0, -1.0)), -90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bearing_deg(&point(10.0, 5.0)), 26.5651, epsilon = 1e-4);
        assert_abs_diff_eq!(bearing_deg(&point(-8.0, 3.0)), 159.4440, epsilon = 1e-4);
    }

    #[test]
    fn bearing_behind_vehicle_is_plus_180() {
        assert_abs_diff_eq!(bearing_deg(&point(-5.0, 0.0)), 180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bearing_deg(&point(-5.0, -0.0)), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn bearing_at_origin_is_zero() {
        assert_eq!(bearing_deg(&point(0.0, 0.0)), 0.0);
        assert_eq!(bearing_deg(&point(-0.0, 0.0)), 0.0);
        assert_eq!(bearing_deg(&point(0.0, -0.0)), 0.0);
    }

    #[test]
    fn polar_matches_distance_and_bearing() {
        let p = polar_to_cartesian(12.0, -35.0);
        assert_abs_diff_eq!(distance(&p), 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing_deg(&p), -35.0, epsilon = 1e-9);
    }
}
