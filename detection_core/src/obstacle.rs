//! Obstacles and their per-frame motion.
//!
//! Motion is deliberately trivial: straight toward the vehicle along -y at a
//! constant speed, no lateral component.

use crate::types::{ObstacleCategory, ObstacleId};
use sensor_models::geometry::{distance, Point};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub category: ObstacleCategory,
    /// Current position in the vehicle frame (meters)
    pub position: Point,
    /// Own speed (m per unit time). Overrides the scene speed when set.
    pub speed: Option<f64>,
}

impl Obstacle {
    pub fn new(id: u64, category: ObstacleCategory, position: Point) -> Self {
        Self {
            id: ObstacleId(id),
            category,
            position,
            speed: None,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Copy of this obstacle moved `speed * dt` toward -y. `x` is untouched.
    pub fn advance(&self, dt: f64, speed: f64) -> Obstacle {
        let mut next = self.clone();
        next.position.y -= speed * dt;
        next
    }

    /// True once the obstacle has travelled past `y_min` and leaves the scene.
    pub fn is_out_of_bounds(&self, y_min: f64) -> bool {
        self.position.y < y_min
    }

    pub fn distance(&self) -> f64 {
        distance(&self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sensor_models::geometry::point;

    #[test]
    fn advance_moves_along_negative_y_only() {
        let o = Obstacle::new(0, ObstacleCategory::Pedestrian, point(3.0, 20.0));
        let mut cur = o.clone();
        for _ in 0..10 {
            cur = cur.advance(1.0, 0.5);
        }
        assert_abs_diff_eq!(cur.position.y, 15.0, epsilon = 1e-12);
        assert_eq!(cur.position.x, 3.0);
        // original untouched
        assert_eq!(o.position.y, 20.0);
    }

    #[test]
    fn advance_scales_with_dt() {
        let o = Obstacle::new(1, ObstacleCategory::Vehicle, point(0.0, 10.0));
        assert_abs_diff_eq!(o.advance(0.1, 2.0).position.y, 9.8, epsilon = 1e-12);
        assert_eq!(o.advance(0.0, 2.0).position, o.position);
    }

    #[test]
    fn out_of_bounds_is_strict() {
        let at = Obstacle::new(2, ObstacleCategory::Object, point(0.0, -30.0));
        assert!(!at.is_out_of_bounds(-30.0));
        let past = at.advance(1.0, 0.5);
        assert!(past.is_out_of_bounds(-30.0));
    }
}
