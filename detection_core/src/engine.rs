//! Detection engine: the obstacle × active-sensor cross product for one frame.
//!
//! # Per-frame steps
//! 1. Order active sensors by kind (Camera, Radar, LiDAR), keeping insertion
//!    order among sensors of the same kind
//! 2. For each obstacle, compute its distance from the vehicle
//! 3. Run the coverage predicate for every active sensor
//! 4. Collect the names of the sensors that fired into `detected_by`
//!
//! The engine holds no state between frames; the same inputs always produce
//! the same [`FrameReport`].

use crate::{
    obstacle::Obstacle,
    types::{ObstacleCategory, ObstacleId},
};
use sensor_models::{
    geometry::Point,
    sensor::{detects, SensorKind, SensorSpec},
};
use serde::{Deserialize, Serialize};

/// Outcome of one (obstacle, sensor) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub sensor: String,
    pub kind: SensorKind,
    pub detected: bool,
    /// Distance from the vehicle to the obstacle (meters)
    pub distance_m: f64,
}

/// Everything known about one obstacle in one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleReport {
    pub id: ObstacleId,
    pub category: ObstacleCategory,
    pub position: Point,
    pub distance_m: f64,
    /// One entry per active sensor, in evaluation order
    pub results: Vec<DetectionResult>,
    /// Names of the sensors that detected this obstacle, in evaluation order
    pub detected_by: Vec<String>,
}

impl ObstacleReport {
    /// False means "not detected by any active sensor".
    pub fn is_detected(&self) -> bool {
        !self.detected_by.is_empty()
    }

    pub fn detected_by_kind(&self, kind: SensorKind) -> bool {
        self.results.iter().any(|r| r.kind == kind && r.detected)
    }
}

/// Detection outcomes for every active obstacle in one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Simulation frame index (0 for a one-shot evaluation)
    pub frame: u64,
    pub obstacles: Vec<ObstacleReport>,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Obstacles no active sensor sees.
    pub fn undetected(&self) -> impl Iterator<Item = &ObstacleReport> {
        self.obstacles.iter().filter(|o| !o.is_detected())
    }

    pub fn get(&self, id: ObstacleId) -> Option<&ObstacleReport> {
        self.obstacles.iter().find(|o| o.id == id)
    }
}

/// Evaluates obstacles against a fixed set of active sensors.
#[derive(Clone, Debug, Default)]
pub struct DetectionEngine {
    sensors: Vec<SensorSpec>,
}

impl DetectionEngine {
    pub fn new(mut sensors: Vec<SensorSpec>) -> Self {
        // stable: equal kinds keep their configured order
        sensors.sort_by_key(|s| s.kind);
        Self { sensors }
    }

    /// Active sensors in evaluation order.
    pub fn sensors(&self) -> &[SensorSpec] {
        &self.sensors
    }

    pub fn evaluate_obstacle(&self, obstacle: &Obstacle) -> ObstacleReport {
        let distance_m = obstacle.distance();
        let results: Vec<DetectionResult> = self
            .sensors
            .iter()
            .map(|s| DetectionResult {
                sensor: s.name.clone(),
                kind: s.kind,
                detected: detects(s, &obstacle.position),
                distance_m,
            })
            .collect();
        let detected_by = results
            .iter()
            .filter(|r| r.detected)
            .map(|r| r.sensor.clone())
            .collect();

        ObstacleReport {
            id: obstacle.id,
            category: obstacle.category,
            position: obstacle.position,
            distance_m,
            results,
            detected_by,
        }
    }

    pub fn evaluate(&self, frame: u64, obstacles: &[Obstacle]) -> FrameReport {
        FrameReport {
            frame,
            obstacles: obstacles.iter().map(|o| self.evaluate_obstacle(o)).collect(),
        }
    }
}

/// One-shot evaluation of `obstacles` against `sensors` (frame 0).
pub fn evaluate(sensors: &[SensorSpec], obstacles: &[Obstacle]) -> FrameReport {
    DetectionEngine::new(sensors.to_vec()).evaluate(0, obstacles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sensor_models::geometry::point;

    fn default_sensors() -> Vec<SensorSpec> {
        vec![
            SensorSpec::sector(SensorKind::Camera, 25.0, 120.0).unwrap(),
            SensorSpec::sector(SensorKind::Radar, 15.0, 60.0).unwrap(),
            SensorSpec::omni(SensorKind::Lidar, 20.0).unwrap(),
        ]
    }

    fn obstacle(id: u64, x: f64, y: f64) -> Obstacle {
        Obstacle::new(id, ObstacleCategory::Pedestrian, point(x, y))
    }

    #[test]
    fn camera_scenario() {
        let camera = vec![SensorSpec::sector(SensorKind::Camera, 25.0, 120.0).unwrap()];
        let report = evaluate(&camera, &[obstacle(0, 10.0, 5.0)]);
        let o = &report.obstacles[0];
        assert_abs_diff_eq!(o.distance_m, 11.18, epsilon = 0.01);
        assert_eq!(o.detected_by, vec!["Camera".to_string()]);
    }

    #[test]
    fn radar_scenario() {
        let radar = vec![SensorSpec::sector(SensorKind::Radar, 15.0, 60.0).unwrap()];
        let report = evaluate(&radar, &[obstacle(0, -8.0, 3.0)]);
        let o = &report.obstacles[0];
        assert_abs_diff_eq!(o.distance_m, 8.54, epsilon = 0.01);
        assert!(!o.is_detected());
        assert_eq!(o.results.len(), 1);
        assert!(!o.results[0].detected);
    }

    #[test]
    fn lidar_scenario() {
        let lidar = vec![SensorSpec::omni(SensorKind::Lidar, 20.0).unwrap()];
        let report = evaluate(&lidar, &[obstacle(0, 5.0, -10.0)]);
        assert_eq!(report.obstacles[0].detected_by, vec!["LiDAR".to_string()]);
    }

    #[test]
    fn no_active_sensors_reports_undetected() {
        let report = evaluate(&[], &[obstacle(0, 1.0, 1.0), obstacle(1, 2.0, 0.0)]);
        assert_eq!(report.obstacles.len(), 2);
        assert_eq!(report.undetected().count(), 2);
        assert!(report.obstacles.iter().all(|o| o.results.is_empty()));
    }

    #[test]
    fn no_obstacles_is_an_empty_report() {
        let report = evaluate(&default_sensors(), &[]);
        assert!(report.is_empty());
        assert_eq!(report.frame, 0);
    }

    #[test]
    fn detected_by_follows_sensor_priority() {
        let mut sensors = default_sensors();
        sensors.reverse();
        let report = evaluate(&sensors, &[obstacle(0, 5.0, 0.0)]);
        assert_eq!(
            report.obstacles[0].detected_by,
            vec!["Camera".to_string(), "Radar".to_string(), "LiDAR".to_string()]
        );
    }

    #[test]
    fn same_kind_keeps_insertion_order() {
        let sensors = vec![
            SensorSpec::omni(SensorKind::Lidar, 20.0).unwrap(),
            SensorSpec::new(SensorKind::Camera, "Front", 25.0, Some(120.0)).unwrap(),
            SensorSpec::new(SensorKind::Camera, "Wide", 10.0, Some(180.0)).unwrap(),
        ];
        let engine = DetectionEngine::new(sensors);
        let names: Vec<&str> = engine.sensors().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Front", "Wide", "LiDAR"]);
    }

    #[test]
    fn mixed_detection() {
        // ahead and within 15 m: all three; far ahead: camera only; behind: lidar only
        let obstacles = vec![
            obstacle(0, 10.0, 0.0),
            obstacle(1, 24.0, 0.0),
            obstacle(2, -10.0, 0.0),
        ];
        let report = evaluate(&default_sensors(), &obstacles);
        assert_eq!(report.obstacles[0].detected_by.len(), 3);
        assert_eq!(report.obstacles[1].detected_by, vec!["Camera".to_string()]);
        assert_eq!(report.obstacles[2].detected_by, vec!["LiDAR".to_string()]);
        assert!(report.obstacles[1].detected_by_kind(SensorKind::Camera));
        assert!(!report.obstacles[1].detected_by_kind(SensorKind::Lidar));
    }

    #[test]
    fn evaluate_is_idempotent() {
        let sensors = default_sensors();
        let obstacles = vec![obstacle(0, 10.0, 5.0), obstacle(1, -8.0, 3.0)];
        let a = evaluate(&sensors, &obstacles);
        let b = evaluate(&sensors, &obstacles);
        assert_eq!(a, b);
    }

    #[test]
    fn obstacle_at_origin_is_detected() {
        let report = evaluate(&default_sensors(), &[obstacle(0, 0.0, 0.0)]);
        assert_eq!(report.obstacles[0].detected_by.len(), 3);
        assert_eq!(report.obstacles[0].distance_m, 0.0);
    }

    #[test]
    fn frame_index_and_lookup() {
        let engine = DetectionEngine::new(default_sensors());
        let report = engine.evaluate(12, &[obstacle(4, 1.0, 1.0)]);
        assert_eq!(report.frame, 12);
        assert!(report.get(ObstacleId(4)).is_some());
        assert!(report.get(ObstacleId(5)).is_none());
    }
}
