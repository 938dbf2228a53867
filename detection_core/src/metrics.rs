//! Coverage metrics accumulated over a run: per-sensor hits, misses, rates.

use crate::engine::FrameReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated detection statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetrics {
    /// Number of frames accumulated
    pub n_frames: u64,
    /// Total (frame, obstacle) observations
    pub n_observations: u64,
    /// Observations no active sensor detected
    pub n_undetected: u64,
    /// Detections per sensor name
    pub hits_by_sensor: BTreeMap<String, u64>,
}

impl CoverageMetrics {
    /// Accumulate one frame's worth of detections.
    pub fn accumulate(&mut self, report: &FrameReport) {
        self.n_frames += 1;
        for o in &report.obstacles {
            self.n_observations += 1;
            if !o.is_detected() {
                self.n_undetected += 1;
            }
            for name in &o.detected_by {
                *self.hits_by_sensor.entry(name.clone()).or_default() += 1;
            }
        }
    }

    /// Fraction of observations seen by at least one sensor.
    pub fn detection_rate(&self) -> f64 {
        if self.n_observations == 0 {
            return 0.0;
        }
        (self.n_observations - self.n_undetected) as f64 / self.n_observations as f64
    }

    /// Fraction of observations seen by `sensor`.
    pub fn sensor_rate(&self, sensor: &str) -> f64 {
        if self.n_observations == 0 {
            return 0.0;
        }
        let hits = self.hits_by_sensor.get(sensor).copied().unwrap_or(0);
        hits as f64 / self.n_observations as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::evaluate, obstacle::Obstacle, types::ObstacleCategory};
    use approx::assert_abs_diff_eq;
    use sensor_models::{
        geometry::point,
        sensor::{SensorKind, SensorSpec},
    };

    #[test]
    fn empty_metrics() {
        let m = CoverageMetrics::default();
        assert_eq!(m.detection_rate(), 0.0);
        assert_eq!(m.sensor_rate("Camera"), 0.0);
    }

    #[test]
    fn accumulates_hits_and_misses() {
        let sensors = vec![
            SensorSpec::sector(SensorKind::Camera, 25.0, 120.0).unwrap(),
            SensorSpec::omni(SensorKind::Lidar, 20.0).unwrap(),
        ];
        let obstacles = vec![
            Obstacle::new(0, ObstacleCategory::Pedestrian, point(10.0, 5.0)),
            Obstacle::new(1, ObstacleCategory::Vehicle, point(-25.0, 0.0)),
        ];
        let report = evaluate(&sensors, &obstacles);

        let mut m = CoverageMetrics::default();
        m.accumulate(&report);
        m.accumulate(&report);

        assert_eq!(m.n_frames, 2);
        assert_eq!(m.n_observations, 4);
        assert_eq!(m.n_undetected, 2);
        assert_eq!(m.hits_by_sensor.get("Camera"), Some(&2));
        assert_eq!(m.hits_by_sensor.get("LiDAR"), Some(&2));
        assert_abs_diff_eq!(m.detection_rate(), 0.5);
        assert_abs_diff_eq!(m.sensor_rate("Camera"), 0.5);
        assert_eq!(m.sensor_rate("Radar"), 0.0);
    }

    #[test]
    fn empty_frames_still_count() {
        let mut m = CoverageMetrics::default();
        m.accumulate(&FrameReport::default());
        assert_eq!(m.n_frames, 1);
        assert_eq!(m.n_observations, 0);
    }
}
