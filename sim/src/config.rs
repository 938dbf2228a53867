//! Scene configuration: sensor toggles and geometry, obstacles, motion.
//!
//! A [`SceneConfig`] is built once (from defaults, a preset, CLI flags or a
//! JSON file), validated, and then handed read-only to the simulation loop.

use anyhow::Context;
use detection_core::{obstacle::Obstacle, types::ObstacleCategory};
use sensor_models::{
    geometry::point,
    sensor::{SensorError, SensorKind, SensorSpec},
};
use serde::{Deserialize, Serialize};
use std::{ops::RangeInclusive, path::Path, time::Duration};

/// Allowed sector FOV (degrees).
pub const FOV_DOMAIN: RangeInclusive<f64> = 0.0..=180.0;
/// Allowed sensor range (meters).
pub const RANGE_DOMAIN: RangeInclusive<f64> = 0.0..=50.0;
/// Allowed obstacle coordinate on either axis (meters).
pub const POSITION_DOMAIN: RangeInclusive<f64> = -30.0..=30.0;
/// Allowed approach speed (meters per frame).
pub const SPEED_DOMAIN: RangeInclusive<f64> = 0.1..=2.0;

/// A configuration value outside its allowed domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be > 0, got {value}")]
    NotPositive { field: String, value: f64 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: String, value: f64 },
    #[error(transparent)]
    Sensor(#[from] SensorError),
}

fn check(field: &str, value: f64, domain: &RangeInclusive<f64>) -> Result<(), ConfigError> {
    if domain.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            min: *domain.start(),
            max: *domain.end(),
        })
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSettings {
    pub camera_enabled: bool,
    pub radar_enabled: bool,
    pub lidar_enabled: bool,
    pub camera_fov_deg: f64,
    pub camera_range_m: f64,
    pub radar_fov_deg: f64,
    pub radar_range_m: f64,
    pub lidar_range_m: f64,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            camera_enabled: true,
            radar_enabled: true,
            lidar_enabled: true,
            camera_fov_deg: 120.0,
            camera_range_m: 25.0,
            radar_fov_deg: 60.0,
            radar_range_m: 15.0,
            lidar_range_m: 20.0,
        }
    }
}

impl SensorSettings {
    pub fn set_enabled(&mut self, kind: SensorKind, enabled: bool) {
        match kind {
            SensorKind::Camera => self.camera_enabled = enabled,
            SensorKind::Radar => self.radar_enabled = enabled,
            SensorKind::Lidar => self.lidar_enabled = enabled,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check("camera_fov_deg", self.camera_fov_deg, &FOV_DOMAIN)?;
        check("radar_fov_deg", self.radar_fov_deg, &FOV_DOMAIN)?;
        check("camera_range_m", self.camera_range_m, &RANGE_DOMAIN)?;
        check("radar_range_m", self.radar_range_m, &RANGE_DOMAIN)?;
        check("lidar_range_m", self.lidar_range_m, &RANGE_DOMAIN)?;
        Ok(())
    }

    /// Enabled sensors in priority order: Camera, Radar, LiDAR.
    pub fn active_sensors(&self) -> Result<Vec<SensorSpec>, ConfigError> {
        let mut sensors = Vec::with_capacity(3);
        if self.camera_enabled {
            sensors.push(SensorSpec::sector(
                SensorKind::Camera,
                self.camera_range_m,
                self.camera_fov_deg,
            )?);
        }
        if self.radar_enabled {
            sensors.push(SensorSpec::sector(
                SensorKind::Radar,
                self.radar_range_m,
                self.radar_fov_deg,
            )?);
        }
        if self.lidar_enabled {
            sensors.push(SensorSpec::omni(SensorKind::Lidar, self.lidar_range_m)?);
        }
        Ok(sensors)
    }
}

/// One configured obstacle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSetting {
    pub x: f64,
    pub y: f64,
    pub category: ObstacleCategory,
    /// Own speed (m/frame), overriding [`MotionSettings::speed`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl ObstacleSetting {
    pub fn new(x: f64, y: f64, category: ObstacleCategory) -> Self {
        Self { x, y, category, speed: None }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Run the simulation loop; evaluate once where obstacles stand otherwise
    pub animate: bool,
    /// Approach speed along -y (meters per frame)
    pub speed: f64,
    /// Time step per frame (frames)
    pub dt: f64,
    /// Obstacles with y below this leave the scene
    pub y_min: f64,
    /// Wall-clock pause between frames (milliseconds)
    pub frame_delay_ms: u64,
    /// Stop after this many frames; `None` runs until stopped
    pub max_frames: Option<u64>,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            animate: false,
            speed: 0.5,
            dt: 1.0,
            y_min: -30.0,
            frame_delay_ms: 100,
            max_frames: None,
        }
    }
}

impl MotionSettings {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

// ---------------------------------------------------------------------------
// SceneConfig
// ---------------------------------------------------------------------------

/// Immutable configuration of one scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub sensors: SensorSettings,
    pub obstacles: Vec<ObstacleSetting>,
    pub motion: MotionSettings,
}

impl SceneConfig {
    /// Check every value against its allowed domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sensors.validate()?;
        for (i, o) in self.obstacles.iter().enumerate() {
            check(&format!("obstacles[{i}].x"), o.x, &POSITION_DOMAIN)?;
            check(&format!("obstacles[{i}].y"), o.y, &POSITION_DOMAIN)?;
            if let Some(speed) = o.speed {
                check(&format!("obstacles[{i}].speed"), speed, &SPEED_DOMAIN)?;
            }
        }
        check("motion.speed", self.motion.speed, &SPEED_DOMAIN)?;
        if !(self.motion.dt > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "motion.dt".into(),
                value: self.motion.dt,
            });
        }
        if !self.motion.y_min.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "motion.y_min".into(),
                value: self.motion.y_min,
            });
        }
        Ok(())
    }

    pub fn active_sensors(&self) -> Result<Vec<SensorSpec>, ConfigError> {
        self.sensors.active_sensors()
    }

    /// Obstacles at their starting positions, ids assigned in list order.
    pub fn initial_obstacles(&self) -> Vec<Obstacle> {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| Obstacle {
                speed: o.speed,
                ..Obstacle::new(i as u64, o.category, point(o.x, o.y))
            })
            .collect()
    }

    /// Move every obstacle at `speed`, dropping per-obstacle speeds.
    pub fn override_speed(&mut self, speed: f64) {
        self.motion.speed = speed;
        for o in &mut self.obstacles {
            o.speed = None;
        }
    }

    /// Keep only the obstacles at `indices` (in list order). Unknown indices are ignored.
    pub fn select_obstacles(&mut self, indices: &[usize]) {
        self.obstacles = self
            .obstacles
            .iter()
            .enumerate()
            .filter(|(i, _)| indices.contains(i))
            .map(|(_, o)| o.clone())
            .collect();
    }

    /// Read a JSON scene file and validate it.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene config {}", path.display()))?;
        let config: SceneConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing scene config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}
