//! Sensor detection regions and the in-coverage predicate.
//!
//! Every sensor kind shares one rule: out of range is never detected, an
//! omnidirectional sensor detects anything in range, and a sector sensor
//! detects bearings within ±fov/2 of the forward axis (edges inclusive).
//! Camera and radar differ only in their configured numbers.

use crate::geometry::{bearing_deg, distance, polar_to_cartesian, Point, GEOMETRY_EPS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field of view at or above which a sensor is treated as omnidirectional.
pub const FULL_CIRCLE_DEG: f64 = 360.0;

/// Sensor family. Declaration order is the display priority of `detected_by`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SensorKind {
    Camera,
    Radar,
    Lidar,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [SensorKind::Camera, SensorKind::Radar, SensorKind::Lidar];

    pub fn display_name(&self) -> &'static str {
        match self {
            SensorKind::Camera => "Camera",
            SensorKind::Radar => "Radar",
            SensorKind::Lidar => "LiDAR",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Invalid sensor geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error("{sensor}: range must be a finite value >= 0 m, got {value}")]
    InvalidRange { sensor: String, value: f64 },
    #[error("{sensor}: field of view must lie in [0, 360] degrees, got {value}")]
    InvalidFov { sensor: String, value: f64 },
}

/// Immutable description of one sensor's detection region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    pub kind: SensorKind,
    /// Name reported in `detected_by`
    pub name: String,
    /// Detection radius (meters)
    pub range_m: f64,
    /// Angular width centered on +x (degrees). `None` means omnidirectional.
    pub fov_deg: Option<f64>,
}

impl SensorSpec {
    pub fn new(
        kind: SensorKind,
        name: impl Into<String>,
        range_m: f64,
        fov_deg: Option<f64>,
    ) -> Result<Self, SensorError> {
        let name = name.into();
        if !range_m.is_finite() || range_m < 0.0 {
            return Err(SensorError::InvalidRange { sensor: name, value: range_m });
        }
        if let Some(fov) = fov_deg {
            if !(0.0..=FULL_CIRCLE_DEG).contains(&fov) {
                return Err(SensorError::InvalidFov { sensor: name, value: fov });
            }
        }
        Ok(Self { kind, name, range_m, fov_deg })
    }

    /// Sector sensor named after its kind.
    pub fn sector(kind: SensorKind, range_m: f64, fov_deg: f64) -> Result<Self, SensorError> {
        Self::new(kind, kind.display_name(), range_m, Some(fov_deg))
    }

    /// 360° sensor named after its kind.
    pub fn omni(kind: SensorKind, range_m: f64) -> Result<Self, SensorError> {
        Self::new(kind, kind.display_name(), range_m, None)
    }

    pub fn is_omnidirectional(&self) -> bool {
        self.fov_deg.map_or(true, |fov| fov >= FULL_CIRCLE_DEG)
    }

    pub fn coverage(&self) -> Coverage {
        match self.fov_deg {
            Some(fov) if fov < FULL_CIRCLE_DEG => Coverage::Sector {
                range_m: self.range_m,
                fov_deg: fov,
            },
            _ => Coverage::Circle { range_m: self.range_m },
        }
    }

    /// True when `p` lies inside this sensor's detection region.
    pub fn detects(&self, p: &Point) -> bool {
        detects(self, p)
    }
}

/// Shape of a detection region around the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Coverage {
    Circle { range_m: f64 },
    Sector { range_m: f64, fov_deg: f64 },
}

impl Coverage {
    pub fn range_m(&self) -> f64 {
        match *self {
            Coverage::Circle { range_m } | Coverage::Sector { range_m, .. } => range_m,
        }
    }

    /// Polygon outline for drawing.
    ///
    /// A sector starts and ends at the origin with `samples` arc points in
    /// between; a circle is `samples` points with the first repeated at the end.
    pub fn outline(&self, samples: usize) -> Vec<Point> {
        let samples = samples.max(2);
        match *self {
            Coverage::Sector { range_m, fov_deg } => {
                let start = -fov_deg / 2.0;
                let step = fov_deg / (samples - 1) as f64;
                let mut pts = Vec::with_capacity(samples + 2);
                pts.push(Point::origin());
                pts.extend((0..samples).map(|i| polar_to_cartesian(range_m, start + step * i as f64)));
                pts.push(Point::origin());
                pts
            }
            Coverage::Circle { range_m } => {
                let step = FULL_CIRCLE_DEG / samples as f64;
                let mut pts: Vec<Point> = (0..samples)
                    .map(|i| polar_to_cartesian(range_m, step * i as f64))
                    .collect();
                pts.push(pts[0]);
                pts
            }
        }
    }
}

/// Whether `sensor` detects a point at `p`.
///
/// 1. Out of range (`distance > range_m`) is rejected first, whatever the FOV.
///    No tolerance: a point past the range by any amount is not detected.
/// 2. Omnidirectional sensors accept everything in range.
/// 3. Sector sensors accept `-fov/2 <= bearing <= fov/2`, with the edge
///    widened by [`GEOMETRY_EPS`] degrees.
pub fn detects(sensor: &SensorSpec, p: &Point) -> bool {
    if distance(p) > sensor.range_m {
        return false;
    }
    match sensor.coverage() {
        Coverage::Circle { .. } => true,
        Coverage::Sector { fov_deg, .. } => bearing_deg(p).abs() <= fov_deg / 2.0 + GEOMETRY_EPS,
    }
}
