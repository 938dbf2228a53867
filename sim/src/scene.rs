//! Renderer-facing scene description.
//!
//! Pure data: the external renderer decides how to draw it. Coordinates are
//! meters in the vehicle frame.

use detection_core::{
    engine::FrameReport,
    report::distance_label,
    types::{Footprint, ObstacleCategory, ObstacleId},
};
use sensor_models::{
    geometry::{point, Point},
    sensor::{Coverage, SensorKind, SensorSpec},
};
use serde::{Deserialize, Serialize};

/// Half-width of the square view around the vehicle (meters).
pub const VIEW_HALF_EXTENT: f64 = 30.0;
/// Arc samples for a sector outline.
pub const SECTOR_SAMPLES: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Closed polygon
    Polygon { points: Vec<Point> },
    Circle { center: Point, radius: f64 },
    /// Axis-aligned rectangle from its lower-left corner
    Rect { corner: Point, width: f64, height: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorShape {
    pub kind: SensorKind,
    pub label: String,
    pub color: String,
    pub shape: Shape,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleShape {
    pub id: ObstacleId,
    pub category: ObstacleCategory,
    pub color: String,
    pub shape: Shape,
    /// Distance label placed next to the obstacle
    pub label: String,
    pub detected: bool,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub frame: u64,
    pub half_extent: f64,
    pub vehicle: Shape,
    pub sensors: Vec<SensorShape>,
    pub obstacles: Vec<ObstacleShape>,
}

fn sensor_color(kind: SensorKind) -> &'static str {
    match kind {
        SensorKind::Camera => "blue",
        SensorKind::Radar => "red",
        SensorKind::Lidar => "green",
    }
}

fn category_color(category: ObstacleCategory) -> &'static str {
    match category {
        ObstacleCategory::Pedestrian => "orange",
        ObstacleCategory::Vehicle => "purple",
        ObstacleCategory::Object => "gray",
    }
}

fn footprint_shape(center: Point, footprint: Footprint) -> Shape {
    match footprint {
        Footprint::Circle { radius } => Shape::Circle { center, radius },
        Footprint::Rect { width, length } => Shape::Rect {
            corner: point(center.x - width / 2.0, center.y - length / 2.0),
            width,
            height: length,
        },
    }
}

/// The ego vehicle: a 2 × 4 m rectangle centered on the origin.
pub fn vehicle_shape() -> Shape {
    footprint_shape(Point::origin(), ObstacleCategory::Vehicle.footprint())
}

pub fn sensor_shape(sensor: &SensorSpec) -> SensorShape {
    let coverage = sensor.coverage();
    let (shape, label) = match coverage {
        Coverage::Sector { .. } => (
            Shape::Polygon {
                points: coverage.outline(SECTOR_SAMPLES),
            },
            sensor.name.clone(),
        ),
        Coverage::Circle { range_m } => (
            Shape::Circle {
                center: Point::origin(),
                radius: range_m,
            },
            format!("{} (360°)", sensor.name),
        ),
    };
    SensorShape {
        kind: sensor.kind,
        label,
        color: sensor_color(sensor.kind).to_string(),
        shape,
    }
}

impl SceneDescription {
    pub fn build(sensors: &[SensorSpec], report: &FrameReport) -> Self {
        let obstacles = report
            .obstacles
            .iter()
            .map(|o| ObstacleShape {
                id: o.id,
                category: o.category,
                color: category_color(o.category).to_string(),
                shape: footprint_shape(o.position, o.category.footprint()),
                label: distance_label(o.distance_m),
                detected: o.is_detected(),
            })
            .collect();

        Self {
            frame: report.frame,
            half_extent: VIEW_HALF_EXTENT,
            vehicle: vehicle_shape(),
            sensors: sensors.iter().map(sensor_shape).collect(),
            obstacles,
        }
    }
}
