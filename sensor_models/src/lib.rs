//! `sensor_models` - Vehicle-frame geometry and sensor coverage regions.

pub mod geometry;
pub mod sensor;

pub use geometry::{bearing_deg, distance, point, polar_to_cartesian, Point, GEOMETRY_EPS};
pub use sensor::{detects, Coverage, SensorError, SensorKind, SensorSpec};
