//! Fundamental types shared by the engine, the simulator and the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identifier types
// ---------------------------------------------------------------------------

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ObstacleId(pub u64);

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Obstacle category + footprint
// ---------------------------------------------------------------------------

/// What kind of thing an obstacle is. Only affects how it is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleCategory {
    Pedestrian,
    Vehicle,
    Object,
}

impl ObstacleCategory {
    pub const ALL: [ObstacleCategory; 3] = [
        ObstacleCategory::Pedestrian,
        ObstacleCategory::Vehicle,
        ObstacleCategory::Object,
    ];

    /// Fixed drawing footprint for the category (meters).
    pub fn footprint(&self) -> Footprint {
        match self {
            ObstacleCategory::Pedestrian => Footprint::Circle { radius: 0.5 },
            ObstacleCategory::Vehicle => Footprint::Rect { width: 2.0, length: 4.0 },
            ObstacleCategory::Object => Footprint::Rect { width: 1.0, length: 1.0 },
        }
    }
}

impl fmt::Display for ObstacleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObstacleCategory::Pedestrian => "Pedestrian",
            ObstacleCategory::Vehicle => "Vehicle",
            ObstacleCategory::Object => "Object",
        };
        f.write_str(s)
    }
}

/// Footprint centered on the obstacle position.
/// `width` spans x, `length` spans y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Footprint {
    Circle { radius: f64 },
    Rect { width: f64, length: f64 },
}
