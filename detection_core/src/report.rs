//! Text rendering of frame reports for terminals and logs.

use crate::engine::{FrameReport, ObstacleReport};
use std::fmt;

/// Placeholder shown when no active sensor detects an obstacle.
pub const NONE_LABEL: &str = "None";

/// Distance label drawn next to an obstacle, e.g. `"11.18 m"`.
pub fn distance_label(distance_m: f64) -> String {
    format!("{distance_m:.2} m")
}

/// `detected_by` joined with commas, or [`NONE_LABEL`].
pub fn detected_by_label(report: &ObstacleReport) -> String {
    if report.detected_by.is_empty() {
        NONE_LABEL.to_string()
    } else {
        report.detected_by.join(", ")
    }
}

impl fmt::Display for ObstacleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({:.1}, {:.1}): distance {}, detected by: {}",
            self.category,
            self.position.x,
            self.position.y,
            distance_label(self.distance_m),
            detected_by_label(self),
        )
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.obstacles.is_empty() {
            return f.write_str("No active obstacles");
        }
        for (i, o) in self.obstacles.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{o}")?;
        }
        Ok(())
    }
}
