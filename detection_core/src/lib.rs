//! `detection_core` - Obstacles and the per-frame sensor detection engine.
//!
//! # Module layout
//! - [`types`]    - Obstacle IDs, categories and footprints
//! - [`obstacle`] - Obstacle state and straight-line motion
//! - [`engine`]   - Obstacle × sensor evaluation producing a [`FrameReport`]
//! - [`report`]   - Text summaries and distance labels
//! - [`metrics`]  - Per-sensor coverage statistics over a run

pub mod engine;
pub mod metrics;
pub mod obstacle;
pub mod report;
pub mod types;

pub use engine::{evaluate, DetectionEngine, DetectionResult, FrameReport, ObstacleReport};
pub use metrics::CoverageMetrics;
pub use obstacle::Obstacle;
pub use types::{Footprint, ObstacleCategory, ObstacleId};
