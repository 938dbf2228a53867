//! Scene presets.
//!
//! Each preset is a named [`SceneConfig`] plus whether it animates. All presets
//! are deterministic given the same seed.

use crate::config::{MotionSettings, ObstacleSetting, SceneConfig};
use detection_core::types::ObstacleCategory;
use serde::{Deserialize, Serialize};

/// Which pre-defined scene to load.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenarioKind {
    /// One static pedestrian ahead-left of the vehicle
    Single,
    /// The fixed obstacle list; any subset may be selected
    Predefined,
    /// Three obstacles walking toward the vehicle until stopped
    Animated,
    /// Road-lane traffic approaching in three lanes, 100 frames
    Highway,
    /// 40 randomly placed obstacles, 100 frames
    Crowd,
}

/// A fully configured scene. Whether it animates is `config.motion.animate`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub seed: u64,
    pub config: SceneConfig,
}

/// The fixed obstacle list offered by the `predefined` scene.
pub fn predefined_obstacles() -> Vec<ObstacleSetting> {
    use ObstacleCategory::*;
    vec![
        ObstacleSetting::new(10.0, 5.0, Pedestrian),
        ObstacleSetting::new(-8.0, 3.0, Vehicle),
        ObstacleSetting::new(5.0, -10.0, Object),
        ObstacleSetting::new(0.0, 18.0, Pedestrian),
        ObstacleSetting::new(22.0, -4.0, Vehicle),
    ]
}

impl Scenario {
    /// Runs the simulation loop when true; evaluated once otherwise.
    pub fn is_animated(&self) -> bool {
        self.config.motion.animate
    }

    /// Build the named scenario. Uses `seed` for repeatability.
    pub fn build(kind: ScenarioKind, seed: u64) -> Self {
        match kind {
            ScenarioKind::Single => Self::single(seed),
            ScenarioKind::Predefined => Self::predefined(seed),
            ScenarioKind::Animated => Self::animated(seed),
            ScenarioKind::Highway => Self::highway(seed),
            ScenarioKind::Crowd => Self::crowd(seed),
        }
    }

    fn single(seed: u64) -> Self {
        Scenario {
            name: "single".into(),
            seed,
            config: SceneConfig {
                obstacles: vec![ObstacleSetting::new(10.0, 5.0, ObstacleCategory::Pedestrian)],
                ..Default::default()
            },
        }
    }

    fn predefined(seed: u64) -> Self {
        Scenario {
            name: "predefined".into(),
            seed,
            config: SceneConfig {
                obstacles: predefined_obstacles(),
                ..Default::default()
            },
        }
    }

    fn animated(seed: u64) -> Self {
        use ObstacleCategory::*;
        Scenario {
            name: "animated".into(),
            seed,
            config: SceneConfig {
                obstacles: vec![
                    ObstacleSetting::new(5.0, 20.0, Pedestrian),
                    ObstacleSetting::new(-6.0, 25.0, Vehicle),
                    ObstacleSetting::new(12.0, 28.0, Object),
                ],
                motion: MotionSettings {
                    animate: true,
                    speed: 0.5,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    fn highway(seed: u64) -> Self {
        use ObstacleCategory::*;
        const LANES: [f64; 3] = [-3.5, 0.0, 3.5];
        let obstacles = vec![
            ObstacleSetting::new(LANES[0], 30.0, Vehicle),
            ObstacleSetting {
                speed: Some(1.0),
                ..ObstacleSetting::new(LANES[1], 26.0, Vehicle)
            },
            ObstacleSetting {
                speed: Some(0.8),
                ..ObstacleSetting::new(LANES[2], 22.0, Vehicle)
            },
            // on the shoulder
            ObstacleSetting {
                speed: Some(0.2),
                ..ObstacleSetting::new(7.0, 15.0, Pedestrian)
            },
        ];
        Scenario {
            name: "highway".into(),
            seed,
            config: SceneConfig {
                obstacles,
                motion: MotionSettings {
                    animate: true,
                    speed: 0.6,
                    max_frames: Some(100),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    fn crowd(seed: u64) -> Self {
        use rand::prelude::*;
        use rand_chacha::ChaCha8Rng;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let obstacles = (0..40)
            .map(|_| {
                let category =
                    ObstacleCategory::ALL[rng.gen_range(0..ObstacleCategory::ALL.len())];
                ObstacleSetting {
                    speed: Some(rng.gen_range(0.1..=2.0)),
                    ..ObstacleSetting::new(
                        rng.gen_range(-30.0..=30.0),
                        rng.gen_range(-30.0..=30.0),
                        category,
                    )
                }
            })
            .collect();

        Scenario {
            name: "crowd".into(),
            seed,
            config: SceneConfig {
                obstacles,
                motion: MotionSettings {
                    animate: true,
                    max_frames: Some(100),
                    frame_delay_ms: 0,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }
}
