//! `sim` - Scene configuration, presets, the simulation loop, scene output, replay.

pub mod config;
pub mod replay;
pub mod runner;
pub mod scenarios;
pub mod scene;

pub use config::{ConfigError, SceneConfig};
pub use replay::{load_replay, save_replay, ReplayLog};
pub use runner::{stop_channel, FrameSink, LoopState, Recorder, SimulationLoop, StopHandle};
pub use scenarios::{Scenario, ScenarioKind};
pub use scene::SceneDescription;
