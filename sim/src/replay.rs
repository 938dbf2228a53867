//! Replay: serialize/deserialize recorded runs for offline analysis and rendering.

use crate::config::SceneConfig;
use anyhow::Context;
use detection_core::{engine::FrameReport, metrics::CoverageMetrics};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// A full recorded run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub scenario_name: String,
    pub seed: u64,
    /// Configuration the run started from
    pub config: SceneConfig,
    /// Every emitted frame in order
    pub frames: Vec<FrameReport>,
}

impl ReplayLog {
    pub fn metrics(&self) -> CoverageMetrics {
        let mut metrics = CoverageMetrics::default();
        for frame in &self.frames {
            metrics.accumulate(frame);
        }
        metrics
    }
}

/// Save a replay log to a JSON file.
pub fn save_replay(log: &ReplayLog, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating replay log {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), log)
        .with_context(|| format!("writing replay log {}", path.display()))?;
    Ok(())
}

/// Load a replay log from a JSON file.
pub fn load_replay(path: &Path) -> anyhow::Result<ReplayLog> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening replay log {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing replay log {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{stop_channel, Recorder, SimulationLoop};
    use crate::scenarios::{Scenario, ScenarioKind};

    #[test]
    fn recorded_run_survives_save_and_load() {
        let mut scenario = Scenario::build(ScenarioKind::Highway, 1);
        scenario.config.motion.frame_delay_ms = 0;
        scenario.config.motion.max_frames = Some(5);
        let mut sim = SimulationLoop::new(scenario.config.clone()).unwrap();
        let (_handle, stop) = stop_channel();
        let mut rec = Recorder::default();
        sim.run(&stop, &mut rec);

        let log = ReplayLog {
            scenario_name: scenario.name.clone(),
            seed: scenario.seed,
            config: scenario.config.clone(),
            frames: rec.frames,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highway.json");
        save_replay(&log, &path).unwrap();
        let loaded = load_replay(&path).unwrap();

        assert_eq!(loaded.frames.len(), 5);
        assert_eq!(loaded.scenario_name, "highway");
        assert_eq!(loaded.metrics(), log.metrics());
        assert_eq!(loaded.metrics().n_frames, 5);
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_replay(&path).unwrap_err();
        assert!(err.to_string().contains("absent.json"), "{err}");
    }

    #[test]
    fn malformed_file_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_replay(&path).unwrap_err();
        assert!(err.to_string().contains("parsing replay log"), "{err}");
        assert!(err.to_string().contains("broken.json"), "{err}");
    }
}
