//! `adas-cov` CLI: one-shot detection, scenario runs, replay of recorded runs.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use detection_core::engine::FrameReport;
use detection_core::metrics::CoverageMetrics;
use detection_core::types::ObstacleCategory;
use sensor_models::sensor::{SensorKind, SensorSpec};
use sim::config::{ObstacleSetting, SceneConfig, SensorSettings};
use sim::replay::{load_replay, save_replay, ReplayLog};
use sim::runner::{stop_channel, FrameSink, SimulationLoop};
use sim::scenarios::{Scenario, ScenarioKind};
use sim::scene::SceneDescription;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "adas-cov", about = "Top-down sensor coverage and detection demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single static obstacle against the active sensors.
    Detect {
        /// Obstacle x position (meters, +x is forward)
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        x: f64,
        /// Obstacle y position (meters, +y is left)
        #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, value_enum, default_value = "pedestrian")]
        category: CategoryArg,
        #[command(flatten)]
        sensors: SensorArgs,
        /// Write the renderer scene description to a JSON file
        #[arg(long)]
        scene_out: Option<PathBuf>,
    },
    /// Run a named scene: evaluated once if static, animated otherwise.
    RunScenario {
        #[arg(value_enum)]
        scenario: ScenarioKind,
        /// Random seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Replace the preset configuration with a JSON scene file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep only these obstacle indices (e.g. `--select 0,2`)
        #[arg(long, value_delimiter = ',')]
        select: Option<Vec<usize>>,
        /// Stop after this many frames
        #[arg(long)]
        frames: Option<u64>,
        /// Pause between frames (milliseconds)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Approach speed (meters per frame)
        #[arg(long)]
        speed: Option<f64>,
        #[command(flatten)]
        sensors: SensorArgs,
        /// Print only the final frame
        #[arg(long)]
        quiet: bool,
        /// Output metrics to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also save the full replay log
        #[arg(long)]
        save_replay: Option<PathBuf>,
        /// Write the final frame's scene description to a JSON file
        #[arg(long)]
        scene_out: Option<PathBuf>,
    },
    /// Load a recorded run, print its frames and metrics.
    Replay {
        /// Path to replay JSON file
        input: PathBuf,
        /// Output metrics to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Pedestrian,
    Vehicle,
    Object,
}

impl From<CategoryArg> for ObstacleCategory {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Pedestrian => ObstacleCategory::Pedestrian,
            CategoryArg::Vehicle => ObstacleCategory::Vehicle,
            CategoryArg::Object => ObstacleCategory::Object,
        }
    }
}

/// Sensor toggles and geometry overrides shared by the subcommands.
#[derive(Args, Clone, Debug, Default)]
struct SensorArgs {
    #[arg(long)]
    no_camera: bool,
    #[arg(long)]
    no_radar: bool,
    #[arg(long)]
    no_lidar: bool,
    /// Camera field of view (degrees)
    #[arg(long)]
    camera_fov: Option<f64>,
    /// Camera range (meters)
    #[arg(long)]
    camera_range: Option<f64>,
    /// Radar field of view (degrees)
    #[arg(long)]
    radar_fov: Option<f64>,
    /// Radar range (meters)
    #[arg(long)]
    radar_range: Option<f64>,
    /// LiDAR range (meters)
    #[arg(long)]
    lidar_range: Option<f64>,
}

impl SensorArgs {
    fn apply(&self, s: &mut SensorSettings) {
        for (kind, off) in [
            (SensorKind::Camera, self.no_camera),
            (SensorKind::Radar, self.no_radar),
            (SensorKind::Lidar, self.no_lidar),
        ] {
            if off {
                s.set_enabled(kind, false);
            }
        }
        if let Some(v) = self.camera_fov {
            s.camera_fov_deg = v;
        }
        if let Some(v) = self.camera_range {
            s.camera_range_m = v;
        }
        if let Some(v) = self.radar_fov {
            s.radar_fov_deg = v;
        }
        if let Some(v) = self.radar_range {
            s.radar_range_m = v;
        }
        if let Some(v) = self.lidar_range {
            s.lidar_range_m = v;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect {
            x,
            y,
            category,
            sensors,
            scene_out,
        } => {
            run_detect(x, y, category.into(), &sensors, scene_out.as_deref())?;
        }
        Commands::RunScenario {
            scenario,
            seed,
            config,
            select,
            frames,
            delay_ms,
            speed,
            sensors,
            quiet,
            output,
            save_replay: save_path,
            scene_out,
        } => {
            let mut scenario = Scenario::build(scenario, seed);
            if let Some(path) = config {
                scenario.config = SceneConfig::load(&path)?;
            }
            if let Some(indices) = select {
                scenario.config.select_obstacles(&indices);
            }
            let motion = &mut scenario.config.motion;
            if frames.is_some() {
                motion.max_frames = frames;
            }
            if let Some(ms) = delay_ms {
                motion.frame_delay_ms = ms;
            }
            if let Some(v) = speed {
                scenario.config.override_speed(v);
            }
            sensors.apply(&mut scenario.config.sensors);

            let outputs = Outputs {
                metrics: output.as_deref(),
                replay: save_path.as_deref(),
                scene: scene_out.as_deref(),
            };
            run_scenario(scenario, quiet, &outputs)?;
        }
        Commands::Replay { input, output } => {
            run_replay(&input, output.as_deref())?;
        }
    }

    Ok(())
}

struct Outputs<'a> {
    metrics: Option<&'a Path>,
    replay: Option<&'a Path>,
    scene: Option<&'a Path>,
}

/// Prints frames as they arrive and keeps metrics plus, if asked, every frame.
struct TerminalSink {
    quiet: bool,
    metrics: CoverageMetrics,
    frames: Option<Vec<FrameReport>>,
}

impl FrameSink for TerminalSink {
    fn emit(&mut self, report: &FrameReport) {
        self.metrics.accumulate(report);
        if !self.quiet {
            println!("--- frame {} ---\n{}", report.frame, report);
        }
        if let Some(frames) = &mut self.frames {
            frames.push(report.clone());
        }
    }
}

fn write_scene(sensors: &[SensorSpec], report: &FrameReport, path: &Path) -> Result<()> {
    let scene = SceneDescription::build(sensors, report);
    std::fs::write(path, serde_json::to_string_pretty(&scene)?)
        .with_context(|| format!("writing scene to {}", path.display()))?;
    println!("Scene saved to {}", path.display());
    Ok(())
}

fn run_detect(
    x: f64,
    y: f64,
    category: ObstacleCategory,
    sensor_args: &SensorArgs,
    scene_path: Option<&Path>,
) -> Result<()> {
    let mut config = SceneConfig {
        obstacles: vec![ObstacleSetting::new(x, y, category)],
        ..Default::default()
    };
    sensor_args.apply(&mut config.sensors);

    let sim = SimulationLoop::new(config)?;
    let report = sim.evaluate_once();
    println!("{report}");

    if let Some(path) = scene_path {
        write_scene(sim.engine().sensors(), &report, path)?;
    }
    Ok(())
}

fn run_scenario(scenario: Scenario, quiet: bool, outputs: &Outputs<'_>) -> Result<()> {
    let mut sim = SimulationLoop::new(scenario.config.clone())?;
    let start = std::time::Instant::now();

    let (frames, final_report, metrics) = if scenario.is_animated() {
        println!(
            "Running scenario '{}' (seed={}, obstacles={}, frames={})... Ctrl+C to stop",
            scenario.name,
            scenario.seed,
            scenario.config.obstacles.len(),
            scenario
                .config
                .motion
                .max_frames
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
        );

        let (handle, stop) = stop_channel();
        ctrlc::set_handler(move || {
            info!("stop requested");
            handle.stop();
        })
        .context("failed to set Ctrl+C handler")?;

        let mut sink = TerminalSink {
            quiet,
            metrics: CoverageMetrics::default(),
            frames: outputs.replay.map(|_| Vec::new()),
        };
        let summary = sim.run(&stop, &mut sink);
        println!(
            "Done: {} frames ({:?}), elapsed={:.2}s",
            summary.frames,
            summary.stop_reason,
            start.elapsed().as_secs_f64()
        );
        let final_report = summary.last_report.unwrap_or_default();
        if quiet {
            println!("{final_report}");
        }
        (sink.frames.unwrap_or_default(), final_report, sink.metrics)
    } else {
        let report = sim.evaluate_once();
        println!("Scenario '{}':\n{}", scenario.name, report);
        let mut metrics = CoverageMetrics::default();
        metrics.accumulate(&report);
        (vec![report.clone()], report, metrics)
    };

    print_metrics(&metrics);

    if let Some(path) = outputs.scene {
        write_scene(sim.engine().sensors(), &final_report, path)?;
    }

    if let Some(path) = outputs.replay {
        let log = ReplayLog {
            scenario_name: scenario.name.clone(),
            seed: scenario.seed,
            config: scenario.config.clone(),
            frames,
        };
        save_replay(&log, path)?;
        info!(frames = log.frames.len(), path = %path.display(), "replay saved");
        println!("Replay saved to {}", path.display());
    }

    if let Some(path) = outputs.metrics {
        let json = serde_json::json!({
            "scenario": scenario.name,
            "seed": scenario.seed,
            "elapsed_s": start.elapsed().as_secs_f64(),
            "metrics": metrics,
            "detection_rate": metrics.detection_rate(),
        });
        std::fs::write(path, serde_json::to_string_pretty(&json)?)?;
        println!("Metrics saved to {}", path.display());
    }

    Ok(())
}

fn print_metrics(metrics: &CoverageMetrics) {
    println!(
        "Coverage: {} observations, {} undetected, detection rate {:.1}%",
        metrics.n_observations,
        metrics.n_undetected,
        metrics.detection_rate() * 100.0
    );
    for (sensor, hits) in &metrics.hits_by_sensor {
        println!(
            "  {sensor}: {hits} hits ({:.1}%)",
            metrics.sensor_rate(sensor) * 100.0
        );
    }
}

fn run_replay(input: &Path, output_path: Option<&Path>) -> Result<()> {
    let log = load_replay(input)?;
    println!(
        "Replaying '{}' ({} frames)...",
        log.scenario_name,
        log.frames.len()
    );

    for frame in &log.frames {
        println!("--- frame {} ---\n{}", frame.frame, frame);
    }

    let metrics = log.metrics();
    print_metrics(&metrics);

    if let Some(opath) = output_path {
        let json = serde_json::json!({
            "scenario": log.scenario_name,
            "seed": log.seed,
            "metrics": metrics,
            "detection_rate": metrics.detection_rate(),
        });
        std::fs::write(opath, serde_json::to_string_pretty(&json)?)?;
    }

    Ok(())
}
