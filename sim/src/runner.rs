//! Simulation loop: advance obstacles, drop the ones that left, evaluate, emit.
//!
//! # Per-frame steps while running
//! 1. Poll the stop signal
//! 2. Advance every obstacle one time step toward the vehicle
//! 3. Drop obstacles past `y_min`
//! 4. Evaluate the remaining set against the active sensors
//! 5. Hand the [`FrameReport`] to the [`FrameSink`]
//! 6. Wait the inter-frame delay (a stop arriving during the wait ends the run)
//!
//! Every run starts again from the configured obstacle positions.

use crate::config::{ConfigError, SceneConfig};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use detection_core::{
    engine::{DetectionEngine, FrameReport},
    obstacle::Obstacle,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

// ---------------------------------------------------------------------------
// Stop signal
// ---------------------------------------------------------------------------

/// Requests a running loop to stop. Dropping every handle also stops it.
#[derive(Clone, Debug)]
pub struct StopHandle {
    tx: Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        // full channel means a stop is already pending
        let _ = self.tx.try_send(());
    }
}

/// Receiving side of a stop request, polled once per frame.
#[derive(Clone, Debug)]
pub struct StopSignal {
    rx: Receiver<()>,
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        !matches!(self.rx.try_recv(), Err(TryRecvError::Empty))
    }

    /// Sleep up to `delay`; true if a stop arrived meanwhile.
    fn wait(&self, delay: std::time::Duration) -> bool {
        !matches!(self.rx.recv_timeout(delay), Err(RecvTimeoutError::Timeout))
    }
}

pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = bounded(1);
    (StopHandle { tx }, StopSignal { rx })
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Consumer of per-frame reports (renderer, logger, recorder).
pub trait FrameSink {
    fn emit(&mut self, report: &FrameReport);
}

/// Keeps every emitted frame.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub frames: Vec<FrameReport>,
}

impl FrameSink for Recorder {
    fn emit(&mut self, report: &FrameReport) {
        self.frames.push(report.clone());
    }
}

// ---------------------------------------------------------------------------
// Loop
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoopState {
    /// No active run; static scenes evaluate once per interaction
    #[default]
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The stop signal fired (or its handle went away)
    Stopped,
    /// The configured frame count was reached
    FrameLimit,
}

/// Outcome of one run. `last_report` is the final frame.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub frames: u64,
    pub stop_reason: StopReason,
    pub last_report: Option<FrameReport>,
}

pub struct SimulationLoop {
    config: SceneConfig,
    engine: DetectionEngine,
    state: LoopState,
}

impl SimulationLoop {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = DetectionEngine::new(config.active_sensors()?);
        Ok(Self {
            config,
            engine,
            state: LoopState::Idle,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn engine(&self) -> &DetectionEngine {
        &self.engine
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Single evaluation of the configured obstacles where they stand.
    pub fn evaluate_once(&self) -> FrameReport {
        self.engine.evaluate(0, &self.config.initial_obstacles())
    }

    /// Advance every obstacle one step and drop the ones past `y_min`.
    pub fn step(&self, obstacles: &[Obstacle]) -> Vec<Obstacle> {
        let motion = &self.config.motion;
        obstacles
            .iter()
            .map(|o| o.advance(motion.dt, o.speed.unwrap_or(motion.speed)))
            .filter(|o| {
                let gone = o.is_out_of_bounds(motion.y_min);
                if gone {
                    trace!(obstacle = %o.id, y = o.position.y, "obstacle left the scene");
                }
                !gone
            })
            .collect()
    }

    /// Run until `stop` fires or the frame limit is reached.
    pub fn run(&mut self, stop: &StopSignal, sink: &mut dyn FrameSink) -> RunSummary {
        let motion = self.config.motion.clone();
        let mut obstacles = self.config.initial_obstacles();
        let mut frame = 0u64;
        let mut last_report = None;

        self.state = LoopState::Running;
        info!(
            obstacles = obstacles.len(),
            sensors = self.engine.sensors().len(),
            max_frames = ?motion.max_frames,
            "simulation started"
        );

        let stop_reason = loop {
            if motion.max_frames.is_some_and(|max| frame >= max) {
                break StopReason::FrameLimit;
            }
            if stop.is_stopped() {
                break StopReason::Stopped;
            }

            obstacles = self.step(&obstacles);
            frame += 1;

            let report = self.engine.evaluate(frame, &obstacles);
            debug!(
                frame,
                active = report.obstacles.len(),
                undetected = report.undetected().count(),
                "frame evaluated"
            );
            sink.emit(&report);
            last_report = Some(report);

            if stop.wait(motion.frame_delay()) {
                break StopReason::Stopped;
            }
        };

        self.state = LoopState::Idle;
        info!(frames = frame, reason = ?stop_reason, "simulation stopped");

        RunSummary {
            frames: frame,
            stop_reason,
            last_report,
        }
    }
}
