//! Single-flight cycle scheduler.
//!
//! The control thread owns pending actions, pending drawings and the play
//! flag. Each accepted trigger drains them and hands one cycle to the worker
//! pool, so the control thread never waits on simulation cost. A trigger
//! arriving while a cycle is in flight is dropped, not queued.

use std::collections::BTreeSet;
use std::mem;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::EngineConfig;
use crate::domain::{Action, Drawing, Frame, RedrawMode, Simulation, Size};
use crate::error::EngineError;

/// What a finished cycle hands to its completion context.
pub type CycleOutcome = Result<Frame, EngineError>;

/// Completion context receiving each cycle's outcome, on a pool thread.
pub trait FrameSink: Send + Sync + 'static {
    fn publish(&self, outcome: CycleOutcome);
}

impl FrameSink for Sender<CycleOutcome> {
    fn publish(&self, outcome: CycleOutcome) {
        if self.send(outcome).is_err() {
            log::warn!("frame receiver is gone, dropping cycle outcome");
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CycleState {
    Idle = 0,
    Running = 1,
    /// A cycle failed; no further cycles are started
    Faulted = 2,
}

impl CycleState {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => CycleState::Idle,
            1 => CycleState::Running,
            _ => CycleState::Faulted,
        }
    }
}

/// Result of a trigger that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Started,
    /// A cycle was already running; this one is dropped
    Skipped,
}

pub struct CycleScheduler<S: FrameSink> {
    simulation: Arc<Mutex<Simulation>>,
    state: Arc<AtomicU8>,
    sink: Arc<S>,
    pool: Option<ThreadPool>,
    pending_actions: BTreeSet<Action>,
    pending_drawings: Vec<Drawing>,
    playing: bool,
    /// Set until a full redraw has been requested, so the first frame paints everything
    full_redraw_due: bool,
}

impl<S: FrameSink> CycleScheduler<S> {
    /// Scheduler with its own worker pool sized by `config.worker_threads()`
    pub fn new(config: EngineConfig, initial_size: Size, sink: S) -> Result<Self, EngineError> {
        Self::with_simulation(Simulation::new(initial_size, config), sink)
    }

    /// Scheduler driving an already set up simulation
    pub fn with_simulation(simulation: Simulation, sink: S) -> Result<Self, EngineError> {
        let threads = simulation.config().worker_threads();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("life-worker-{i}"))
            .build()
            .map_err(|e| EngineError::PoolBuild(e.to_string()))?;
        let size = simulation.size();
        log::info!(
            "cycle scheduler ready: {} worker threads, {}x{} grid",
            threads,
            size.width,
            size.height
        );

        Ok(Self {
            simulation: Arc::new(Mutex::new(simulation)),
            state: Arc::new(AtomicU8::new(CycleState::Idle as u8)),
            sink: Arc::new(sink),
            pool: Some(pool),
            pending_actions: BTreeSet::new(),
            pending_drawings: Vec::new(),
            playing: false,
            full_redraw_due: true,
        })
    }

    /// Queue an action for the next cycle; repeats collapse into one
    pub fn schedule_action(&mut self, action: Action) {
        self.pending_actions.insert(action);
    }

    /// Queue a drawing for the end of the next cycle
    pub fn schedule_drawing(&mut self, drawing: Drawing) {
        self.pending_drawings.push(drawing);
    }

    pub fn schedule_drawings(&mut self, drawings: impl IntoIterator<Item = Drawing>) {
        self.pending_drawings.extend(drawings);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn state(&self) -> CycleState {
        CycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_idle(&self) -> bool {
        self.state() == CycleState::Idle
    }

    pub fn is_shut_down(&self) -> bool {
        self.pool.is_none()
    }

    /// Try to start a cycle for a drawable area of `ui_size`.
    pub fn trigger(&mut self, ui_size: Size) -> Result<Trigger, EngineError> {
        if self.pool.is_none() {
            return Err(EngineError::ShutDown);
        }

        let idle = CycleState::Idle as u8;
        let running = CycleState::Running as u8;
        match self
            .state
            .compare_exchange(idle, running, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {}
            Err(current) if current == running => {
                log::trace!("cycle still running, skipping trigger");
                return Ok(Trigger::Skipped);
            }
            Err(_) => return Err(EngineError::Faulted),
        }

        let actions: Vec<Action> = mem::take(&mut self.pending_actions).into_iter().collect();
        let drawings = mem::take(&mut self.pending_drawings);
        let redraw = self.apply_control_actions(&actions);
        let run = self.playing;

        let simulation = Arc::clone(&self.simulation);
        let state = Arc::clone(&self.state);
        let sink = Arc::clone(&self.sink);

        let Some(pool) = self.pool.as_ref() else {
            self.state.store(idle, Ordering::Release);
            return Err(EngineError::ShutDown);
        };
        pool.spawn(move || {
            let outcome = match simulation.lock() {
                Ok(mut sim) => sim.run_cycle(run, ui_size, &actions, &drawings, redraw),
                Err(_) => Err(EngineError::Poisoned),
            };

            let next = match &outcome {
                Ok(_) => CycleState::Idle,
                Err(e) => {
                    log::error!("update cycle aborted: {e}");
                    CycleState::Faulted
                }
            };
            sink.publish(outcome);
            state.store(next as u8, Ordering::Release);
        });

        Ok(Trigger::Started)
    }

    /// Control-side effects of the drained actions
    fn apply_control_actions(&mut self, actions: &[Action]) -> RedrawMode {
        let mut redraw = if mem::take(&mut self.full_redraw_due) {
            RedrawMode::Full
        } else {
            RedrawMode::Partial
        };

        for &action in actions {
            match action {
                Action::TogglePlay => {
                    self.playing = !self.playing;
                    log::debug!("simulation {}", if self.playing { "playing" } else { "paused" });
                }
                Action::Clear | Action::Resize => redraw = RedrawMode::Full,
            }
        }
        redraw
    }

    /// Drop the worker pool without waiting for an in-flight cycle.
    /// Later triggers fail with `ShutDown`.
    pub fn shutdown(&mut self) {
        if self.pool.take().is_some() {
            log::info!("cycle scheduler shut down");
        }
    }
}
