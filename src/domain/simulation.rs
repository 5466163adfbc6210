//! Grid-owning side of an update cycle: discrete actions, the parallel
//! simulation step and drawing insertion, packaged into a `Frame`.

use std::any::Any;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rayon::prelude::*;

use super::merger::{self, mark_active};
use super::{Action, CandidateSet, ChangeList, Drawing, Grid, Size, Workload, WorkerResult, worker};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Per-workload evaluation function run by the workers
pub type Evaluator = fn(&Workload, &Grid) -> WorkerResult;

/// How much of the canvas the renderer has to repaint for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RedrawMode {
    /// Only the positions in the change list
    #[default]
    Partial,
    /// The whole grid, after a clear or a resize
    Full,
}

/// Immutable result of one cycle, handed to the renderer.
#[derive(Clone, Debug)]
pub struct Frame {
    pub grid: Arc<Grid>,
    pub size: Size,
    pub changes: ChangeList,
    /// Candidate cells evaluated by the simulation step, 0 when paused
    pub evaluated: usize,
    pub redraw: RedrawMode,
}

/// World grid state and the sparse update machinery around it.
pub struct Simulation {
    config: EngineConfig,
    size: Size,
    grid: Arc<Grid>,
    candidates: CandidateSet,
    /// Changes accumulated since the last frame
    changes: ChangeList,
    evaluator: Evaluator,
}

impl Simulation {
    pub fn new(size: Size, config: EngineConfig) -> Self {
        Self {
            candidates: CandidateSet::with_chunk_budget(size, config.cells_per_chunk),
            grid: Arc::new(Grid::new(size)),
            changes: ChangeList::default(),
            evaluator: worker::evaluate,
            config,
            size,
        }
    }

    /// Replace the per-workload evaluation, e.g. to instrument workers
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub const fn size(&self) -> Size {
        self.size
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply the grid side of each action. Play state lives with the caller.
    pub fn apply_actions(&mut self, actions: &[Action], ui_size: Size) -> Result<(), EngineError> {
        for &action in actions {
            match action {
                Action::Clear => self.clear(),
                Action::Resize => self.resize(ui_size)?,
                Action::TogglePlay => {}
            }
        }
        Ok(())
    }

    /// Empty grid of the current size and a fresh candidate set
    pub fn clear(&mut self) {
        log::info!("clearing {}x{} grid", self.size.width, self.size.height);
        self.grid = Arc::new(Grid::new(self.size));
        self.candidates = CandidateSet::with_chunk_budget(self.size, self.config.cells_per_chunk);
        self.changes = ChangeList::default();
    }

    /// Adopt a new size, keeping live cells in the overlapping region
    pub fn resize(&mut self, size: Size) -> Result<(), EngineError> {
        if size == self.size {
            return Ok(());
        }
        log::info!(
            "resizing grid from {}x{} to {}x{}",
            self.size.width,
            self.size.height,
            size.width,
            size.height
        );
        self.candidates.ensure_capacity(size)?;
        self.grid = Arc::new(self.grid.resized(size));
        self.size = size;
        Ok(())
    }

    /// Advance one generation, evaluating only the candidate cells.
    ///
    /// Returns the number of candidates evaluated. If any worker panics the
    /// step is abandoned and the grid and candidates are left untouched.
    pub fn step(&mut self) -> Result<usize, EngineError> {
        let evaluated = self.candidates.len();
        let workloads = self.candidates.partition(self.size, &self.config);
        let results = run_workers(&workloads, &self.grid, self.evaluator)?;

        let next = merger::merge(results, self.size, &self.config);
        self.grid = Arc::new(next.grid);
        self.candidates = next.candidates;
        self.changes.absorb(next.changes);
        Ok(evaluated)
    }

    /// Stamp drawings onto the grid. Cells falling off the grid are dropped,
    /// every stamped cell becomes a candidate like a birth would.
    pub fn insert_drawings(&mut self, drawings: &[Drawing]) {
        if drawings.is_empty() {
            return;
        }
        let size = self.size;
        let grid = Arc::make_mut(&mut self.grid);

        for drawing in drawings {
            for pos in drawing.live_positions() {
                if !pos.is_in_bounds(size) {
                    continue;
                }
                if !grid.get(pos) {
                    grid.set(pos, true);
                    self.changes.births.push(pos);
                }
                mark_active(&mut self.candidates, pos, size);
            }
        }
    }

    /// Snapshot the grid and hand over the accumulated changes
    pub fn take_frame(&mut self, evaluated: usize, redraw: RedrawMode) -> Frame {
        Frame {
            grid: Arc::clone(&self.grid),
            size: self.size,
            changes: mem::take(&mut self.changes),
            evaluated,
            redraw,
        }
    }

    /// One full cycle: actions, then the step when `run` is set, then drawings.
    pub fn run_cycle(
        &mut self,
        run: bool,
        ui_size: Size,
        actions: &[Action],
        drawings: &[Drawing],
        redraw: RedrawMode,
    ) -> Result<Frame, EngineError> {
        self.apply_actions(actions, ui_size)?;
        let evaluated = if run { self.step()? } else { 0 };
        self.insert_drawings(drawings);
        Ok(self.take_frame(evaluated, redraw))
    }
}

/// Evaluate workloads in parallel on the current rayon pool; a single
/// workload runs inline.
fn run_workers(
    workloads: &[Workload],
    grid: &Grid,
    evaluator: Evaluator,
) -> Result<Vec<WorkerResult>, EngineError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        if workloads.len() > 1 {
            workloads.par_iter().map(|w| evaluator(w, grid)).collect()
        } else {
            workloads.iter().map(|w| evaluator(w, grid)).collect()
        }
    }))
    .map_err(|payload| EngineError::WorkerFailed(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}
