mod action;
mod candidates;
mod cell;
mod grid;
mod merger;
mod patterns;
mod position;
mod simulation;
mod worker;
mod workload;

pub use action::Action;
pub use candidates::CandidateSet;
pub use cell::Cell;
pub use grid::{Grid, GridChunk};
pub use merger::{Generation, mark_active, merge};
pub use patterns::{
    ALIVE_GLYPH, Drawing, live_offsets, presets, random_soup, shape_size, tiled_along_left,
    tiled_along_top,
};
pub use position::{Position, Size};
pub use simulation::{Evaluator, Frame, RedrawMode, Simulation};
pub use worker::evaluate;
pub use workload::{ChangeList, WorkerResult, Workload};
