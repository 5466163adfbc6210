// Domain layer - sparse Life engine
pub mod domain;

// Application layer - cycle scheduling and statistics
pub mod application;

pub mod config;
pub mod error;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{
    Action, CandidateSet, Cell, Drawing, Frame, Grid, Position, RedrawMode, Simulation, Size,
    presets,
};
pub use application::{
    CycleOutcome, CycleScheduler, CycleState, FrameSink, SimulationStats, Trigger,
};
pub use config::EngineConfig;
pub use error::EngineError;
