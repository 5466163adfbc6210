mod scheduler;
mod stats;

pub use scheduler::{CycleOutcome, CycleScheduler, CycleState, FrameSink, Trigger};
pub use stats::{SimulationStats, format_number};
