use thiserror::Error;

use crate::domain::Size;

/// Failures surfaced by the engine and the cycle scheduler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A candidate set was asked to shrink; this is a caller bug.
    #[error("candidate set cannot shrink from {from:?} to {to:?}")]
    CapacityShrink { from: Size, to: Size },
    /// A worker panicked while evaluating its workload; the cycle was dropped.
    #[error("worker execution failed: {0}")]
    WorkerFailed(String),
    #[error("a previous cycle failed, the scheduler no longer accepts triggers")]
    Faulted,
    #[error("the scheduler has been shut down")]
    ShutDown,
    #[error("simulation state lock was poisoned")]
    Poisoned,
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),
}
