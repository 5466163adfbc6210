//! Values exchanged between the partitioner, the workers and the merger
//! within a single cycle.

use super::{GridChunk, Position};

/// Inclusive column range of the grid plus the candidate positions falling in it,
/// owned by exactly one worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workload {
    pub first_col: usize,
    pub last_col: usize,
    pub candidates: Vec<Position>,
}

impl Workload {
    pub fn starting_at(first_col: usize) -> Self {
        Self {
            first_col,
            last_col: first_col,
            candidates: Vec::new(),
        }
    }

    /// Number of columns covered
    pub const fn width(&self) -> usize {
        self.last_col + 1 - self.first_col
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Cells whose state flipped during a cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeList {
    pub deaths: Vec<Position>,
    pub births: Vec<Position>,
}

impl ChangeList {
    /// Append another change list. No dedup: each position belongs to one worker.
    pub fn absorb(&mut self, other: ChangeList) {
        self.deaths.extend(other.deaths);
        self.births.extend(other.births);
    }

    pub fn len(&self) -> usize {
        self.deaths.len() + self.births.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deaths.is_empty() && self.births.is_empty()
    }
}

/// Output of one worker for one workload.
#[derive(Clone, Debug)]
pub struct WorkerResult {
    /// First grid column covered by `chunk`
    pub column_offset: usize,
    pub chunk: GridChunk,
    pub changes: ChangeList,
    /// Cells alive after the step, used to reseed candidates
    pub living: Vec<Position>,
}
