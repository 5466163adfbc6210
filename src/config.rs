//! Engine tuning constants and the configuration builder.

use std::env;
use std::num::NonZeroUsize;
use std::thread;

/// Candidate count at or below which a cycle runs as a single workload
pub const DEFAULT_SPLIT_THRESHOLD: usize = 5_000;

/// Grid cells covered by one candidate chunk (columns × height)
pub const CELLS_PER_CHUNK: usize = 10_000;

/// Columns per chunk when the grid has no rows yet
pub const DEFAULT_COLS_PER_CHUNK: usize = 10;

/// Cycles triggered per second by the front end timer
pub const TARGET_FPS: f64 = 30.0;

/// Window over which simulation statistics are averaged
pub const STATS_WINDOW_MS: u128 = 2_000;

pub const THREADS_ENV: &str = "SPARSE_LIFE_THREADS";
pub const SPLIT_THRESHOLD_ENV: &str = "SPARSE_LIFE_SPLIT_THRESHOLD";

/// Configuration for an engine instance.
///
/// `EngineConfig::default()` matches the hardware; individual knobs can be
/// overridden with the builder methods or through the environment.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Worker thread target. `None` means available hardware parallelism.
    pub thread_count: Option<usize>,
    /// Candidates needed before a cycle is split across workers.
    pub split_threshold: usize,
    /// Cell budget per candidate chunk.
    pub cells_per_chunk: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thread_count: None,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            cells_per_chunk: CELLS_PER_CHUNK,
        }
    }
}

impl EngineConfig {
    /// Set an explicit worker thread target.
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    pub fn split_threshold(mut self, n: usize) -> Self {
        self.split_threshold = n;
        self
    }

    pub fn cells_per_chunk(mut self, n: usize) -> Self {
        self.cells_per_chunk = n.max(1);
        self
    }

    /// Defaults overridden by `SPARSE_LIFE_THREADS` and
    /// `SPARSE_LIFE_SPLIT_THRESHOLD` when they hold valid numbers.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(n) = read_env_usize(THREADS_ENV) {
            config = config.thread_count(n);
        }
        if let Some(n) = read_env_usize(SPLIT_THRESHOLD_ENV) {
            config = config.split_threshold(n);
        }
        config
    }

    /// Resolved worker thread target, always at least 1
    pub fn worker_threads(&self) -> usize {
        self.thread_count
            .unwrap_or_else(|| thread::available_parallelism().map_or(1, NonZeroUsize::get))
            .max(1)
    }
}

fn read_env_usize(key: &str) -> Option<usize> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}: expected a non-negative integer");
            None
        }
    }
}
