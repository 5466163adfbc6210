//! Deduplicated, column-chunked set of cells to re-evaluate next cycle,
//! and the partitioner that splits it into balanced parallel workloads.

use std::mem;

use super::{Position, Size, Workload};
use crate::config::{CELLS_PER_CHUNK, DEFAULT_COLS_PER_CHUNK, EngineConfig};
use crate::error::EngineError;

/// Candidate cell positions for the next simulation step.
///
/// Positions are stored in the bucket ("chunk") matching their column range,
/// so splitting the set by columns only walks the bucket list. The set grows
/// with the grid but never shrinks; it is replaced wholesale every cycle.
#[derive(Clone, Debug)]
pub struct CandidateSet {
    /// Extent the mask covers; may differ from the live grid size
    local_size: Size,
    cols_per_chunk: usize,
    len: usize,
    /// One flag per cell of `local_size`, column-major
    mask: Vec<bool>,
    chunks: Vec<Vec<Position>>,
}

impl CandidateSet {
    pub fn new(size: Size) -> Self {
        Self::with_chunk_budget(size, CELLS_PER_CHUNK)
    }

    /// Empty set whose chunks span roughly `cells_per_chunk` grid cells each
    pub fn with_chunk_budget(size: Size, cells_per_chunk: usize) -> Self {
        let cols_per_chunk = if size.is_empty() {
            DEFAULT_COLS_PER_CHUNK
        } else {
            (cells_per_chunk / size.height).max(1)
        };

        let mut set = Self {
            local_size: size,
            cols_per_chunk,
            len: 0,
            mask: vec![false; size.area()],
            chunks: Vec::new(),
        };
        set.chunks.resize_with(set.chunk_count(), Vec::new);
        set
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Extent currently covered without growing
    pub const fn capacity(&self) -> Size {
        self.local_size
    }

    pub const fn cols_per_chunk(&self) -> usize {
        self.cols_per_chunk
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.is_in_bounds(self.local_size) && self.mask[self.mask_index(pos)]
    }

    /// Every registered position, chunk by chunk
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.chunks.iter().flatten().copied()
    }

    const fn chunk_index(&self, col: usize) -> usize {
        col / self.cols_per_chunk
    }

    /// Buckets needed to map every column of `local_size`
    const fn chunk_count(&self) -> usize {
        self.chunk_index(self.local_size.width.saturating_sub(1)) + 1
    }

    const fn mask_index(&self, pos: Position) -> usize {
        pos.x as usize * self.local_size.height + pos.y as usize
    }

    /// Register a position. Duplicates are ignored; positions beyond the
    /// current extent grow the set first.
    pub fn register(&mut self, pos: Position) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        if let Err(e) = self.ensure_capacity(Size::new(pos.x as usize + 1, pos.y as usize + 1)) {
            log::error!("dropping candidate {pos:?}: {e}");
            return;
        }

        let idx = self.mask_index(pos);
        if !self.mask[idx] {
            self.mask[idx] = true;
            let chunk = self.chunk_index(pos.x as usize);
            self.chunks[chunk].push(pos);
            self.len += 1;
        }
    }

    /// Make sure any position within `size` can be registered. Each dimension
    /// is raised to the larger of the two extents, so a smaller `size` is a no-op.
    pub fn ensure_capacity(&mut self, size: Size) -> Result<(), EngineError> {
        self.grow_to(self.local_size.max(size))
    }

    /// Rebuild the set at exactly `size`. Asking for a smaller extent in
    /// either dimension is an invariant violation.
    pub fn grow_to(&mut self, size: Size) -> Result<(), EngineError> {
        if size == self.local_size {
            return Ok(());
        }
        self.rebuild(size)
    }

    fn rebuild(&mut self, size: Size) -> Result<(), EngineError> {
        if size.width < self.local_size.width || size.height < self.local_size.height {
            return Err(EngineError::CapacityShrink {
                from: self.local_size,
                to: size,
            });
        }

        log::trace!("candidate set grows from {:?} to {:?}", self.local_size, size);
        self.local_size = size;
        self.mask = vec![false; size.area()];
        for pos in self.chunks.iter().flatten() {
            let idx = pos.x as usize * size.height + pos.y as usize;
            self.mask[idx] = true;
        }

        let count = self.chunk_count();
        if self.chunks.len() < count {
            self.chunks.resize_with(count, Vec::new);
        }
        Ok(())
    }

    /// Split the set into disjoint column-range workloads covering
    /// `[0, width - 1]` of the grid.
    ///
    /// Small sets stay in one workload. Larger ones are spread over the
    /// configured thread count: chunks are appended to the current workload
    /// until it holds its share, then a new one starts. Once the thread budget
    /// is used up, the remainder all lands in the last workload.
    pub fn partition(&self, grid_size: Size, config: &EngineConfig) -> Vec<Workload> {
        if grid_size.width == 0 {
            return Vec::new();
        }

        let thread_count = if self.len > config.split_threshold {
            config.worker_threads()
        } else {
            1
        };
        let per_thread = self.len / thread_count;
        let last_col = grid_size.width - 1;

        let mut workloads = Vec::with_capacity(thread_count);
        let mut current = Workload::starting_at(0);

        for (idx, chunk) in self.chunks.iter().enumerate() {
            let chunk_last_col = (idx + 1) * self.cols_per_chunk - 1;
            current.candidates.extend_from_slice(chunk);
            current.last_col = chunk_last_col;

            // The set may be wider than a grid that has since shrunk
            if chunk_last_col >= last_col {
                break;
            }

            let is_full = current.len() >= per_thread;
            let budget_left = workloads.len() + 1 < thread_count;
            if is_full && budget_left {
                let next = Workload::starting_at(chunk_last_col + 1);
                workloads.push(mem::replace(&mut current, next));
            }
        }

        current.last_col = last_col;
        workloads.push(current);

        log::debug!(
            "partitioned {} candidates into {} workload(s) over {} columns",
            self.len,
            workloads.len(),
            grid_size.width
        );
        workloads
    }
}
