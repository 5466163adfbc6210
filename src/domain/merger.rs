use super::{CandidateSet, ChangeList, Grid, Position, Size, WorkerResult};
use crate::config::EngineConfig;

/// Next state assembled from one cycle's worker results.
#[derive(Clone, Debug)]
pub struct Generation {
    pub grid: Grid,
    pub changes: ChangeList,
    pub candidates: CandidateSet,
}

/// Register a live cell and its in-bound neighbors, the only cells that can
/// change on the next step.
pub fn mark_active(candidates: &mut CandidateSet, pos: Position, size: Size) {
    candidates.register(pos);
    pos.in_bound_neighbors(size)
        .for_each(|n| candidates.register(n));
}

/// Assemble the next grid, the cycle's change list and the reseeded
/// candidate set. Result order does not matter: column ranges are disjoint.
pub fn merge(
    results: impl IntoIterator<Item = WorkerResult>,
    size: Size,
    config: &EngineConfig,
) -> Generation {
    let mut grid = Grid::new(size);
    let mut changes = ChangeList::default();
    let mut candidates = CandidateSet::with_chunk_budget(size, config.cells_per_chunk);

    for result in results {
        grid.write_chunk(result.column_offset, &result.chunk);
        changes.absorb(result.changes);
        for pos in result.living {
            mark_active(&mut candidates, pos, size);
        }
    }

    Generation {
        grid,
        changes,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GridChunk, evaluate};
    use std::collections::BTreeSet;

    #[test]
    fn test_merge_writes_chunks_at_offsets() {
        let size = Size::new(6, 4);
        let mut left = GridChunk::new(3, 4);
        left.set_alive(2, 1);
        let mut right = GridChunk::new(3, 4);
        right.set_alive(0, 1);

        let results = vec![
            WorkerResult {
                column_offset: 3,
                chunk: right,
                changes: ChangeList {
                    deaths: vec![],
                    births: vec![Position::new(3, 1)],
                },
                living: vec![Position::new(3, 1)],
            },
            WorkerResult {
                column_offset: 0,
                chunk: left,
                changes: ChangeList::default(),
                living: vec![Position::new(2, 1)],
            },
        ];

        let generation = merge(results, size, &EngineConfig::default());
        let live: Vec<_> = generation.grid.live_cells().collect();
        assert_eq!(live, vec![Position::new(2, 1), Position::new(3, 1)]);
        assert_eq!(generation.changes.births, vec![Position::new(3, 1)]);
    }

    #[test]
    fn test_reseed_is_live_cells_and_neighbors() {
        let size = Size::new(8, 8);
        let mut grid = Grid::new(size);
        for pos in [Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)] {
            grid.set(pos, true);
        }
        let work = crate::domain::Workload {
            first_col: 0,
            last_col: 7,
            candidates: grid
                .live_cells()
                .flat_map(|p| std::iter::once(p).chain(p.in_bound_neighbors(size)))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };

        let generation = merge([evaluate(&work, &grid)], size, &EngineConfig::default());

        let mut expected = BTreeSet::new();
        for live in generation.grid.live_cells() {
            expected.insert(live);
            expected.extend(live.in_bound_neighbors(size));
        }
        let actual: BTreeSet<_> = generation.candidates.positions().collect();
        assert_eq!(actual, expected);
        assert_eq!(generation.candidates.len(), expected.len());
    }

    #[test]
    fn test_mark_active_corner() {
        let size = Size::new(5, 5);
        let mut candidates = CandidateSet::new(size);
        mark_active(&mut candidates, Position::new(0, 0), size);
        assert_eq!(candidates.len(), 4);
        mark_active(&mut candidates, Position::new(1, 0), size);
        assert_eq!(candidates.len(), 6);
    }
}
