use super::{ChangeList, Grid, GridChunk, Workload, WorkerResult};

/// Evaluate one workload against a read-only grid snapshot.
///
/// Only the workload's candidates are examined; every other cell in its
/// column range is dead in the produced chunk. Candidates that no longer lie
/// on the grid are skipped.
pub fn evaluate(workload: &Workload, grid: &Grid) -> WorkerResult {
    let size = grid.size();
    let mut chunk = GridChunk::new(workload.width(), size.height);
    let mut changes = ChangeList::default();
    let mut living = Vec::with_capacity(workload.len() / 5);

    for &pos in &workload.candidates {
        if !pos.is_in_bounds(size) {
            continue;
        }

        let was = grid.cell(pos);
        let next = was.evolve(grid.count_live_neighbors(pos));

        if next.is_alive() {
            chunk.set_alive(pos.x as usize - workload.first_col, pos.y as usize);
            living.push(pos);
        }

        match (was.is_alive(), next.is_alive()) {
            (false, true) => changes.births.push(pos),
            (true, false) => changes.deaths.push(pos),
            _ => {}
        }
    }

    WorkerResult {
        column_offset: workload.first_col,
        chunk,
        changes,
        living,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Position, Size};

    fn grid_with(size: Size, cells: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(size);
        for &(x, y) in cells {
            grid.set(Position::new(x, y), true);
        }
        grid
    }

    fn workload(first: usize, last: usize, cells: &[(i32, i32)]) -> Workload {
        Workload {
            first_col: first,
            last_col: last,
            candidates: cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
        }
    }

    #[test]
    fn test_blinker_center_column() {
        let grid = grid_with(Size::new(10, 10), &[(4, 5), (5, 5), (6, 5)]);
        let work = workload(4, 6, &[(4, 5), (5, 4), (5, 5), (5, 6), (6, 5)]);

        let result = evaluate(&work, &grid);
        assert_eq!(result.column_offset, 4);
        assert_eq!(result.chunk.width(), 3);
        assert!(result.chunk.is_alive(1, 4));
        assert!(result.chunk.is_alive(1, 5));
        assert!(result.chunk.is_alive(1, 6));
        assert!(!result.chunk.is_alive(0, 5));

        assert_eq!(result.changes.births, vec![Position::new(5, 4), Position::new(5, 6)]);
        assert_eq!(result.changes.deaths, vec![Position::new(4, 5), Position::new(6, 5)]);
        assert_eq!(result.living.len(), 3);
    }

    #[test]
    fn test_corner_block_is_stable() {
        // Each block cell has 3 neighbors, all in-bounds
        let grid = grid_with(Size::new(4, 4), &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let work = workload(0, 3, &[(0, 0), (1, 0), (0, 1), (1, 1)]);

        let result = evaluate(&work, &grid);
        assert!(result.changes.is_empty());
        assert_eq!(result.living.len(), 4);
    }

    #[test]
    fn test_edge_cell_decays() {
        // (0,1) keeps 1 in-bound neighbor; an unbounded grid would also count
        // the wrapped cells at x = 4
        let grid = grid_with(Size::new(5, 3), &[(0, 1), (1, 1), (4, 0), (4, 2)]);
        let work = workload(0, 4, &[(0, 1)]);

        let result = evaluate(&work, &grid);
        assert_eq!(result.changes.deaths, vec![Position::new(0, 1)]);
        assert!(result.living.is_empty());
    }

    #[test]
    fn test_skips_out_of_bounds_candidates() {
        let grid = grid_with(Size::new(3, 3), &[(0, 0), (1, 0), (2, 0)]);
        let work = workload(0, 2, &[(1, 1), (7, 7), (1, 5)]);

        let result = evaluate(&work, &grid);
        assert_eq!(result.changes.births, vec![Position::new(1, 1)]);
        assert_eq!(result.living, vec![Position::new(1, 1)]);
    }

    #[test]
    fn test_non_candidates_are_dead_in_chunk() {
        // A live cell left out of the candidates is not copied forward
        let grid = grid_with(Size::new(3, 3), &[(1, 1)]);
        let result = evaluate(&workload(0, 2, &[]), &grid);
        assert!(!result.chunk.is_alive(1, 1));
        assert!(result.changes.is_empty());
    }
}
