use super::{Cell, Position, Size};

/// Dense boolean cell matrix, stored column-major so that a run of
/// columns is one contiguous slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: Size,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with all cells dead
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cells: vec![false; size.area()],
        }
    }

    pub const fn size(&self) -> Size {
        self.size
    }

    /// Index of an in-bounds position in the flat cell array
    const fn index(&self, pos: Position) -> usize {
        pos.x as usize * self.size.height + pos.y as usize
    }

    /// Cell state at `pos`; off-grid positions read as dead
    pub fn get(&self, pos: Position) -> bool {
        pos.is_in_bounds(self.size) && self.cells[self.index(pos)]
    }

    /// Set cell state at `pos`, ignoring off-grid positions
    pub fn set(&mut self, pos: Position, alive: bool) {
        if pos.is_in_bounds(self.size) {
            let idx = self.index(pos);
            self.cells[idx] = alive;
        }
    }

    pub fn cell(&self, pos: Position) -> Cell {
        Cell::from(self.get(pos))
    }

    /// Count live neighbors. Neighbors falling off the grid are not counted,
    /// there is no wrapping.
    pub fn count_live_neighbors(&self, pos: Position) -> u8 {
        pos.in_bound_neighbors(self.size)
            .filter(|&n| self.cells[self.index(n)])
            .count() as u8
    }

    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Positions of every live cell, column by column
    pub fn live_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let height = self.size.height.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(idx, _)| Position::new((idx / height) as i32, (idx % height) as i32))
    }

    /// New grid of `size` keeping every live cell of the overlapping region
    pub fn resized(&self, size: Size) -> Self {
        let mut next = Self::new(size);
        let cols = self.size.width.min(size.width);
        let rows = self.size.height.min(size.height);
        for x in 0..cols {
            let src = x * self.size.height;
            let dst = x * size.height;
            next.cells[dst..dst + rows].copy_from_slice(&self.cells[src..src + rows]);
        }
        next
    }

    /// Copy a computed column block into place, starting at its column offset.
    /// Columns past the right edge are dropped.
    pub fn write_chunk(&mut self, column_offset: usize, chunk: &GridChunk) {
        if chunk.height != self.size.height || column_offset >= self.size.width {
            return;
        }
        let cols = chunk.width.min(self.size.width - column_offset);
        let start = column_offset * self.size.height;
        let len = cols * self.size.height;
        self.cells[start..start + len].copy_from_slice(&chunk.cells[..len]);
    }
}

/// Column block of a grid produced by a single worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridChunk {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl GridChunk {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// Mark a cell alive, with `local_x` relative to the chunk's first column
    pub fn set_alive(&mut self, local_x: usize, y: usize) {
        if local_x < self.width && y < self.height {
            self.cells[local_x * self.height + y] = true;
        }
    }

    pub fn is_alive(&self, local_x: usize, y: usize) -> bool {
        local_x < self.width && y < self.height && self.cells[local_x * self.height + y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: Size, cells: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(size);
        for &(x, y) in cells {
            grid.set(Position::new(x, y), true);
        }
        grid
    }

    #[test]
    fn test_get_set_and_bounds() {
        let mut grid = Grid::new(Size::new(10, 5));
        grid.set(Position::new(9, 4), true);
        assert!(grid.get(Position::new(9, 4)));
        assert!(!grid.get(Position::new(4, 9)));

        // Off-grid writes are ignored, reads are dead
        grid.set(Position::new(10, 0), true);
        grid.set(Position::new(-1, 0), true);
        assert!(!grid.get(Position::new(10, 0)));
        assert_eq!(grid.count_alive(), 1);
    }

    #[test]
    fn test_count_neighbors_does_not_wrap() {
        let grid = grid_with(Size::new(10, 10), &[(9, 0), (9, 9), (0, 9), (1, 0)]);
        // On a torus (0,0) would see all four; bounded it only sees (1,0)
        assert_eq!(grid.count_live_neighbors(Position::new(0, 0)), 1);
    }

    #[test]
    fn test_count_neighbors_blinker() {
        let grid = grid_with(Size::new(10, 10), &[(4, 5), (5, 5), (6, 5)]);
        assert_eq!(grid.count_live_neighbors(Position::new(5, 5)), 2);
        assert_eq!(grid.count_live_neighbors(Position::new(5, 4)), 3);
        assert_eq!(grid.count_live_neighbors(Position::new(5, 6)), 3);
    }

    #[test]
    fn test_resize_keeps_overlap() {
        let grid = grid_with(Size::new(10, 10), &[(1, 1), (8, 2), (2, 8)]);

        let smaller = grid.resized(Size::new(5, 5));
        assert_eq!(smaller.size(), Size::new(5, 5));
        assert_eq!(smaller.live_cells().collect::<Vec<_>>(), vec![Position::new(1, 1)]);

        let larger = grid.resized(Size::new(20, 12));
        assert_eq!(larger.count_alive(), 3);
        assert!(larger.get(Position::new(8, 2)));
        assert!(larger.get(Position::new(2, 8)));
    }

    #[test]
    fn test_write_chunk_at_offset() {
        let mut grid = Grid::new(Size::new(6, 3));
        let mut chunk = GridChunk::new(2, 3);
        chunk.set_alive(0, 1);
        chunk.set_alive(1, 2);

        grid.write_chunk(4, &chunk);
        assert!(grid.get(Position::new(4, 1)));
        assert!(grid.get(Position::new(5, 2)));
        assert_eq!(grid.count_alive(), 2);
    }

    #[test]
    fn test_write_chunk_clips_right_edge() {
        let mut grid = Grid::new(Size::new(5, 2));
        let mut chunk = GridChunk::new(3, 2);
        chunk.set_alive(0, 0);
        chunk.set_alive(2, 1);

        grid.write_chunk(3, &chunk);
        assert!(grid.get(Position::new(3, 0)));
        assert_eq!(grid.count_alive(), 1);
    }

    #[test]
    fn test_live_cells_column_major() {
        let grid = grid_with(Size::new(3, 3), &[(2, 0), (0, 2), (1, 1)]);
        let live: Vec<_> = grid.live_cells().collect();
        assert_eq!(
            live,
            vec![Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)]
        );
    }
}
