/// Integer (column, row) pair on the world grid.
/// Signed so that neighbors of edge cells can be expressed and then filtered out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the position lies on a grid of the given size
    pub const fn is_in_bounds(self, size: Size) -> bool {
        self.x >= 0
            && self.y >= 0
            && (self.x as usize) < size.width
            && (self.y as usize) < size.height
    }

    /// Position shifted by the given offset
    pub const fn offset_by(self, offset: Position) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }

    /// The 8 surrounding positions, in or out of any grid
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| Position::new(self.x + dx, self.y + dy))
    }

    /// Surrounding positions that fall on a grid of the given size
    pub fn in_bound_neighbors(self, size: Size) -> impl Iterator<Item = Position> {
        self.neighbors().filter(move |n| n.is_in_bounds(size))
    }
}

/// Drawable extent of the grid in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub const fn area(self) -> usize {
        self.width * self.height
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn contains(self, pos: Position) -> bool {
        pos.is_in_bounds(self)
    }

    /// Number of whole cells fitting in a viewport, where every cell but the
    /// last is followed by `margin_px` of spacing.
    pub fn from_viewport(width_px: f32, height_px: f32, cell_px: f32, margin_px: f32) -> Self {
        let pitch = cell_px + margin_px;
        if pitch <= 0.0 {
            return Self::default();
        }
        let cols = ((width_px + margin_px) / pitch).floor().max(0.0);
        let rows = ((height_px + margin_px) / pitch).floor().max(0.0);
        Self::new(cols as usize, rows as usize)
    }

    /// Per-dimension maximum of two sizes
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}
