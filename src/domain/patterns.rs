use rand::Rng;

use super::{Position, Size};

/// Character marking a live cell in a textual shape; anything else is dead.
pub const ALIVE_GLYPH: char = 'O';

/// A textual shape stamped onto the grid with its top-left corner at `offset`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawing {
    pub shape: Vec<String>,
    pub offset: Position,
}

impl Drawing {
    pub fn new(shape: &[&str], offset: Position) -> Self {
        Self {
            shape: shape.iter().map(|row| row.to_string()).collect(),
            offset,
        }
    }

    /// Grid positions of the live cells, before any bounds check
    pub fn live_positions(&self) -> impl Iterator<Item = Position> + '_ {
        live_offsets(&self.shape).map(|cell| cell.offset_by(self.offset))
    }
}

/// Bounding size of a textual shape
pub fn shape_size<S: AsRef<str>>(shape: &[S]) -> Size {
    let width = shape
        .iter()
        .map(|row| row.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    Size::new(width, shape.len())
}

/// Live cells of a textual shape relative to its top-left corner
pub fn live_offsets<S: AsRef<str>>(shape: &[S]) -> impl Iterator<Item = Position> + '_ {
    shape.iter().enumerate().flat_map(|(y, row)| {
        row.as_ref()
            .chars()
            .enumerate()
            .filter(|&(_, c)| c == ALIVE_GLYPH)
            .map(move |(x, _)| Position::new(x as i32, y as i32))
    })
}

/// As many copies of `shape` as fit side by side along the top edge,
/// `gap` columns apart.
pub fn tiled_along_top(shape: &[&str], grid_size: Size, gap: usize) -> Vec<Drawing> {
    let shape_size = shape_size(shape);
    if shape_size.width == 0 {
        return Vec::new();
    }
    let step = shape_size.width + gap;
    (0..)
        .map(|i| i * step)
        .take_while(|&x| x + shape_size.width <= grid_size.width)
        .map(|x| Drawing::new(shape, Position::new(x as i32, 0)))
        .collect()
}

/// As many copies of `shape` as fit stacked along the left edge,
/// `gap` rows apart.
pub fn tiled_along_left(shape: &[&str], grid_size: Size, gap: usize) -> Vec<Drawing> {
    let shape_size = shape_size(shape);
    if shape_size.height == 0 {
        return Vec::new();
    }
    let step = shape_size.height + gap;
    (0..)
        .map(|i| i * step)
        .take_while(|&y| y + shape_size.height <= grid_size.height)
        .map(|y| Drawing::new(shape, Position::new(0, y as i32)))
        .collect()
}

/// Random soup covering `size`, each cell alive with probability `density`
pub fn random_soup<R: Rng>(size: Size, density: f64, rng: &mut R) -> Drawing {
    let density = density.clamp(0.0, 1.0);
    let shape = (0..size.height)
        .map(|_| {
            (0..size.width)
                .map(|_| if rng.random_bool(density) { ALIVE_GLYPH } else { '.' })
                .collect()
        })
        .collect();
    Drawing {
        shape,
        offset: Position::new(0, 0),
    }
}

/// Classic Game of Life shapes in plaintext form
pub mod presets {
    /// Simplest spaceship, moves one cell diagonally every 4 generations
    pub const GLIDER: &[&str] = &[
        ".O.",
        "..O",
        "OOO",
    ];

    pub const BLINKER: &[&str] = &["OOO"];

    pub const TOAD: &[&str] = &[
        ".OOO",
        "OOO.",
    ];

    pub const BEACON: &[&str] = &[
        "OO..",
        "O...",
        "...O",
        "..OO",
    ];

    /// Period 3 oscillator
    pub const PULSAR: &[&str] = &[
        "..OOO...OOO..",
        ".............",
        "O....O.O....O",
        "O....O.O....O",
        "O....O.O....O",
        "..OOO...OOO..",
        ".............",
        "..OOO...OOO..",
        "O....O.O....O",
        "O....O.O....O",
        "O....O.O....O",
        ".............",
        "..OOO...OOO..",
    ];

    /// Lightweight spaceship
    pub const LWSS: &[&str] = &[
        ".O..O",
        "O....",
        "O...O",
        "OOOO.",
    ];

    /// Gosper glider gun, emits a glider every 30 generations
    pub const GLIDER_GUN: &[&str] = &[
        "........................O...........",
        "......................O.O...........",
        "............OO......OO............OO",
        "...........O...O....OO............OO",
        "OO........O.....O...OO..............",
        "OO........O...O.OO....O.O...........",
        "..........O.....O.......O...........",
        "...........O...O....................",
        "............OO......................",
    ];

    /// Methuselah, stabilizes after 1103 generations
    pub const R_PENTOMINO: &[&str] = &[
        ".OO",
        "OO.",
        ".O.",
    ];

    /// Methuselah, stabilizes after 5206 generations
    pub const ACORN: &[&str] = &[
        ".O.....",
        "...O...",
        "OO..OOO",
    ];

    pub const BLOCK: &[&str] = &[
        "OO",
        "OO",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_preset_populations() {
        let expected = [
            ("Glider", presets::GLIDER, 5),
            ("Blinker", presets::BLINKER, 3),
            ("Toad", presets::TOAD, 6),
            ("Beacon", presets::BEACON, 6),
            ("Pulsar", presets::PULSAR, 48),
            ("LWSS", presets::LWSS, 9),
            ("Gosper Glider Gun", presets::GLIDER_GUN, 36),
            ("R-pentomino", presets::R_PENTOMINO, 5),
            ("Acorn", presets::ACORN, 7),
            ("Block", presets::BLOCK, 4),
        ];
        for (name, shape, count) in expected {
            assert_eq!(live_offsets(shape).count(), count, "{name}");
        }
    }

    #[test]
    fn test_shape_size() {
        assert_eq!(shape_size(presets::GLIDER_GUN), Size::new(36, 9));
        assert_eq!(shape_size(presets::PULSAR), Size::new(13, 13));
        assert_eq!(shape_size::<&str>(&[]), Size::new(0, 0));
    }

    #[test]
    fn test_drawing_offsets_cells() {
        let drawing = Drawing::new(presets::GLIDER, Position::new(1, 1));
        let cells: Vec<_> = drawing.live_positions().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(2, 1),
                Position::new(3, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_only_alive_glyph_counts() {
        assert_eq!(live_offsets(&["#o*O."]).collect::<Vec<_>>(), vec![Position::new(3, 0)]);
    }

    #[test]
    fn test_tiling_fits_grid() {
        let top = tiled_along_top(presets::GLIDER_GUN, Size::new(100, 50), 10);
        // 36 + 10 + 36 fits in 100, a third copy would end at 128
        assert_eq!(top.len(), 2);
        assert_eq!(top[1].offset, Position::new(46, 0));

        let left = tiled_along_left(presets::PULSAR, Size::new(20, 12), 3);
        assert!(left.is_empty());
    }

    #[test]
    fn test_random_soup_density() {
        let mut rng = StdRng::seed_from_u64(7);
        let size = Size::new(100, 100);
        let soup = random_soup(size, 0.3, &mut rng);
        assert_eq!(shape_size(&soup.shape), size);
        let alive = soup.live_positions().count();
        assert!((2_500..3_500).contains(&alive), "alive = {alive}");

        assert_eq!(random_soup(size, 0.0, &mut rng).live_positions().count(), 0);
    }
}
