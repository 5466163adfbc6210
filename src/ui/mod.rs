mod button;

pub use button::{Button, Command};

use macroquad::prelude::{screen_height, screen_width};

use crate::domain::Size;

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

/// Side of a drawn cell, in pixels
pub const CELL_PX: u32 = 3;
/// Spacing between neighboring cells, in pixels
pub const CELL_MARGIN_PX: u32 = 1;

/// Gap between tiled toolbar shapes, in cells
pub const TILE_GAP: usize = 4;
/// Share of live cells in a random soup
pub const SOUP_DENSITY: f64 = 0.2;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the grid area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the grid area
pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Grid size that fits the drawable area at the current window size
pub fn grid_size_for_viewport() -> Size {
    Size::from_viewport(
        grid_area_width(),
        grid_area_height(),
        CELL_PX as f32,
        CELL_MARGIN_PX as f32,
    )
}

/// Toolbar in the side panel; the first label follows the play state
pub fn create_buttons(playing: bool) -> Vec<Button> {
    let px = panel_x();
    let play_label = if playing { "Pause" } else { "Play" };
    [
        (play_label, Command::PlayPause),
        ("Clear", Command::Clear),
        ("Glider Guns", Command::GliderGuns),
        ("Pulsars", Command::Pulsars),
        ("Random", Command::Random),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (label, command))| {
        let y = 20.0 + i as f32 * (BUTTON_HEIGHT + 10.0);
        Button::new(px, y, PANEL_WIDTH, BUTTON_HEIGHT, label, command)
    })
    .collect()
}
