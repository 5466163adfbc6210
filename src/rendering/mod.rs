use macroquad::prelude::*;

use crate::application::{SimulationStats, format_number};
use crate::domain::{Frame, Position, RedrawMode, Size};
use crate::error::EngineError;
use crate::ui::{Button, CELL_MARGIN_PX, CELL_PX, PANEL_WIDTH, panel_x};

const ALIVE_COLOR: Color = Color::new(0.0, 1.0, 150.0 / 255.0, 1.0);
const DEAD_COLOR: Color = Color::new(15.0 / 255.0, 15.0 / 255.0, 15.0 / 255.0, 1.0);
const BACKGROUND_COLOR: Color = BLACK;

const PITCH: u32 = CELL_PX + CELL_MARGIN_PX;

/// CPU-side image of the grid, mirrored to a GPU texture.
///
/// Partial frames only touch the cells in their change list; a full frame
/// or a size change repaints every cell.
pub struct GridCanvas {
    size: Size,
    image: Image,
    texture: Texture2D,
}

impl GridCanvas {
    pub fn new(size: Size) -> Self {
        let image = blank_image(size);
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Nearest);
        Self { size, image, texture }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Bring the canvas up to date with a received frame
    pub fn apply(&mut self, frame: &Frame) {
        if frame.size != self.size {
            *self = Self::new(frame.size);
            self.repaint(frame);
        } else {
            match frame.redraw {
                RedrawMode::Full => self.repaint(frame),
                RedrawMode::Partial => {
                    for &pos in &frame.changes.deaths {
                        self.paint_cell(pos, DEAD_COLOR);
                    }
                    for &pos in &frame.changes.births {
                        self.paint_cell(pos, ALIVE_COLOR);
                    }
                }
            }
        }
        self.texture.update(&self.image);
    }

    fn repaint(&mut self, frame: &Frame) {
        self.image = blank_image(self.size);
        for pos in frame.grid.live_cells() {
            self.paint_cell(pos, ALIVE_COLOR);
        }
    }

    fn paint_cell(&mut self, pos: Position, color: Color) {
        if !pos.is_in_bounds(self.size) {
            return;
        }
        let left = pos.x as u32 * PITCH;
        let top = pos.y as u32 * PITCH;
        for dy in 0..CELL_PX {
            for dx in 0..CELL_PX {
                self.image.set_pixel(left + dx, top + dy, color);
            }
        }
    }

    /// Draw the canvas at the top-left of the grid area
    pub fn draw(&self) {
        draw_texture_ex(
            &self.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(
                    self.image.width() as f32,
                    self.image.height() as f32,
                )),
                ..Default::default()
            },
        );
    }
}

/// Image with every cell drawn dead and the margins in background color
fn blank_image(size: Size) -> Image {
    let width = pixel_extent(size.width);
    let height = pixel_extent(size.height);
    let mut image = Image::gen_image_color(width, height, BACKGROUND_COLOR);
    for x in 0..size.width {
        for y in 0..size.height {
            let (left, top) = (x as u32 * PITCH, y as u32 * PITCH);
            for dy in 0..CELL_PX {
                for dx in 0..CELL_PX {
                    image.set_pixel(left + dx, top + dy, DEAD_COLOR);
                }
            }
        }
    }
    image
}

fn pixel_extent(cells: usize) -> u16 {
    let px = (cells as u32 * PITCH).max(1);
    u16::try_from(px).unwrap_or(u16::MAX)
}

/// What the side panel reports besides the buttons
pub struct PanelStatus<'a> {
    pub playing: bool,
    pub grid_size: Size,
    pub stats: &'a SimulationStats,
    pub fault: Option<&'a EngineError>,
}

/// Draw control panel background
fn draw_panel_background() {
    draw_rectangle(
        panel_x(),
        0.0,
        PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 255),
    );
}

/// Draw the control panel with buttons and simulation info
pub fn draw_controls(status: &PanelStatus<'_>, buttons: &[Button], mouse_pos: (f32, f32)) {
    draw_panel_background();
    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let px = panel_x();
    let info_color = Color::from_rgba(180, 180, 180, 255);

    let controls = [
        ("Controls:", 290.0, 14.0, WHITE),
        ("Space: Play/Pause", 305.0, 12.0, GRAY),
        ("C: Clear", 318.0, 12.0, GRAY),
    ];
    controls.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });

    let size = status.grid_size;
    let grid_info = format!(
        "Grid: {}x{} ({} cells)",
        size.width,
        size.height,
        format_number(size.area())
    );
    draw_text(&grid_info, px, 350.0, 12.0, info_color);

    let (state_text, state_color) = match (status.fault, status.playing) {
        (Some(_), _) => ("Stopped", Color::from_rgba(255, 0, 0, 255)),
        (None, true) => ("Running", Color::from_rgba(0, 255, 0, 255)),
        (None, false) => ("Paused", Color::from_rgba(255, 165, 0, 255)),
    };

    let labels = [
        ("Status:", 385.0, 16.0, WHITE),
        (state_text, 405.0, 16.0, state_color),
        ("FPS:", 440.0, 16.0, WHITE),
        (&status.stats.fps_label(), 460.0, 14.0, info_color),
        ("Cells computed:", 495.0, 16.0, WHITE),
        (&status.stats.cells_label(), 515.0, 14.0, info_color),
    ];
    labels.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });

    if let Some(err) = status.fault {
        draw_text(&err.to_string(), px, 550.0, 11.0, Color::from_rgba(255, 100, 100, 255));
    }
}
