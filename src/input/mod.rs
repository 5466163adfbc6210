use ::rand::Rng;
use macroquad::prelude::{KeyCode, is_key_pressed};

use crate::application::{CycleScheduler, FrameSink};
use crate::domain::{Action, Size, presets, random_soup, tiled_along_left, tiled_along_top};
use crate::ui::{Button, Command, SOUP_DENSITY, TILE_GAP};

/// Queue the effect of a toolbar command for the next cycle
pub fn apply_command<S: FrameSink, R: Rng>(
    scheduler: &mut CycleScheduler<S>,
    command: Command,
    grid_size: Size,
    rng: &mut R,
) {
    match command {
        Command::PlayPause => scheduler.schedule_action(Action::TogglePlay),
        Command::Clear => scheduler.schedule_action(Action::Clear),
        Command::GliderGuns => {
            scheduler.schedule_drawings(tiled_along_top(presets::GLIDER_GUN, grid_size, TILE_GAP));
        }
        Command::Pulsars => {
            scheduler.schedule_drawings(tiled_along_left(presets::PULSAR, grid_size, TILE_GAP));
        }
        Command::Random => {
            scheduler.schedule_drawing(random_soup(grid_size, SOUP_DENSITY, rng));
        }
    }
}

/// Process button clicks
pub fn process_button_clicks<S: FrameSink, R: Rng>(
    scheduler: &mut CycleScheduler<S>,
    buttons: &[Button],
    mouse_pos: (f32, f32),
    grid_size: Size,
    rng: &mut R,
) {
    for button in buttons.iter().filter(|btn| btn.is_clicked(mouse_pos)) {
        apply_command(scheduler, button.command(), grid_size, rng);
    }
}

/// Keyboard shortcuts
pub fn process_keyboard_input<S: FrameSink>(scheduler: &mut CycleScheduler<S>) {
    const KEY_ACTIONS: [(KeyCode, Action); 2] = [
        (KeyCode::Space, Action::TogglePlay),
        (KeyCode::C, Action::Clear),
    ];

    for (key, action) in KEY_ACTIONS {
        if is_key_pressed(key) {
            scheduler.schedule_action(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CycleOutcome;
    use crate::config::EngineConfig;
    use ::rand::SeedableRng;
    use ::rand::rngs::StdRng;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_commands_queue_for_next_cycle() {
        let size = Size::new(60, 30);
        let (tx, rx) = mpsc::channel::<CycleOutcome>();
        let config = EngineConfig::default().thread_count(2);
        let mut scheduler = CycleScheduler::new(config, size, tx).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        apply_command(&mut scheduler, Command::Random, size, &mut rng);
        apply_command(&mut scheduler, Command::GliderGuns, size, &mut rng);
        apply_command(&mut scheduler, Command::PlayPause, size, &mut rng);
        assert!(!scheduler.is_playing());

        scheduler.trigger(size).unwrap();
        let frame = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        assert!(scheduler.is_playing());
        assert!(frame.grid.count_alive() > 36);
    }
}
