use std::sync::mpsc;
use std::time::Instant;

use macroquad::prelude::*;
use sparse_life::{
    Action, CycleScheduler, EngineConfig, EngineError, SimulationStats,
    config::TARGET_FPS,
    input,
    rendering::{self, GridCanvas, PanelStatus},
    ui,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Sparse Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let (frames_tx, frames_rx) = mpsc::channel();
    let mut ui_size = ui::grid_size_for_viewport();
    let mut scheduler = match CycleScheduler::new(EngineConfig::from_env(), ui_size, frames_tx) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            log::error!("cannot start the simulation: {e}");
            return;
        }
    };

    let mut canvas = GridCanvas::new(ui_size);
    let mut stats = SimulationStats::new(Instant::now());
    let mut fault: Option<EngineError> = None;
    let mut rng = ::rand::rng();

    let cycle_interval = 1.0 / TARGET_FPS as f32;
    let mut cycle_timer = 0.0;

    prevent_quit();
    loop {
        if is_quit_requested() {
            scheduler.shutdown();
            break;
        }

        let mouse_pos = mouse_position();
        let buttons = ui::create_buttons(scheduler.is_playing());

        input::process_button_clicks(&mut scheduler, &buttons, mouse_pos, ui_size, &mut rng);
        input::process_keyboard_input(&mut scheduler);

        let viewport = ui::grid_size_for_viewport();
        if viewport != ui_size {
            ui_size = viewport;
            scheduler.schedule_action(Action::Resize);
        }

        // Fixed-rate cycle timer; a cycle still in flight makes the trigger a no-op
        cycle_timer += get_frame_time();
        if cycle_timer >= cycle_interval && fault.is_none() {
            cycle_timer = 0.0;
            if let Err(e) = scheduler.trigger(ui_size) {
                log::error!("simulation stopped: {e}");
                fault = Some(e);
            }
        }

        while let Ok(outcome) = frames_rx.try_recv() {
            match outcome {
                Ok(frame) => {
                    stats.record_frame(frame.evaluated, Instant::now());
                    canvas.apply(&frame);
                }
                Err(e) => fault = Some(e),
            }
        }

        clear_background(BLACK);
        canvas.draw();

        let status = PanelStatus {
            playing: scheduler.is_playing(),
            grid_size: canvas.size(),
            stats: &stats,
            fault: fault.as_ref(),
        };
        rendering::draw_controls(&status, &buttons, mouse_pos);

        next_frame().await;
    }
}
