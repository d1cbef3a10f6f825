/*
 * Application Module
 *
 * This module defines the nannou model for the boid simulation and the
 * per-frame update. It owns the flock, collects control signals from the
 * keyboard and the control panel, and runs at most one simulation tick per
 * frame, capped at the configured frame rate.
 */

use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou_egui::Egui;
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer;
use crate::steering::Repulsor;
use crate::ui;
use crate::viewport::Viewport;

/// Params handed from `main` to the nannou model function.
pub static PARAMS: OnceCell<SimulationParams> = OnceCell::new();

/// A control signal applied to the flock between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TogglePause,
    AddBoid,
    RemoveBoid,
}

impl Control {
    pub fn apply(self, flock: &mut Flock) {
        match self {
            Control::TogglePause => {
                flock.toggle_pause();
            }
            Control::AddBoid => flock.add_boid(),
            Control::RemoveBoid => {
                flock.remove_boid();
            }
        }
    }
}

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub viewport: Viewport,
    pub mouse_position: Point2,
    pub mouse_down: bool,
    pub show_debug: bool,
    pub draft: SimulationParams,
    pub pending: Vec<Control>,
    // Frame pacing
    pub tick_interval: Duration,
    pub tick_accumulator: Duration,
    pub last_update_time: Instant,
}

impl Model {
    /// The mouse as a repulsor in simulation space.
    pub fn repulsor(&self) -> Repulsor {
        Repulsor::new(self.viewport.screen_to_world(self.mouse_position), self.mouse_down)
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = PARAMS.get().cloned().unwrap_or_default();

    // Create the main window at the simulation's size
    let window_id = app
        .new_window()
        .title("Boids")
        .size(params.width as u32, params.height as u32)
        .resizable(false)
        .view(renderer::view)
        .key_pressed(input::key_pressed)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window was just created");

    // Create the UI
    let egui = Egui::from_window(&window);

    let tick_interval = params.tick_interval();
    let viewport = Viewport::new(params.width, params.height);
    let flock = Flock::new(params.clone()).expect("params are validated before the app starts");

    info!(width = params.width, height = params.height, fps = params.target_fps, "window ready");

    Model {
        flock,
        egui,
        debug_info: DebugInfo::default(),
        viewport,
        mouse_position: Vec2::ZERO,
        mouse_down: false,
        show_debug: false,
        draft: params,
        pending: Vec::new(),
        tick_interval,
        tick_accumulator: Duration::ZERO,
        last_update_time: Instant::now(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let actions = ui::update_ui(
        &mut model.egui,
        &model.flock,
        &mut model.draft,
        &mut model.show_debug,
        &model.debug_info,
    );

    if actions.toggle_pause {
        model.pending.push(Control::TogglePause);
    }
    if actions.add_boid {
        model.pending.push(Control::AddBoid);
    }
    if actions.remove_boid {
        model.pending.push(Control::RemoveBoid);
    }

    // Control signals and param changes land between ticks
    for control in model.pending.drain(..) {
        control.apply(&mut model.flock);
    }

    if actions.apply_params {
        match model.flock.set_params(model.draft.clone()) {
            Ok(()) => {
                model.tick_interval = model.flock.params().tick_interval();
            }
            Err(err) => {
                warn!(%err, "rejected params from control panel");
                model.draft = model.flock.params().clone();
            }
        }
    }

    // Get current time
    let now = Instant::now();
    model.tick_accumulator += now.duration_since(model.last_update_time);
    model.last_update_time = now;

    model.debug_info.ticks_this_frame = 0;
    if model.tick_accumulator >= model.tick_interval {
        let repulsor = model.repulsor();

        let started = Instant::now();
        model.flock.tick(Some(&repulsor));
        model.debug_info.tick_time = started.elapsed();
        model.debug_info.ticks_this_frame = 1;

        // One tick per frame at most; drop any backlog
        model.tick_accumulator = (model.tick_accumulator - model.tick_interval).min(model.tick_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flock() -> Flock {
        let params = SimulationParams {
            num_boids: 4,
            seed: Some(9),
            ..SimulationParams::default()
        };
        Flock::new(params).unwrap()
    }

    #[test]
    fn test_controls_drive_the_flock() {
        let mut flock = flock();

        Control::AddBoid.apply(&mut flock);
        assert_eq!(flock.len(), 5);

        Control::RemoveBoid.apply(&mut flock);
        Control::RemoveBoid.apply(&mut flock);
        assert_eq!(flock.len(), 3);

        Control::TogglePause.apply(&mut flock);
        assert!(flock.is_paused());
    }

    #[test]
    fn test_remove_control_on_empty_flock_is_harmless() {
        let mut flock = flock();
        for _ in 0..10 {
            Control::RemoveBoid.apply(&mut flock);
        }
        assert!(flock.is_empty());
    }
}
