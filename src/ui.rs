/*
 * UI Module
 *
 * The egui control panel. Sliders edit a draft copy of the simulation
 * params; nothing reaches the flock until Apply is pressed, and the flock
 * only takes the new params between ticks. Buttons map to the same control
 * signals as the keyboard shortcuts.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::params::{NeighborSearchKind, SimulationParams, UpdateOrder};

/// Control signals requested through the panel this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiActions {
    pub add_boid: bool,
    pub remove_boid: bool,
    pub toggle_pause: bool,
    pub apply_params: bool,
}

// Update the UI and return the actions the user requested
pub fn update_ui(
    egui: &mut Egui,
    flock: &Flock,
    draft: &mut SimulationParams,
    show_debug: &mut bool,
    debug_info: &DebugInfo,
) -> UiActions {
    let mut actions = UiActions::default();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.label(format!("Boids: {}", flock.len()));
            ui.label(format!("Ticks: {}", flock.ticks()));

            ui.horizontal(|ui| {
                if ui.button("Add [A]").clicked() {
                    actions.add_boid = true;
                }
                if ui.button("Remove [R]").clicked() {
                    actions.remove_boid = true;
                }
                let label = if flock.is_paused() { "Resume [Space]" } else { "Pause [Space]" };
                if ui.button(label).clicked() {
                    actions.toggle_pause = true;
                }
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut draft.separation_weight, SimulationParams::get_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut draft.alignment_weight, SimulationParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut draft.cohesion_weight, SimulationParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut draft.perception_radius, SimulationParams::get_radius_range()).text("Perception Radius"));
                ui.add(egui::Slider::new(&mut draft.separation_radius, SimulationParams::get_radius_range()).text("Separation Radius"));
                ui.add(egui::Slider::new(&mut draft.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut draft.max_force, SimulationParams::get_max_force_range()).text("Max Force"));
            });

            ui.collapsing("Mouse Repulsion", |ui| {
                ui.add(egui::Slider::new(&mut draft.click_radius, SimulationParams::get_radius_range()).text("Click Radius"));
                ui.add(egui::Slider::new(&mut draft.click_force, SimulationParams::get_max_force_range()).text("Click Force"));
            });

            ui.collapsing("Performance Tuning", |ui| {
                let mut use_grid = draft.neighbor_search == NeighborSearchKind::Grid;
                ui.checkbox(&mut use_grid, "Spatial Grid");
                draft.neighbor_search = if use_grid {
                    NeighborSearchKind::Grid
                } else {
                    NeighborSearchKind::BruteForce
                };
                ui.add(egui::Slider::new(&mut draft.cell_size_factor, SimulationParams::get_cell_size_factor_range()).text("Cell Size Factor"));

                let mut snapshot = draft.update_order == UpdateOrder::Snapshot;
                ui.checkbox(&mut snapshot, "Snapshot Updates");
                draft.update_order = if snapshot {
                    UpdateOrder::Snapshot
                } else {
                    UpdateOrder::Sequential
                };

                ui.separator();

                // Performance metrics
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Neighbor search: {}", flock.search_name()));
            });

            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    actions.apply_params = true;
                }
                if ui.button("Revert").clicked() {
                    *draft = flock.params().clone();
                }
            });

            ui.checkbox(show_debug, "Show Debug Info");
        });

    actions
}
