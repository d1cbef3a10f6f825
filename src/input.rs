/*
 * Input Module
 *
 * This module handles user input events for the boid simulation.
 *
 * Controls:
 * - Space: pause / resume
 * - A: add a boid
 * - R: remove the most recently added boid
 * - Left mouse button (held): repel boids from the cursor
 *
 * Key presses only queue control signals; the update step applies them
 * between ticks.
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;

use crate::app::{Control, Model};

// Keyboard handler
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    let control = match key {
        Key::Space => Control::TogglePause,
        Key::A => Control::AddBoid,
        Key::R => Control::RemoveBoid,
        _ => return,
    };
    model.pending.push(control);
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    // Clicks on the control panel don't repel boids
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.mouse_down = true;
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.mouse_down = false;
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
