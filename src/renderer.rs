/*
 * Renderer Module
 *
 * This module draws the simulation: a triangle per boid pointing along its
 * velocity, the repulsion radius while the mouse button is held, and the
 * optional debug overlay. Rendering runs every frame, paused or not.
 */

use nannou::prelude::*;
use tracing::error;

use crate::app::Model;
use crate::boid::Boid;
use crate::viewport::Viewport;
use crate::BOID_SIZE;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Clear the background
    draw.background().color(rgb(30u8, 30, 150));

    // Draw each boid
    for boid in model.flock.boids() {
        draw_boid(&draw, boid, &model.viewport);
    }

    // Show the area affected by the mouse
    if model.mouse_down {
        draw.ellipse()
            .xy(model.mouse_position)
            .radius(model.flock.params().click_radius)
            .no_fill()
            .stroke(rgb(255u8, 50, 50))
            .stroke_weight(2.0);
    }

    if model.show_debug {
        draw_debug_overlay(&draw, model, app.window_rect());
    }

    // Finish drawing
    if let Err(err) = draw.to_frame(app, &frame) {
        error!(error = ?err, "failed to draw frame");
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!(error = ?err, "failed to draw control panel");
    }
}

// Draw a boid as a triangle pointing in its direction of travel
pub fn draw_boid(draw: &Draw, boid: &Boid, viewport: &Viewport) {
    let points = [
        pt2(BOID_SIZE, 0.0),
        pt2(-BOID_SIZE, BOID_SIZE / 2.0),
        pt2(-BOID_SIZE, -BOID_SIZE / 2.0),
    ];

    draw.polygon()
        .color(rgb(200u8, 200, 255))
        .points(points)
        .xy(viewport.world_to_screen(boid.position))
        .rotate(viewport.screen_angle(boid.velocity));
}

// Draw debug information in the top-left corner
fn draw_debug_overlay(draw: &Draw, model: &Model, window_rect: Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let lines = model.debug_info.lines(model.flock.len(), model.flock.search_name());

    let panel_width = 220.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    draw.rect()
        .x_y(window_rect.left() + panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(rgba(0.0, 0.0, 0.0, 0.6));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(WHITE)
            .font_size(14);
    }
}
