/*
 * Boid Module
 *
 * This module defines the Boid struct: a point mass with a position,
 * a velocity and a per-tick acceleration accumulator.
 *
 * Positions live in screen space with the origin in the top-left corner
 * and y growing downward. The steering rules live in the steering module;
 * this module owns integration and edge wrapping.
 */

use std::f32::consts::TAU;

use nannou::prelude::*;
use rand::Rng;

use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Point2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl Boid {
    pub fn new(position: Point2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
        }
    }

    /// Spawn a boid anywhere on screen with a random heading and a speed
    /// between `min_initial_speed` and `max_speed`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, params: &SimulationParams) -> Self {
        let x = rng.gen_range(0.0..params.width);
        let y = rng.gen_range(0.0..params.height);

        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(params.min_initial_speed..=params.max_speed);
        let velocity = vec2(angle.cos(), angle.sin()) * speed;

        Self::new(pt2(x, y), velocity)
    }

    // Apply a force to the boid
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    // Update the boid's position based on its velocity and acceleration
    pub fn update(&mut self, max_speed: f32) {
        // Update velocity
        self.velocity += self.acceleration;

        // Limit speed
        let speed = self.velocity.length();
        if speed > max_speed {
            self.velocity *= max_speed / speed;
        }

        // Update position
        self.position += self.velocity;

        // Reset acceleration
        self.acceleration = Vec2::ZERO;
    }

    // Wrap the boid around the screen edges. Each axis is checked on its own,
    // so a boid leaving through a corner wraps on both axes at once.
    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        self.position.x = wrap_axis(self.position.x, width);
        self.position.y = wrap_axis(self.position.y, height);
    }
}

fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value >= bound {
        0.0
    } else if value < 0.0 {
        just_below(bound)
    } else {
        value
    }
}

// Largest f32 strictly below a positive finite bound.
fn just_below(bound: f32) -> f32 {
    if bound > 0.0 && bound.is_finite() {
        f32::from_bits(bound.to_bits() - 1)
    } else {
        bound
    }
}
