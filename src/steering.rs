/*
 * Steering Module
 *
 * The flocking rules as pure functions over a boid and its neighbors:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * plus the interactive mouse repulsion. Each rule follows Reynolds'
 * "steering = desired - velocity" and is clamped to max_force on its own.
 * The weighted sum is not clamped again.
 */

use nannou::prelude::*;

use crate::boid::Boid;
use crate::params::SimulationParams;

/// An external point that pushes nearby boids away while active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsor {
    pub point: Point2,
    pub active: bool,
}

impl Repulsor {
    pub fn new(point: Point2, active: bool) -> Self {
        Self { point, active }
    }
}

/// The individual rule outputs for one boid, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub alignment: Vec2,
    pub cohesion: Vec2,
    pub separation: Vec2,
    pub repulsion: Vec2,
}

impl Steering {
    /// Weighted sum of the rules. Repulsion is added unweighted.
    pub fn combined(&self, params: &SimulationParams) -> Vec2 {
        self.alignment * params.alignment_weight
            + self.cohesion * params.cohesion_weight
            + self.separation * params.separation_weight
            + self.repulsion
    }
}

/// Scale `v` down to `max` if it is longer, keeping its direction.
#[inline]
pub fn limit(v: Vec2, max: f32) -> Vec2 {
    let length = v.length();
    if length > max {
        v * (max / length)
    } else {
        v
    }
}

// Scale to max speed if the vector is non-zero, otherwise leave it at zero
#[inline]
fn desired(direction: Vec2, max_speed: f32) -> Vec2 {
    let length = direction.length();
    if length > 0.0 {
        direction * (max_speed / length)
    } else {
        direction
    }
}

// Calculate alignment force (steer towards average heading of neighbors)
pub fn alignment<'a, I>(boid: &Boid, neighbors: I, params: &SimulationParams) -> Vec2
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vec2::ZERO;
    let mut count = 0;

    for other in neighbors {
        sum += other.velocity;
        count += 1;
    }

    if count == 0 {
        return Vec2::ZERO;
    }

    let average = sum / count as f32;
    limit(desired(average, params.max_speed) - boid.velocity, params.max_force)
}

// Calculate cohesion force (steer towards average position of neighbors)
pub fn cohesion<'a, I>(boid: &Boid, neighbors: I, params: &SimulationParams) -> Vec2
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vec2::ZERO;
    let mut count = 0;

    for other in neighbors {
        sum += other.position;
        count += 1;
    }

    if count == 0 {
        return Vec2::ZERO;
    }

    let center = sum / count as f32;
    limit(desired(center - boid.position, params.max_speed) - boid.velocity, params.max_force)
}

// Calculate separation force (avoid crowding neighbors)
pub fn separation<'a, I>(boid: &Boid, neighbors: I, params: &SimulationParams) -> Vec2
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vec2::ZERO;
    let mut count = 0;

    for other in neighbors {
        let diff = boid.position - other.position;
        let d = diff.length();

        // Weight by distance; coincident boids contribute nothing
        if d > 0.0 {
            sum += diff / d;
        }
        count += 1;
    }

    if count == 0 {
        return Vec2::ZERO;
    }

    let average = sum / count as f32;

    // A zero average is returned as-is, without the velocity correction
    if average.length() > 0.0 {
        limit(desired(average, params.max_speed) - boid.velocity, params.max_force)
    } else {
        average
    }
}

/// Push away from an active repulsor, fading linearly from `click_force` at
/// the point to zero at `click_radius`.
pub fn repulsion(boid: &Boid, repulsor: &Repulsor, params: &SimulationParams) -> Vec2 {
    if !repulsor.active {
        return Vec2::ZERO;
    }

    let diff = boid.position - repulsor.point;
    let d = diff.length();

    if params.click_epsilon < d && d < params.click_radius {
        let strength = params.click_force * (params.click_radius - d) / params.click_radius;
        diff / d * strength
    } else {
        Vec2::ZERO
    }
}

/// Run every rule for one boid. `neighbors` feeds alignment and cohesion,
/// `close` feeds separation.
pub fn steer<'a, N, C>(
    boid: &Boid,
    neighbors: N,
    close: C,
    repulsor: Option<&Repulsor>,
    params: &SimulationParams,
) -> Steering
where
    N: IntoIterator<Item = &'a Boid>,
    N::IntoIter: Clone,
    C: IntoIterator<Item = &'a Boid>,
{
    let neighbors = neighbors.into_iter();

    Steering {
        alignment: alignment(boid, neighbors.clone(), params),
        cohesion: cohesion(boid, neighbors, params),
        separation: separation(boid, close, params),
        repulsion: repulsor.map_or(Vec2::ZERO, |r| repulsion(boid, r, params)),
    }
}
