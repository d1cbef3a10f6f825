/*
 * Boid Flocking Simulation - Module Definitions
 *
 * The simulation core (boid, steering, neighbor search, flock) is free of
 * any windowing code and can be driven headless. The remaining modules make
 * up the nannou host shell used by the `boids` binary.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use error::{ParamsError, ParamsResult};
pub use flock::Flock;
pub use neighbors::{BruteForce, NeighborSearch};
pub use params::{NeighborSearchKind, SimulationParams, UpdateOrder};
pub use spatial_grid::SpatialGrid;
pub use steering::{Repulsor, Steering};
pub use viewport::Viewport;

// Simulation core
pub mod boid;
pub mod error;
pub mod flock;
pub mod neighbors;
pub mod params;
pub mod spatial_grid;
pub mod steering;

// Host shell
pub mod app;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;
pub mod viewport;

// Constants
pub const BOID_SIZE: f32 = 10.0;
