/*
 * Flock Module
 *
 * This module owns the population and runs the per-tick pipeline:
 * wrap each boid at the screen edges, gather its neighbors, compute the
 * steering rules and integrate. Pausing freezes steering and integration
 * but boids are still wrapped.
 *
 * Membership changes and pausing are control signals the host applies
 * between ticks, never during the pass.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::boid::Boid;
use crate::error::ParamsResult;
use crate::neighbors::{BruteForce, NeighborSearch};
use crate::params::{NeighborSearchKind, SimulationParams, UpdateOrder};
use crate::spatial_grid::SpatialGrid;
use crate::steering::{self, Repulsor};

pub struct Flock {
    boids: Vec<Boid>,
    params: SimulationParams,
    paused: bool,
    ticks: u64,
    rng: StdRng,
    search: Box<dyn NeighborSearch>,
    // Scratch buffers reused across ticks
    neighbor_buf: Vec<usize>,
    close_buf: Vec<usize>,
    snapshot: Vec<Boid>,
    forces: Vec<Vec2>,
}

impl Flock {
    /// Validate `params` and spawn `params.num_boids` random boids.
    pub fn new(params: SimulationParams) -> ParamsResult<Self> {
        params.validate()?;

        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let boids = (0..params.num_boids)
            .map(|_| Boid::random(&mut rng, &params))
            .collect();

        Ok(Self::assemble(params, boids, rng))
    }

    /// Validate `params` and adopt an existing population.
    pub fn with_boids(params: SimulationParams, boids: Vec<Boid>) -> ParamsResult<Self> {
        params.validate()?;

        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self::assemble(params, boids, rng))
    }

    fn assemble(params: SimulationParams, boids: Vec<Boid>, rng: StdRng) -> Self {
        let search = build_search(&params);

        info!(
            boids = boids.len(),
            search = search.name(),
            order = ?params.update_order,
            "flock created"
        );

        Self {
            boids,
            params,
            paused: false,
            ticks: 0,
            rng,
            search,
            neighbor_buf: Vec::new(),
            close_buf: Vec::new(),
            snapshot: Vec::new(),
            forces: Vec::new(),
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Number of ticks that ran while not paused.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn search_name(&self) -> &'static str {
        self.search.name()
    }

    /// Swap in new params between ticks. The neighbor search is rebuilt when
    /// its kind or geometry changes.
    pub fn set_params(&mut self, params: SimulationParams) -> ParamsResult<()> {
        params.validate()?;

        let rebuild_search = params.neighbor_search != self.params.neighbor_search
            || params.cell_size() != self.params.cell_size()
            || params.width != self.params.width
            || params.height != self.params.height;

        self.params = params;
        if rebuild_search {
            self.search = build_search(&self.params);
        }

        info!(search = self.search.name(), order = ?self.params.update_order, "params updated");
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            debug!(paused, "pause toggled");
        }
    }

    /// Flip the pause flag and return the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    /// Append a freshly spawned random boid.
    pub fn add_boid(&mut self) {
        let boid = Boid::random(&mut self.rng, &self.params);
        self.push(boid);
    }

    pub fn push(&mut self, boid: Boid) {
        self.boids.push(boid);
        debug!(boids = self.boids.len(), "boid added");
    }

    /// Drop the most recently added boid. Does nothing on an empty flock.
    pub fn remove_boid(&mut self) -> Option<Boid> {
        let removed = self.boids.pop();
        if removed.is_some() {
            debug!(boids = self.boids.len(), "boid removed");
        }
        removed
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, repulsor: Option<&Repulsor>) {
        if self.paused {
            let (width, height) = (self.params.width, self.params.height);
            for boid in &mut self.boids {
                boid.wrap_edges(width, height);
            }
            return;
        }

        match self.params.update_order {
            UpdateOrder::Sequential => self.tick_sequential(repulsor),
            UpdateOrder::Snapshot => self.tick_snapshot(repulsor),
        }

        self.ticks += 1;
        trace!(tick = self.ticks, boids = self.boids.len(), "tick");
    }

    // Each boid is wrapped, steered and moved before the next one is looked at
    fn tick_sequential(&mut self, repulsor: Option<&Repulsor>) {
        let (width, height) = (self.params.width, self.params.height);
        self.search.rebuild(&self.boids);

        for i in 0..self.boids.len() {
            self.boids[i].wrap_edges(width, height);
            self.search.relocate(i, &self.boids);

            let force = steering_force(
                self.search.as_ref(),
                &self.boids,
                i,
                repulsor,
                &self.params,
                &mut self.neighbor_buf,
                &mut self.close_buf,
            );

            let boid = &mut self.boids[i];
            boid.apply_force(force);
            boid.update(self.params.max_speed);
            self.search.relocate(i, &self.boids);
        }
    }

    // Every boid steers against the same frozen copy of the population
    fn tick_snapshot(&mut self, repulsor: Option<&Repulsor>) {
        let (width, height) = (self.params.width, self.params.height);
        for boid in &mut self.boids {
            boid.wrap_edges(width, height);
        }

        self.snapshot.clear();
        self.snapshot.extend_from_slice(&self.boids);
        self.search.rebuild(&self.snapshot);

        self.forces.clear();
        for i in 0..self.snapshot.len() {
            let force = steering_force(
                self.search.as_ref(),
                &self.snapshot,
                i,
                repulsor,
                &self.params,
                &mut self.neighbor_buf,
                &mut self.close_buf,
            );
            self.forces.push(force);
        }

        for (boid, &force) in self.boids.iter_mut().zip(&self.forces) {
            boid.apply_force(force);
            boid.update(self.params.max_speed);
        }
    }
}

fn build_search(params: &SimulationParams) -> Box<dyn NeighborSearch> {
    match params.neighbor_search {
        NeighborSearchKind::BruteForce => Box::new(BruteForce),
        NeighborSearchKind::Grid => {
            Box::new(SpatialGrid::new(params.cell_size(), params.width, params.height))
        }
    }
}

// Weighted steering for boids[index] against the given population
fn steering_force(
    search: &dyn NeighborSearch,
    boids: &[Boid],
    index: usize,
    repulsor: Option<&Repulsor>,
    params: &SimulationParams,
    neighbor_buf: &mut Vec<usize>,
    close_buf: &mut Vec<usize>,
) -> Vec2 {
    search.neighbors_within(boids, index, params.perception_radius, neighbor_buf);

    let close: &[usize] = if params.separation_radius == params.perception_radius {
        &neighbor_buf[..]
    } else {
        search.neighbors_within(boids, index, params.separation_radius, close_buf);
        &close_buf[..]
    };

    let near = neighbor_buf.iter().map(|&j| &boids[j]);
    let close = close.iter().map(|&j| &boids[j]);

    steering::steer(&boids[index], near, close, repulsor, params).combined(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(num_boids: usize) -> SimulationParams {
        SimulationParams {
            num_boids,
            seed: Some(42),
            ..SimulationParams::default()
        }
    }

    #[test]
    fn test_flock_creation() {
        let flock = Flock::new(seeded(50)).unwrap();
        assert_eq!(flock.len(), 50);
        assert!(!flock.is_paused());
        assert_eq!(flock.ticks(), 0);
        assert_eq!(flock.search_name(), "brute force");
    }

    #[test]
    fn test_flock_rejects_invalid_params() {
        let params = SimulationParams {
            max_speed: -1.0,
            ..SimulationParams::default()
        };
        assert!(Flock::new(params.clone()).is_err());
        assert!(Flock::with_boids(params, Vec::new()).is_err());
    }

    #[test]
    fn test_flock_add_then_remove_restores_count() {
        let mut flock = Flock::new(seeded(10)).unwrap();

        flock.add_boid();
        assert_eq!(flock.len(), 11);

        flock.remove_boid();
        assert_eq!(flock.len(), 10);
    }

    #[test]
    fn test_remove_takes_the_newest_boid() {
        let mut flock = Flock::new(seeded(3)).unwrap();
        let newest = Boid::new(pt2(1.0, 2.0), vec2(3.0, 0.0));
        flock.push(newest);

        assert_eq!(flock.remove_boid(), Some(newest));
    }

    #[test]
    fn test_remove_from_empty_flock_is_noop() {
        let mut flock = Flock::new(seeded(0)).unwrap();

        assert_eq!(flock.remove_boid(), None);
        assert!(flock.is_empty());
    }

    #[test]
    fn test_paused_flock_only_wraps() {
        let boids = vec![
            Boid::new(pt2(100.0, 100.0), vec2(3.0, 0.0)),
            Boid::new(pt2(820.0, 100.0), vec2(0.0, 3.0)),
        ];
        let mut flock = Flock::with_boids(seeded(0), boids).unwrap();
        flock.set_paused(true);

        flock.tick(None);

        assert_eq!(flock.boids()[0].position, pt2(100.0, 100.0));
        assert_eq!(flock.boids()[1].position, pt2(0.0, 100.0));
        assert_eq!(flock.boids()[1].velocity, vec2(0.0, 3.0));
        assert_eq!(flock.ticks(), 0);
    }

    #[test]
    fn test_set_params_swaps_search() {
        let mut flock = Flock::new(seeded(5)).unwrap();

        let params = SimulationParams {
            neighbor_search: NeighborSearchKind::Grid,
            ..flock.params().clone()
        };
        flock.set_params(params).unwrap();
        assert_eq!(flock.search_name(), "spatial grid");

        let bad = SimulationParams {
            perception_radius: 0.0,
            ..flock.params().clone()
        };
        assert!(flock.set_params(bad).is_err());
        assert_eq!(flock.params().perception_radius, 50.0);
    }

    #[test]
    fn test_separate_separation_radius_is_used() {
        // Neighbor at 30: inside perception, outside separation
        let boids = vec![
            Boid::new(pt2(100.0, 100.0), Vec2::ZERO),
            Boid::new(pt2(130.0, 100.0), Vec2::ZERO),
        ];
        let params = SimulationParams {
            separation_radius: 20.0,
            alignment_weight: 0.0,
            ..seeded(0)
        };
        let mut flock = Flock::with_boids(params, boids).unwrap();

        flock.tick(None);

        // Only cohesion acts, pulling the first boid towards the second
        assert!(flock.boids()[0].velocity.x > 0.0);
    }
}
