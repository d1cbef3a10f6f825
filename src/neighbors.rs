/*
 * Neighbor Search Module
 *
 * A pluggable neighbor query so the flock can swap the O(n) scan for a
 * spatial structure without touching the steering rules.
 *
 * Contract shared by every implementation:
 * - the queried boid itself is never returned (identity is the index)
 * - a boid is a neighbor iff its distance is strictly less than the radius
 * - indices come back in ascending order
 */

use crate::boid::Boid;

pub trait NeighborSearch {
    /// Rebuild internal structures from the current boid positions.
    fn rebuild(&mut self, boids: &[Boid]);

    /// Tell the search that `boids[index]` moved since the last rebuild.
    fn relocate(&mut self, _index: usize, _boids: &[Boid]) {}

    /// Fill `out` with the indices of boids within `radius` of `boids[index]`.
    fn neighbors_within(&self, boids: &[Boid], index: usize, radius: f32, out: &mut Vec<usize>);

    /// Human-readable name for logs and the debug overlay.
    fn name(&self) -> &'static str;
}

/// Checks every boid against every other boid.
#[derive(Debug, Default, Clone, Copy)]
pub struct BruteForce;

impl NeighborSearch for BruteForce {
    fn rebuild(&mut self, _boids: &[Boid]) {
        // Nothing to rebuild for brute force.
    }

    fn neighbors_within(&self, boids: &[Boid], index: usize, radius: f32, out: &mut Vec<usize>) {
        out.clear();
        let position = boids[index].position;

        for (j, other) in boids.iter().enumerate() {
            if j != index && position.distance(other.position) < radius {
                out.push(j);
            }
        }
    }

    fn name(&self) -> &'static str {
        "brute force"
    }
}

/// Indices of every boid within `radius` of `boids[index]`, by linear scan.
pub fn neighbors(boids: &[Boid], index: usize, radius: f32) -> Vec<usize> {
    let mut out = Vec::new();
    BruteForce.neighbors_within(boids, index, radius, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::*;

    fn at(x: f32, y: f32) -> Boid {
        Boid::new(pt2(x, y), Vec2::ZERO)
    }

    #[test]
    fn test_excludes_self_but_keeps_coincident_boids() {
        let boids = [at(10.0, 10.0), at(10.0, 10.0), at(500.0, 500.0)];

        assert_eq!(neighbors(&boids, 0, 50.0), vec![1]);
        assert_eq!(neighbors(&boids, 1, 50.0), vec![0]);
        assert!(neighbors(&boids, 2, 50.0).is_empty());
    }

    #[test]
    fn test_boid_exactly_at_radius_is_excluded() {
        let boids = [at(0.0, 0.0), at(30.0, 40.0), at(29.0, 40.0)];

        assert_eq!(neighbors(&boids, 0, 50.0), vec![2]);
    }

    #[test]
    fn test_membership_is_symmetric() {
        let boids = [
            at(100.0, 100.0),
            at(130.0, 120.0),
            at(160.0, 100.0),
            at(100.0, 149.0),
            at(400.0, 300.0),
        ];

        for a in 0..boids.len() {
            for b in neighbors(&boids, a, 50.0) {
                assert!(neighbors(&boids, b, 50.0).contains(&a));
            }
        }
    }

    #[test]
    fn test_single_boid_has_no_neighbors() {
        let boids = [at(10.0, 10.0)];
        assert!(neighbors(&boids, 0, 1000.0).is_empty());
    }
}
