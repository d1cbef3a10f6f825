/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the screen into a grid of square cells so a query only visits
 * the cells overlapping the search radius instead of every boid.
 *
 * Positions outside the screen (a boid that has moved past an edge but not
 * yet been wrapped) are clamped into the border cells. Queries clamp their
 * cell range the same way, so the exact distance check still sees every
 * boid within the radius.
 *
 * The grid tracks which cell each boid sits in, which lets the flock move a
 * single boid between cells mid-tick when boids are updated in place.
 */

use nannou::prelude::*;

use crate::boid::Boid;
use crate::neighbors::NeighborSearch;

/// Upper bound on the number of cells a grid may allocate.
pub const MAX_GRID_CELLS: usize = 1 << 20;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub cols: usize,
    pub rows: usize,
    cells: Vec<Vec<usize>>,
    // Cell index of each boid, indexed by boid index
    cell_of: Vec<usize>,
}

impl SpatialGrid {
    /// Columns and rows needed to cover `width` x `height`, or `None` when
    /// the grid would exceed [`MAX_GRID_CELLS`].
    pub fn dimensions(cell_size: f32, width: f32, height: f32) -> Option<(usize, usize)> {
        let axis = |extent: f32| {
            let count = (extent / cell_size).ceil();
            if count.is_finite() && count <= MAX_GRID_CELLS as f32 {
                Some((count as usize).max(1))
            } else {
                None
            }
        };

        let (cols, rows) = (axis(width)?, axis(height)?);
        cols.checked_mul(rows)
            .filter(|&cells| cells <= MAX_GRID_CELLS)
            .map(|_| (cols, rows))
    }

    // Oversized grids fall back to a single cell, which is slow but exact
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let (cols, rows) = Self::dimensions(cell_size, width, height).unwrap_or((1, 1));

        Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
            cell_of: Vec::new(),
        }
    }

    #[inline]
    fn col(&self, x: f32) -> usize {
        ((x / self.cell_size).floor() as isize).clamp(0, self.cols as isize - 1) as usize
    }

    #[inline]
    fn row(&self, y: f32) -> usize {
        ((y / self.cell_size).floor() as isize).clamp(0, self.rows as isize - 1) as usize
    }

    // Convert screen coordinates to grid cell index
    #[inline]
    pub fn cell_index(&self, position: Point2) -> usize {
        self.row(position.y) * self.cols + self.col(position.x)
    }

    /// Number of boids currently binned in the grid.
    pub fn len(&self) -> usize {
        self.cell_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_of.is_empty()
    }
}

impl NeighborSearch for SpatialGrid {
    fn rebuild(&mut self, boids: &[Boid]) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.cell_of.clear();

        for (i, boid) in boids.iter().enumerate() {
            let cell = self.cell_index(boid.position);
            self.cells[cell].push(i);
            self.cell_of.push(cell);
        }
    }

    fn relocate(&mut self, index: usize, boids: &[Boid]) {
        let Some(&old) = self.cell_of.get(index) else {
            return;
        };
        let new = self.cell_index(boids[index].position);
        if new == old {
            return;
        }

        if let Some(slot) = self.cells[old].iter().position(|&i| i == index) {
            self.cells[old].swap_remove(slot);
        }
        self.cells[new].push(index);
        self.cell_of[index] = new;
    }

    fn neighbors_within(&self, boids: &[Boid], index: usize, radius: f32, out: &mut Vec<usize>) {
        out.clear();
        let position = boids[index].position;

        // Pad the cell range so rounding at cell borders never drops a boid
        let reach = radius * (1.0 + 1e-4) + 1e-3;
        let (min_col, max_col) = (self.col(position.x - reach), self.col(position.x + reach));
        let (min_row, max_row) = (self.row(position.y - reach), self.row(position.y + reach));

        for row in min_row..=max_row {
            let row_start = row * self.cols;
            for col in min_col..=max_col {
                for &j in &self.cells[row_start + col] {
                    if j != index && position.distance(boids[j].position) < radius {
                        out.push(j);
                    }
                }
            }
        }

        // Match the brute force order so sums come out bit-identical
        out.sort_unstable();
    }

    fn name(&self) -> &'static str {
        "spatial grid"
    }
}
