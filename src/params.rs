/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds every tunable
 * value of the simulation: screen size, speed and force caps, perception
 * radii, rule weights and the mouse repulsion settings. A flock is built from
 * one validated params value and only swaps it between ticks.
 *
 * Params can be loaded from a TOML file. Omitted keys fall back to the
 * defaults below; unknown keys are rejected.
 */

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ParamsError, ParamsResult};
use crate::spatial_grid::{SpatialGrid, MAX_GRID_CELLS};

/// Highest frame rate the host will pace ticks at.
pub const MAX_TARGET_FPS: f32 = 1000.0;

/// How steering inputs are read during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Each boid steers against the in-progress population, so boids later in
    /// the list see neighbors that already moved this tick.
    #[default]
    Sequential,
    /// All boids steer against a copy of the population taken at the start of
    /// the tick. Results do not depend on list order.
    Snapshot,
}

/// Which neighbor search backs the flock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSearchKind {
    #[default]
    BruteForce,
    Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParams {
    pub width: f32,
    pub height: f32,
    pub num_boids: usize,
    pub max_speed: f32,
    pub min_initial_speed: f32,
    pub max_force: f32,
    pub perception_radius: f32,
    pub separation_radius: f32,
    // Mouse repulsion
    pub click_radius: f32,
    pub click_force: f32,
    pub click_epsilon: f32,
    // Behavior weights
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub update_order: UpdateOrder,
    pub neighbor_search: NeighborSearchKind,
    pub cell_size_factor: f32, // Multiplier for grid cell size relative to the largest radius
    pub seed: Option<u64>,
    pub target_fps: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            num_boids: 6,
            max_speed: 10.0,
            min_initial_speed: 2.0,
            max_force: 0.05,
            perception_radius: 50.0,
            separation_radius: 50.0,
            click_radius: 80.0,
            click_force: 0.5,
            click_epsilon: 0.001,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            separation_weight: 1.5,
            update_order: UpdateOrder::Sequential,
            neighbor_search: NeighborSearchKind::BruteForce,
            cell_size_factor: 1.0,
            seed: None,
            target_fps: 60.0,
        }
    }
}

impl SimulationParams {
    /// Parse params from TOML text and validate them.
    pub fn from_toml_str(text: &str) -> ParamsResult<Self> {
        let params: SimulationParams = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate a params file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ParamsResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ParamsResult<()> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("max_speed", self.max_speed)?;
        positive("perception_radius", self.perception_radius)?;
        positive("separation_radius", self.separation_radius)?;
        positive("click_radius", self.click_radius)?;
        positive("cell_size_factor", self.cell_size_factor)?;
        positive("target_fps", self.target_fps)?;
        if self.target_fps > MAX_TARGET_FPS {
            return Err(ParamsError::invalid(
                "target_fps",
                format!("{} exceeds the maximum of {MAX_TARGET_FPS}", self.target_fps),
            ));
        }

        non_negative("max_force", self.max_force)?;
        non_negative("click_force", self.click_force)?;
        non_negative("alignment_weight", self.alignment_weight)?;
        non_negative("cohesion_weight", self.cohesion_weight)?;
        non_negative("separation_weight", self.separation_weight)?;

        non_negative("min_initial_speed", self.min_initial_speed)?;
        if self.min_initial_speed > self.max_speed {
            return Err(ParamsError::invalid(
                "min_initial_speed",
                format!("{} exceeds max_speed {}", self.min_initial_speed, self.max_speed),
            ));
        }

        non_negative("click_epsilon", self.click_epsilon)?;
        if self.click_epsilon >= self.click_radius {
            return Err(ParamsError::invalid(
                "click_epsilon",
                format!("{} must be below click_radius {}", self.click_epsilon, self.click_radius),
            ));
        }

        if self.neighbor_search == NeighborSearchKind::Grid
            && SpatialGrid::dimensions(self.cell_size(), self.width, self.height).is_none()
        {
            return Err(ParamsError::invalid(
                "cell_size_factor",
                format!(
                    "a {} x {} grid of {} cells needs more than {MAX_GRID_CELLS} cells",
                    self.width,
                    self.height,
                    self.cell_size()
                ),
            ));
        }

        Ok(())
    }

    /// Time between ticks at `target_fps`. Falls back to the default rate if
    /// the interval cannot be represented.
    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f32(1.0 / self.target_fps)
            .unwrap_or_else(|_| Duration::from_secs_f32(1.0 / Self::default().target_fps))
    }

    /// Grid cell edge length derived from the largest perception radius.
    pub fn cell_size(&self) -> f32 {
        f32::max(self.perception_radius, self.separation_radius) * self.cell_size_factor
    }

    // Get parameter ranges for UI sliders
    pub fn get_max_speed_range() -> RangeInclusive<f32> {
        1.0..=30.0
    }

    pub fn get_max_force_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_weight_range() -> RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn get_radius_range() -> RangeInclusive<f32> {
        10.0..=200.0
    }

    pub fn get_cell_size_factor_range() -> RangeInclusive<f32> {
        0.25..=4.0
    }
}

fn positive(name: &'static str, value: f32) -> ParamsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::invalid(name, format!("expected a positive finite value, got {value}")))
    }
}

fn non_negative(name: &'static str, value: f32) -> ParamsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParamsError::invalid(name, format!("expected a non-negative finite value, got {value}")))
    }
}
