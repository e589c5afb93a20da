//! Rain injection
//!
//! A sparse stochastic source term: each rainy tick wets a bounded random
//! number of cells rather than the whole field, giving patchy initial
//! wetting that the flow solver then redistributes. The atmospheric
//! collaborator (or a manual toggle) only controls intensity.

use rand::Rng;

use super::config::WaterSimConfig;
use super::grid::WaterGrid;

/// Whether rain is falling, and how hard
#[derive(Debug, Clone, Copy, Default)]
pub struct RainState {
    pub active: bool,
    pub intensity: f32,
}

impl RainState {
    /// Begin raining at the given intensity (clamped non-negative)
    pub fn start(&mut self, intensity: f32) {
        self.active = true;
        self.intensity = intensity.max(0.0);
    }

    /// Stop raining
    pub fn stop(&mut self) {
        self.active = false;
        self.intensity = 0.0;
    }
}

/// Add rain depth to a random sample of cells
///
/// Pre: called first in the tick, before the flow solver. Post: between
/// `rain_cells_min` and `rain_cells_max` samples (cells may repeat) each
/// received `intensity * dt * rain_per_cell_scale` depth.
pub fn inject_rain<R: Rng>(
    grid: &mut WaterGrid,
    rng: &mut R,
    config: &WaterSimConfig,
    intensity: f32,
    dt: f32,
) {
    let cells = grid.cell_count();
    if cells == 0 {
        return;
    }
    let per_cell = intensity * dt * config.rain_per_cell_scale;
    if per_cell <= 0.0 {
        return;
    }

    let min = config.rain_cells_min.min(config.rain_cells_max);
    let samples = rng.gen_range(min..=config.rain_cells_max);
    for _ in 0..samples {
        let i = rng.gen_range(0..cells);
        grid.depth[i] += per_cell;
    }
}
