//! Evaporation and ground absorption
//!
//! Flat per-second rates, intentionally not depth-proportional: shallow
//! cells dry out faster relative to their depth, which is what makes puddles
//! vanish before lakes do.

use super::config::WaterSimConfig;
use super::grid::WaterGrid;

/// Deplete every wet cell by the combined evaporation and absorption loss
///
/// Pre: depth holds the post-transfer field. Post: every previously wet cell
/// lost `(evaporation_rate + absorption_rate) * dt`, floored at zero.
pub fn apply_depletion(grid: &mut WaterGrid, config: &WaterSimConfig, dt: f32) {
    let loss = (config.evaporation_rate + config.absorption_rate) * dt;
    if loss <= 0.0 {
        return;
    }
    for depth in &mut grid.depth {
        if *depth > config.min_depth {
            *depth = (*depth - loss).max(0.0);
        }
    }
}
