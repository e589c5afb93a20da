//! Foam field derivation
//!
//! Pure render hint, recomputed at the end of every tick: fast water foams,
//! water rushing down steep terrain foams harder, and foam on cells that
//! dried out fades instead of vanishing in one frame.

use super::config::WaterSimConfig;
use super::grid::WaterGrid;
use crate::terrain::TerrainProvider;

/// Recompute the foam field from depth, velocity, and terrain gradient
///
/// Pre: all authoritative fields are final for this tick. Post: every foam
/// value lies in [0, 1]; no authoritative field was touched.
pub fn derive_foam<T: TerrainProvider>(
    grid: &mut WaterGrid,
    terrain: &T,
    config: &WaterSimConfig,
    dt: f32,
) {
    let width = grid.width();
    let height = grid.height();
    let cell = terrain.cell_size().max(f32::EPSILON);
    let max_velocity = config.max_velocity.max(f32::EPSILON);

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;

            if grid.depth[i] <= config.min_depth {
                grid.foam[i] = (grid.foam[i] - config.foam_decay * dt).max(0.0);
                continue;
            }

            let vx = grid.velocity_x[i];
            let vy = grid.velocity_y[i];
            let speed = (vx * vx + vy * vy).sqrt();

            // Central-difference terrain slope, clamped sampling at the rim.
            let left = terrain.height(x.saturating_sub(1), y);
            let right = terrain.height((x + 1).min(width - 1), y);
            let up = terrain.height(x, y.saturating_sub(1));
            let down = terrain.height(x, (y + 1).min(height - 1));
            let gx = (right - left) / (2.0 * cell);
            let gy = (down - up) / (2.0 * cell);
            let steepness = (gx * gx + gy * gy).sqrt();

            let target = (speed / max_velocity) * config.foam_speed_scale
                + steepness * (speed / max_velocity) * config.foam_steepness_scale;
            grid.foam[i] = target.clamp(0.0, 1.0);
        }
    }
}
