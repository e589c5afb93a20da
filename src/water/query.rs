//! World-space read-only queries
//!
//! Rendering, ecosystem, geology, and atmosphere all read the simulation
//! through these lookups: world position in, bilinearly interpolated depth
//! or flow out. Queries never index out of bounds — sampling clamps to the
//! nearest valid cell, and an uninitialized grid answers with neutral
//! defaults.

use glam::Vec2;

use super::grid::WaterGrid;
use crate::terrain::TerrainProvider;

/// Bilinearly sample a flat field at fractional grid coordinates
fn sample_bilinear(values: &[f32], width: usize, height: usize, gx: f32, gy: f32) -> f32 {
    let gx = gx.clamp(0.0, (width - 1) as f32);
    let gy = gy.clamp(0.0, (height - 1) as f32);

    let x0 = gx.floor() as usize;
    let y0 = gy.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = gx - x0 as f32;
    let fy = gy - y0 as f32;

    let v00 = values[y0 * width + x0];
    let v10 = values[y0 * width + x1];
    let v01 = values[y1 * width + x0];
    let v11 = values[y1 * width + x1];

    v00 * (1.0 - fx) * (1.0 - fy)
        + v10 * fx * (1.0 - fy)
        + v01 * (1.0 - fx) * fy
        + v11 * fx * fy
}

/// Interpolated water depth at a world position
pub fn depth_at<T: TerrainProvider>(grid: &WaterGrid, terrain: &T, world: Vec2) -> f32 {
    if grid.is_empty() {
        return 0.0;
    }
    let g = terrain.world_to_grid(world);
    sample_bilinear(&grid.depth, grid.width(), grid.height(), g.x, g.y)
}

/// Interpolated flow vector at a world position
pub fn flow_at<T: TerrainProvider>(grid: &WaterGrid, terrain: &T, world: Vec2) -> Vec2 {
    if grid.is_empty() {
        return Vec2::ZERO;
    }
    let g = terrain.world_to_grid(world);
    Vec2::new(
        sample_bilinear(&grid.velocity_x, grid.width(), grid.height(), g.x, g.y),
        sample_bilinear(&grid.velocity_y, grid.width(), grid.height(), g.x, g.y),
    )
}

/// Interpolated flow speed at a world position
pub fn flow_speed_at<T: TerrainProvider>(grid: &WaterGrid, terrain: &T, world: Vec2) -> f32 {
    flow_at(grid, terrain, world).length()
}
