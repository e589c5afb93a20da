//! World-space water brush
//!
//! The single authoritative add/remove-water entry point: user interaction,
//! groundwater spring emergence, and the orchestrator's point mutators all
//! funnel through here. Quadratic falloff inside a circular radius, with
//! touched chunks marked dirty exactly once.

use glam::Vec2;
use rustc_hash::FxHashSet;

use super::grid::WaterGrid;
use crate::terrain::TerrainProvider;

/// Whether the brush adds or removes depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushMode {
    Add,
    Remove,
}

/// Apply a circular brush of water at a world position
///
/// `radius_world` and `world_pos` are in world units; the brush converts
/// through the terrain transform. `amount` is the depth change at the
/// center, scaled by `(1 - d/r)^2` toward the rim. Removal floors each cell
/// at zero. Returns the net depth actually added (negative for removal).
pub fn apply_brush<T: TerrainProvider>(
    grid: &mut WaterGrid,
    terrain: &mut T,
    world_pos: Vec2,
    radius_world: f32,
    amount: f32,
    mode: BrushMode,
) -> f32 {
    if grid.is_empty() || amount <= 0.0 || radius_world <= 0.0 {
        return 0.0;
    }

    let center = terrain.world_to_grid(world_pos);
    let radius = radius_world / terrain.cell_size().max(f32::EPSILON);
    let chunk_size = terrain.chunk_size().max(1);

    let min_x = ((center.x - radius).floor().max(0.0)) as usize;
    let min_y = ((center.y - radius).floor().max(0.0)) as usize;
    let max_x = ((center.x + radius).ceil() as i64).min(grid.width() as i64 - 1);
    let max_y = ((center.y + radius).ceil() as i64).min(grid.height() as i64 - 1);
    if max_x < min_x as i64 || max_y < min_y as i64 {
        return 0.0;
    }

    let mut net = 0.0;
    let mut dirty: FxHashSet<(usize, usize)> = FxHashSet::default();

    for y in min_y..=max_y as usize {
        for x in min_x..=max_x as usize {
            let dx = x as f32 - center.x;
            let dy = y as f32 - center.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > radius {
                continue;
            }

            let falloff = (1.0 - dist / radius).powi(2);
            let delta = amount * falloff;
            if delta <= 0.0 {
                continue;
            }

            let i = grid.index(x, y);
            match mode {
                BrushMode::Add => {
                    grid.depth[i] += delta;
                    net += delta;
                }
                BrushMode::Remove => {
                    let removed = delta.min(grid.depth[i]);
                    grid.depth[i] -= removed;
                    net -= removed;
                }
            }
            dirty.insert((x / chunk_size, y / chunk_size));
        }
    }

    for (cx, cy) in dirty {
        terrain.mark_chunk_dirty(cx, cy);
    }

    net
}
