//! Erosion and sediment deposition
//!
//! Couples flow energy to terrain shape through a simple
//! transport-then-settle ledger: fast water lifts terrain into suspended
//! sediment, slow water settles it back out. The two are mutually exclusive
//! per cell per tick, gated purely by flow speed against the threshold and
//! the cell's sediment balance.

use log::warn;

use super::config::WaterSimConfig;
use super::grid::WaterGrid;
use crate::terrain::TerrainProvider;

/// What the erosion pass did to one cell this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellProcess {
    /// Flow above the velocity threshold: terrain into sediment
    Eroding,
    /// Flow below the threshold with sediment in suspension: settle out
    Depositing,
    /// Nothing to do
    Idle,
}

impl CellProcess {
    /// Classify a cell from its current flow speed and sediment load
    pub fn classify(speed: f32, sediment: f32, threshold: f32) -> Self {
        if speed > threshold {
            CellProcess::Eroding
        } else if sediment > 0.0 {
            CellProcess::Depositing
        } else {
            CellProcess::Idle
        }
    }
}

/// Per-tick erosion summary, logged by the orchestrator
#[derive(Debug, Clone, Copy, Default)]
pub struct ErosionStats {
    pub eroded_cells: usize,
    pub deposited_cells: usize,
    pub rejected_mutations: usize,
    pub total_eroded: f32,
    pub total_deposited: f32,
}

/// Run the erosion/deposition pass over every wet cell
///
/// Pre: velocity and depth are current for this tick. Post: terrain height
/// and the sediment ledger moved in lockstep (what leaves the terrain enters
/// suspension and vice versa), every accepted mutation marked its chunk
/// dirty, and no cell both eroded and deposited.
pub fn apply_erosion<T: TerrainProvider>(
    grid: &mut WaterGrid,
    terrain: &mut T,
    config: &WaterSimConfig,
    dt: f32,
) -> ErosionStats {
    let width = grid.width();
    let height = grid.height();
    let chunk_size = terrain.chunk_size().max(1);
    let mut stats = ErosionStats::default();

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            if grid.depth[i] <= config.min_depth {
                continue;
            }

            let vx = grid.velocity_x[i];
            let vy = grid.velocity_y[i];
            let speed = (vx * vx + vy * vy).sqrt();

            match CellProcess::classify(speed, grid.sediment[i], config.erosion_velocity_threshold)
            {
                CellProcess::Eroding => {
                    let amount = config.erosion_rate * speed * dt;
                    if amount <= 0.0 {
                        continue;
                    }
                    let h = terrain.height(x, y);
                    if terrain.set_height(x, y, h - amount) {
                        grid.sediment[i] += amount;
                        terrain.mark_chunk_dirty(x / chunk_size, y / chunk_size);
                        stats.eroded_cells += 1;
                        stats.total_eroded += amount;
                    } else {
                        warn!("terrain rejected erosion at cell ({}, {}); skipping", x, y);
                        stats.rejected_mutations += 1;
                    }
                }
                CellProcess::Depositing => {
                    // Settle a fraction, never more than is in suspension.
                    let amount = (grid.sediment[i] * config.deposition_rate * dt)
                        .min(grid.sediment[i]);
                    if amount <= 0.0 {
                        continue;
                    }
                    let h = terrain.height(x, y);
                    if terrain.set_height(x, y, h + amount) {
                        grid.sediment[i] -= amount;
                        terrain.mark_chunk_dirty(x / chunk_size, y / chunk_size);
                        stats.deposited_cells += 1;
                        stats.total_deposited += amount;
                    } else {
                        warn!(
                            "terrain rejected deposition at cell ({}, {}); skipping",
                            x, y
                        );
                        stats.rejected_mutations += 1;
                    }
                }
                CellProcess::Idle => {}
            }
        }
    }

    stats
}
