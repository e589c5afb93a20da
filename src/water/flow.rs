//! Flow solver: pressure-gradient forces and explicit depth transfer
//!
//! Two passes per tick. The force pass turns water-surface slope into
//! velocity and only reads the previous depth field, so it runs
//! row-parallel. The transfer pass moves depth along the velocity field and
//! must stay sequential; it reads the previous field and accumulates into a
//! scratch buffer that replaces the live field only after the full pass,
//! so cell visit order cannot bias the result.

use rayon::prelude::*;

use super::config::WaterSimConfig;
use super::grid::WaterGrid;
use crate::terrain::TerrainProvider;

/// Advance the velocity field by one step from water-surface slope
///
/// Pre: depth is the previous tick's field. Post: every wet cell's velocity
/// is damped, force-integrated, and clamped to `max_velocity`; dry cells are
/// untouched and keep zero state.
pub fn apply_forces<T: TerrainProvider + Sync>(
    grid: &mut WaterGrid,
    terrain: &T,
    config: &WaterSimConfig,
    dt: f32,
) {
    let width = grid.width();
    let height = grid.height();
    let cell = terrain.cell_size().max(f32::EPSILON);
    let depth = &grid.depth;

    let surface = |x: usize, y: usize| terrain.height(x, y) + depth[y * width + x];

    grid.velocity_x
        .par_chunks_mut(width)
        .zip(grid.velocity_y.par_chunks_mut(width))
        .enumerate()
        .for_each(|(y, (vx_row, vy_row))| {
            for x in 0..width {
                let d = depth[y * width + x];
                if d <= config.min_depth {
                    continue;
                }
                let s = terrain.height(x, y) + d;

                // Centered difference in the interior, one-sided at the rim.
                let mut force_x = if width == 1 {
                    0.0
                } else if x > 0 && x + 1 < width {
                    (surface(x - 1, y) - surface(x + 1, y)) / (2.0 * cell)
                } else if x == 0 {
                    (s - surface(x + 1, y)) / cell
                } else {
                    (surface(x - 1, y) - s) / cell
                };
                let mut force_y = if height == 1 {
                    0.0
                } else if y > 0 && y + 1 < height {
                    (surface(x, y - 1) - surface(x, y + 1)) / (2.0 * cell)
                } else if y == 0 {
                    (s - surface(x, y + 1)) / cell
                } else {
                    (surface(x, y - 1) - s) / cell
                };

                // Waterfall pull: boundary cells are dragged off an
                // unbounded terrain edge in proportion to their own surface.
                if config.edge_drainage_enabled {
                    let pull = s * config.edge_drainage_strength * config.enhanced_waterfall;
                    if x == 0 {
                        force_x -= pull;
                    } else if x + 1 == width {
                        force_x += pull;
                    }
                    if y == 0 {
                        force_y -= pull;
                    } else if y + 1 == height {
                        force_y += pull;
                    }
                }

                let mut vx = (vx_row[x] + force_x * config.flow_speed_gain * dt) * config.damping;
                let mut vy = (vy_row[x] + force_y * config.flow_speed_gain * dt) * config.damping;

                let speed_sq = vx * vx + vy * vy;
                let max_sq = config.max_velocity * config.max_velocity;
                if speed_sq > max_sq {
                    let scale = config.max_velocity / speed_sq.sqrt();
                    vx *= scale;
                    vy *= scale;
                }

                vx_row[x] = vx;
                vy_row[x] = vy;
            }
        });
}

/// Move depth between neighbors along the velocity field
///
/// Pre: velocities are current, depth is the previous field. Post: depth has
/// been replaced wholesale; no cell went negative (per-cell outflow is
/// proportionally capped at the available depth), and flow past the grid rim
/// is discarded when edge drainage is enabled, suppressed when it is not.
pub fn transfer_depth(
    grid: &mut WaterGrid,
    scratch: &mut Vec<f32>,
    config: &WaterSimConfig,
    dt: f32,
) {
    let width = grid.width();
    let height = grid.height();

    scratch.clear();
    scratch.extend_from_slice(&grid.depth);

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let d = grid.depth[i];
            if d <= config.min_depth {
                continue;
            }

            let vx = grid.velocity_x[i];
            let vy = grid.velocity_y[i];
            let unit = d * dt * config.transfer_scale;

            // +x, -x, +y, -y
            let neighbors = [
                (x as i32 + 1, y as i32),
                (x as i32 - 1, y as i32),
                (x as i32, y as i32 + 1),
                (x as i32, y as i32 - 1),
            ];
            let mut outflow = [
                vx.max(0.0) * unit,
                (-vx).max(0.0) * unit,
                vy.max(0.0) * unit,
                (-vy).max(0.0) * unit,
            ];

            // A closed rim reflects nothing and leaks nothing: off-grid
            // flow simply does not leave the cell.
            if !config.edge_drainage_enabled {
                for (flow, &(nx, ny)) in outflow.iter_mut().zip(&neighbors) {
                    if !grid.in_bounds(nx, ny) {
                        *flow = 0.0;
                    }
                }
            }

            let mut total: f32 = outflow.iter().sum();
            if total <= 0.0 {
                continue;
            }
            // Core stability invariant: never move more than the cell holds.
            if total > d {
                let scale = d / total;
                for flow in &mut outflow {
                    *flow *= scale;
                }
                total = d;
            }

            scratch[i] -= total;
            for (flow, &(nx, ny)) in outflow.iter().zip(&neighbors) {
                if grid.in_bounds(nx, ny) {
                    scratch[ny as usize * width + nx as usize] += *flow;
                }
                // Off-grid flow is the waterfall: mass leaves the system.
            }
        }
    }

    std::mem::swap(&mut grid.depth, scratch);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Heightfield;

    fn closed_config() -> WaterSimConfig {
        WaterSimConfig {
            edge_drainage_enabled: false,
            ..WaterSimConfig::default()
        }
    }

    #[test]
    fn test_level_water_generates_no_force() {
        let terrain = Heightfield::flat(8, 8, 1.0, 0.0);
        let mut grid = WaterGrid::new(8, 8).expect("valid dims");
        grid.depth.fill(1.0);

        apply_forces(&mut grid, &terrain, &closed_config(), 0.1);

        assert_eq!(grid.max_flow_speed(), 0.0);
    }

    #[test]
    fn test_downhill_slope_accelerates_flow() {
        // Terrain falls toward +x, so water should pick up positive vx.
        let mut terrain = Heightfield::flat(8, 8, 1.0, 0.0);
        for y in 0..8 {
            for x in 0..8 {
                terrain.set_height(x, y, -(x as f32));
            }
        }
        let mut grid = WaterGrid::new(8, 8).expect("valid dims");
        grid.depth.fill(0.5);

        apply_forces(&mut grid, &terrain, &closed_config(), 0.1);

        let i = grid.index(4, 4);
        assert!(grid.velocity_x[i] > 0.0);
        assert!(grid.velocity_y[i].abs() < 1e-6);
    }

    #[test]
    fn test_velocity_hard_clamped() {
        let mut terrain = Heightfield::flat(8, 1, 1.0, 0.0);
        for x in 0..8 {
            terrain.set_height(x, 0, -(x as f32) * 1000.0);
        }
        let mut grid = WaterGrid::new(8, 1).expect("valid dims");
        grid.depth.fill(1.0);

        let config = closed_config();
        apply_forces(&mut grid, &terrain, &config, 10.0);

        assert!(grid.max_flow_speed() <= config.max_velocity + 1e-4);
    }

    #[test]
    fn test_dry_cells_keep_their_state() {
        let terrain = Heightfield::flat(4, 4, 1.0, 0.0);
        let mut grid = WaterGrid::new(4, 4).expect("valid dims");
        let i = grid.index(1, 1);
        grid.velocity_x[i] = 3.0;

        apply_forces(&mut grid, &terrain, &closed_config(), 0.1);

        // No damping on dry cells: velocity is untouched, not decayed.
        assert_eq!(grid.velocity_x[i], 3.0);
    }

    #[test]
    fn test_damping_decays_stagnant_velocity() {
        let terrain = Heightfield::flat(4, 4, 1.0, 0.0);
        let mut grid = WaterGrid::new(4, 4).expect("valid dims");
        grid.depth.fill(1.0);
        let i = grid.index(1, 1);
        grid.velocity_x[i] = 1.0;

        let config = closed_config();
        for _ in 0..200 {
            apply_forces(&mut grid, &terrain, &config, 0.1);
        }

        // Flat surface means no force; damping alone kills residual drift.
        assert!(grid.velocity_x[i].abs() < 1e-6);
    }

    #[test]
    fn test_outflow_capped_at_available_depth() {
        let mut grid = WaterGrid::new(3, 3).expect("valid dims");
        let i = grid.index(1, 1);
        grid.depth[i] = 0.5;
        grid.velocity_x[i] = 100.0;
        grid.velocity_y[i] = 100.0;

        let config = closed_config();
        let mut scratch = Vec::new();
        transfer_depth(&mut grid, &mut scratch, &config, 10.0);

        assert!(grid.depth[i] >= 0.0);
        let total: f32 = grid.depth().iter().sum();
        assert!((total - 0.5).abs() < 1e-5, "closed rim must conserve mass");
    }

    #[test]
    fn test_transfer_moves_depth_downstream() {
        let mut grid = WaterGrid::new(3, 1).expect("valid dims");
        let i = grid.index(0, 0);
        grid.depth[i] = 1.0;
        grid.velocity_x[i] = 1.0;

        let mut scratch = Vec::new();
        transfer_depth(&mut grid, &mut scratch, &closed_config(), 1.0);

        assert!(grid.depth[grid.index(1, 0)] > 0.0);
        assert!(grid.depth[i] < 1.0);
    }

    #[test]
    fn test_closed_rim_conserves_boundary_outflow() {
        let mut grid = WaterGrid::new(3, 3).expect("valid dims");
        let i = grid.index(0, 1);
        grid.depth[i] = 2.0;
        grid.velocity_x[i] = -5.0; // pointing off-grid

        let mut scratch = Vec::new();
        transfer_depth(&mut grid, &mut scratch, &closed_config(), 1.0);

        let total: f32 = grid.depth().iter().sum();
        assert!((total - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_open_rim_discards_boundary_outflow() {
        let mut grid = WaterGrid::new(3, 3).expect("valid dims");
        let i = grid.index(0, 1);
        grid.depth[i] = 2.0;
        grid.velocity_x[i] = -5.0;

        let config = WaterSimConfig {
            edge_drainage_enabled: true,
            ..WaterSimConfig::default()
        };
        let mut scratch = Vec::new();
        transfer_depth(&mut grid, &mut scratch, &config, 1.0);

        let total: f32 = grid.depth().iter().sum();
        assert!(total < 2.0, "waterfall must remove mass from the system");
        assert!(grid.depth().iter().all(|&d| d >= 0.0));
    }
}
