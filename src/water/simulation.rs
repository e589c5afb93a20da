//! Simulation orchestrator
//!
//! `WaterSimulation` is a plain owned value: no singleton, no global state.
//! The host drives it with `update` once per frame and reads results through
//! the query surface. Pipeline order inside a tick is fixed and must not
//! change: weather -> flow forces -> depth transfer -> evaporation ->
//! erosion -> foam.

use glam::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::brush::{self, BrushMode};
use super::config::WaterSimConfig;
use super::erosion::{self, ErosionStats};
use super::evaporation;
use super::flow;
use super::foam;
use super::grid::WaterGrid;
use super::query;
use super::snapshot::GridSnapshot;
use super::weather::{self, RainState};
use crate::error::WaterResult;
use crate::terrain::TerrainProvider;

/// Owns the grid and advances it one tick at a time
pub struct WaterSimulation {
    grid: WaterGrid,
    config: WaterSimConfig,
    rain: RainState,
    rng: StdRng,
    scratch_depth: Vec<f32>,
    tick: u64,
}

impl WaterSimulation {
    /// Build a simulation from a validated configuration
    pub fn new(config: WaterSimConfig) -> WaterResult<Self> {
        config.validate()?;
        Ok(Self {
            grid: WaterGrid::empty(),
            config,
            rain: RainState::default(),
            rng: StdRng::from_entropy(),
            scratch_depth: Vec::new(),
            tick: 0,
        })
    }

    /// Build a simulation with a fixed RNG seed (deterministic rain)
    pub fn with_seed(config: WaterSimConfig, seed: u64) -> WaterResult<Self> {
        let mut sim = Self::new(config)?;
        sim.rng = StdRng::seed_from_u64(seed);
        Ok(sim)
    }

    /// Allocate the grid; any prior state is fully discarded
    pub fn initialize(&mut self, width: usize, height: usize) -> WaterResult<()> {
        self.grid = WaterGrid::new(width, height)?;
        self.scratch_depth = Vec::with_capacity(width * height);
        self.tick = 0;
        info!("water grid initialized at {}x{}", width, height);
        Ok(())
    }

    /// Zero all fields in place, keeping the allocation
    pub fn reset(&mut self) {
        self.grid.clear();
        self.tick = 0;
    }

    /// Whether `initialize` has been called with valid dimensions
    pub fn is_initialized(&self) -> bool {
        !self.grid.is_empty()
    }

    /// Advance the simulation by one tick
    ///
    /// `dt` is not clamped internally; the caller is responsible for capping
    /// it to keep the explicit scheme stable. No-op before `initialize` or
    /// for non-positive `dt`.
    pub fn update<T: TerrainProvider + Sync>(&mut self, terrain: &mut T, dt: f32) {
        if !self.is_initialized() || dt <= 0.0 {
            debug!("water update skipped (initialized: {}, dt: {})", self.is_initialized(), dt);
            return;
        }

        if self.rain.active {
            weather::inject_rain(
                &mut self.grid,
                &mut self.rng,
                &self.config,
                self.rain.intensity,
                dt,
            );
        }

        flow::apply_forces(&mut self.grid, terrain, &self.config, dt);
        flow::transfer_depth(&mut self.grid, &mut self.scratch_depth, &self.config, dt);
        evaporation::apply_depletion(&mut self.grid, &self.config, dt);
        let stats = erosion::apply_erosion(&mut self.grid, terrain, &self.config, dt);
        foam::derive_foam(&mut self.grid, terrain, &self.config, dt);

        self.tick += 1;
        self.log_tick(&stats);
    }

    fn log_tick(&self, stats: &ErosionStats) {
        if self.tick % 120 == 0 {
            debug!(
                "tick {}: volume {:.3}, active cells {}, max speed {:.3}, eroded {}, deposited {}",
                self.tick,
                self.grid.total_water_volume(),
                self.grid.active_cell_count(self.config.min_depth),
                self.grid.max_flow_speed(),
                stats.eroded_cells,
                stats.deposited_cells,
            );
        }
    }

    /// Add depth at the single cell under a world position
    pub fn add_water<T: TerrainProvider>(&mut self, terrain: &mut T, world_pos: Vec2, amount: f32) {
        self.point_mutate(terrain, world_pos, amount, BrushMode::Add);
    }

    /// Remove depth (floored at zero) at the cell under a world position
    pub fn remove_water<T: TerrainProvider>(
        &mut self,
        terrain: &mut T,
        world_pos: Vec2,
        amount: f32,
    ) {
        self.point_mutate(terrain, world_pos, amount, BrushMode::Remove);
    }

    fn point_mutate<T: TerrainProvider>(
        &mut self,
        terrain: &mut T,
        world_pos: Vec2,
        amount: f32,
        mode: BrushMode,
    ) {
        if !self.is_initialized() || amount <= 0.0 {
            return;
        }
        let g = terrain.world_to_grid(world_pos);
        let x = g.x.round() as i64;
        let y = g.y.round() as i64;
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.grid.width() || y >= self.grid.height() {
            return;
        }
        let i = self.grid.index(x, y);
        match mode {
            BrushMode::Add => self.grid.depth[i] += amount,
            BrushMode::Remove => self.grid.depth[i] = (self.grid.depth[i] - amount).max(0.0),
        }
        let chunk = terrain.chunk_size().max(1);
        terrain.mark_chunk_dirty(x / chunk, y / chunk);
    }

    /// Add water over a circular world-space radius with quadratic falloff
    ///
    /// Also the entry point the groundwater collaborator uses for spring
    /// emergence.
    pub fn add_water_in_radius<T: TerrainProvider>(
        &mut self,
        terrain: &mut T,
        world_pos: Vec2,
        radius: f32,
        amount: f32,
    ) -> f32 {
        brush::apply_brush(&mut self.grid, terrain, world_pos, radius, amount, BrushMode::Add)
    }

    /// Remove water over a circular world-space radius
    pub fn remove_water_in_radius<T: TerrainProvider>(
        &mut self,
        terrain: &mut T,
        world_pos: Vec2,
        radius: f32,
        amount: f32,
    ) -> f32 {
        brush::apply_brush(
            &mut self.grid,
            terrain,
            world_pos,
            radius,
            amount,
            BrushMode::Remove,
        )
    }

    /// Begin raining at the given intensity
    pub fn start_rain(&mut self, intensity: f32) {
        self.rain.start(intensity);
        info!("rain started at intensity {}", self.rain.intensity);
    }

    /// Stop raining
    pub fn stop_rain(&mut self) {
        self.rain.stop();
        info!("rain stopped");
    }

    /// Whether rain is currently active
    pub fn is_raining(&self) -> bool {
        self.rain.active
    }

    /// Interpolated water depth at a world position
    pub fn depth_at<T: TerrainProvider>(&self, terrain: &T, world_pos: Vec2) -> f32 {
        query::depth_at(&self.grid, terrain, world_pos)
    }

    /// Interpolated flow vector at a world position
    pub fn flow_at<T: TerrainProvider>(&self, terrain: &T, world_pos: Vec2) -> Vec2 {
        query::flow_at(&self.grid, terrain, world_pos)
    }

    /// Interpolated flow speed at a world position
    pub fn flow_speed_at<T: TerrainProvider>(&self, terrain: &T, world_pos: Vec2) -> f32 {
        query::flow_speed_at(&self.grid, terrain, world_pos)
    }

    /// Sum of all cell depths
    pub fn total_water_volume(&self) -> f32 {
        self.grid.total_water_volume()
    }

    /// Number of cells wetter than the configured dry threshold
    pub fn active_cell_count(&self) -> usize {
        self.grid.active_cell_count(self.config.min_depth)
    }

    /// Fastest flow speed anywhere on the grid
    pub fn max_flow_speed(&self) -> f32 {
        self.grid.max_flow_speed()
    }

    /// Completed tick count since initialize/reset
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// The underlying grid (read-only; renderers pull flat arrays from here)
    pub fn grid(&self) -> &WaterGrid {
        &self.grid
    }

    /// Active configuration
    pub fn config(&self) -> &WaterSimConfig {
        &self.config
    }

    /// Capture a snapshot of the authoritative state
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid)
    }

    /// Replace the grid from a snapshot (dimensions may change)
    pub fn restore(&mut self, snapshot: GridSnapshot) -> WaterResult<()> {
        self.grid = snapshot.restore()?;
        self.scratch_depth = Vec::with_capacity(self.grid.cell_count());
        self.tick = 0;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut WaterGrid {
        &mut self.grid
    }
}
