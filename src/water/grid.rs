//! Flat per-cell state arrays for the water simulation
//!
//! The grid is the sole mutable state of the core: depth, velocity,
//! suspended sediment, and the derived foam field, all as flat `Vec<f32>`
//! indexed by `y * width + x`. No per-cell identity, no behavior beyond
//! bounds-checked access and aggregate statistics.

use crate::error::{WaterError, WaterResult};

/// Per-cell water state over a fixed W×H grid
#[derive(Debug, Clone)]
pub struct WaterGrid {
    width: usize,
    height: usize,
    /// Water depth per cell; never negative
    pub(crate) depth: Vec<f32>,
    /// Signed flow velocity, X component
    pub(crate) velocity_x: Vec<f32>,
    /// Signed flow velocity, Y component
    pub(crate) velocity_y: Vec<f32>,
    /// Suspended sediment mass per cell; never negative
    pub(crate) sediment: Vec<f32>,
    /// Derived foam intensity in [0,1]; render hint, not authoritative
    pub(crate) foam: Vec<f32>,
}

impl WaterGrid {
    /// Allocate a zero-filled grid
    pub fn new(width: usize, height: usize) -> WaterResult<Self> {
        if width == 0 || height == 0 {
            return Err(WaterError::InvalidDimensions { width, height });
        }
        let cells = width * height;
        Ok(Self {
            width,
            height,
            depth: vec![0.0; cells],
            velocity_x: vec![0.0; cells],
            velocity_y: vec![0.0; cells],
            sediment: vec![0.0; cells],
            foam: vec![0.0; cells],
        })
    }

    /// Placeholder grid used before initialization; every query is neutral
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            depth: Vec::new(),
            velocity_x: Vec::new(),
            velocity_y: Vec::new(),
            sediment: Vec::new(),
            foam: Vec::new(),
        }
    }

    /// True until the grid has been allocated with real dimensions
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total cell count
    pub fn cell_count(&self) -> usize {
        self.depth.len()
    }

    /// Zero every field without reallocating
    pub fn clear(&mut self) {
        self.depth.fill(0.0);
        self.velocity_x.fill(0.0);
        self.velocity_y.fill(0.0);
        self.sediment.fill(0.0);
        self.foam.fill(0.0);
    }

    /// Flat index of a cell; callers must have bounds-checked
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Whether signed coordinates land on the grid
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Depth at a cell; out-of-range reads are 0.0
    pub fn depth_at_cell(&self, x: usize, y: usize) -> f32 {
        if x < self.width && y < self.height {
            self.depth[self.index(x, y)]
        } else {
            0.0
        }
    }

    /// Velocity at a cell; out-of-range reads are (0, 0)
    pub fn velocity_at_cell(&self, x: usize, y: usize) -> (f32, f32) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            (self.velocity_x[i], self.velocity_y[i])
        } else {
            (0.0, 0.0)
        }
    }

    /// Read-only depth field for renderers
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// Read-only X velocity field for renderers
    pub fn velocity_x(&self) -> &[f32] {
        &self.velocity_x
    }

    /// Read-only Y velocity field for renderers
    pub fn velocity_y(&self) -> &[f32] {
        &self.velocity_y
    }

    /// Read-only sediment field
    pub fn sediment(&self) -> &[f32] {
        &self.sediment
    }

    /// Read-only foam field for renderers
    pub fn foam(&self) -> &[f32] {
        &self.foam
    }

    /// Sum of all cell depths (volume in depth × cell-area units)
    pub fn total_water_volume(&self) -> f32 {
        self.depth.iter().sum()
    }

    /// Number of cells wetter than `min_depth`
    pub fn active_cell_count(&self, min_depth: f32) -> usize {
        self.depth.iter().filter(|&&d| d > min_depth).count()
    }

    /// Fastest flow speed anywhere on the grid
    pub fn max_flow_speed(&self) -> f32 {
        self.velocity_x
            .iter()
            .zip(&self.velocity_y)
            .map(|(vx, vy)| (vx * vx + vy * vy).sqrt())
            .fold(0.0, f32::max)
    }
}
