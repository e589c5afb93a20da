//! Terrain collaborator seam
//!
//! The water core never owns terrain. It reads heights, writes erosion and
//! deposition back, converts between world and grid space, and tells the
//! owner which chunks need their meshes regenerated. All of that goes
//! through [`TerrainProvider`]; [`Heightfield`] is the reference
//! implementation used by tests and the demo binary.

use glam::Vec2;
use noise::{NoiseFn, Perlin};
use rustc_hash::FxHashSet;

/// Interface the water simulation requires from the owning terrain
pub trait TerrainProvider {
    /// Terrain height at a grid cell; out-of-range cells return 0.0
    fn height(&self, x: usize, y: usize) -> f32;

    /// Set terrain height at a grid cell
    ///
    /// Returns false when the mutation was rejected (out of range, locked
    /// chunk, ...). Callers log and skip — never retry.
    fn set_height(&mut self, x: usize, y: usize, height: f32) -> bool;

    /// Edge length of one cell in world units
    fn cell_size(&self) -> f32;

    /// Convert a world position to (fractional) grid coordinates
    fn world_to_grid(&self, world: Vec2) -> Vec2;

    /// Convert grid coordinates back to a world position
    fn grid_to_world(&self, grid: Vec2) -> Vec2;

    /// Edge length of one dirty-tracking chunk, in cells
    fn chunk_size(&self) -> usize;

    /// Flag a chunk for visual regeneration
    fn mark_chunk_dirty(&mut self, chunk_x: usize, chunk_y: usize);
}

/// Flat-array heightmap terrain
///
/// Reference implementation of [`TerrainProvider`]: a W×H height grid with
/// a world-space origin, uniform cell size, and a de-duplicated set of
/// dirty chunks the host drains each frame.
pub struct Heightfield {
    width: usize,
    height: usize,
    cell_size: f32,
    origin: Vec2,
    chunk_size: usize,
    heights: Vec<f32>,
    dirty_chunks: FxHashSet<(usize, usize)>,
}

impl Heightfield {
    /// Create a flat heightfield at a constant elevation
    pub fn flat(width: usize, height: usize, cell_size: f32, elevation: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
            origin: Vec2::ZERO,
            chunk_size: 16,
            heights: vec![elevation; width * height],
            dirty_chunks: FxHashSet::default(),
        }
    }

    /// Create a rolling heightfield from layered Perlin noise
    pub fn from_noise(width: usize, height: usize, cell_size: f32, seed: u32, amplitude: f32) -> Self {
        let perlin = Perlin::new(seed);
        let mut heights = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let nx = x as f64 / width.max(1) as f64;
                let ny = y as f64 / height.max(1) as f64;
                let large = perlin.get([nx * 4.0, ny * 4.0]);
                let detail = perlin.get([nx * 16.0, ny * 16.0]) * 0.25;
                heights.push((large + detail) as f32 * amplitude);
            }
        }
        Self {
            width,
            height,
            cell_size,
            origin: Vec2::ZERO,
            chunk_size: 16,
            heights,
            dirty_chunks: FxHashSet::default(),
        }
    }

    /// Move the world-space origin of cell (0, 0)
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height_cells(&self) -> usize {
        self.height
    }

    /// Chunks flagged dirty since the last [`Heightfield::clear_dirty`]
    pub fn dirty_chunks(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.dirty_chunks.iter().copied()
    }

    /// Number of chunks currently flagged dirty
    pub fn dirty_chunk_count(&self) -> usize {
        self.dirty_chunks.len()
    }

    /// Drain the dirty set after the host regenerated its meshes
    pub fn clear_dirty(&mut self) {
        self.dirty_chunks.clear();
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}

impl TerrainProvider for Heightfield {
    fn height(&self, x: usize, y: usize) -> f32 {
        self.index(x, y).map_or(0.0, |i| self.heights[i])
    }

    fn set_height(&mut self, x: usize, y: usize, height: f32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.heights[i] = height;
                true
            }
            None => false,
        }
    }

    fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn world_to_grid(&self, world: Vec2) -> Vec2 {
        (world - self.origin) / self.cell_size
    }

    fn grid_to_world(&self, grid: Vec2) -> Vec2 {
        grid * self.cell_size + self.origin
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn mark_chunk_dirty(&mut self, chunk_x: usize, chunk_y: usize) {
        self.dirty_chunks.insert((chunk_x, chunk_y));
    }
}
