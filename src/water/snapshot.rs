//! Grid state snapshots
//!
//! Serializes the four authoritative arrays plus dimensions with bincode.
//! Foam is derived every tick and is deliberately not part of a snapshot;
//! it is re-zeroed on restore and repopulates on the next update.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::grid::WaterGrid;
use crate::error::{WaterError, WaterResult};

/// Serializable copy of the authoritative grid state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSnapshot {
    width: usize,
    height: usize,
    depth: Vec<f32>,
    velocity_x: Vec<f32>,
    velocity_y: Vec<f32>,
    sediment: Vec<f32>,
}

impl GridSnapshot {
    /// Capture the current grid state
    pub fn capture(grid: &WaterGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            depth: grid.depth.clone(),
            velocity_x: grid.velocity_x.clone(),
            velocity_y: grid.velocity_y.clone(),
            sediment: grid.sediment.clone(),
        }
    }

    /// Rebuild a grid from this snapshot, validating array lengths
    pub fn restore(self) -> WaterResult<WaterGrid> {
        let mut grid = WaterGrid::new(self.width, self.height)?;
        let cells = grid.cell_count();
        for (name, len) in [
            ("depth", self.depth.len()),
            ("velocity_x", self.velocity_x.len()),
            ("velocity_y", self.velocity_y.len()),
            ("sediment", self.sediment.len()),
        ] {
            if len != cells {
                return Err(WaterError::corrupted(format!(
                    "{} has {} entries, expected {}",
                    name, len, cells
                )));
            }
        }
        grid.depth = self.depth;
        grid.velocity_x = self.velocity_x;
        grid.velocity_y = self.velocity_y;
        grid.sediment = self.sediment;
        Ok(grid)
    }

    /// Write a snapshot of the grid to any sink
    pub fn save(grid: &WaterGrid, writer: impl Write) -> WaterResult<()> {
        bincode::serialize_into(writer, &Self::capture(grid))?;
        Ok(())
    }

    /// Read a snapshot back into a freshly built grid
    pub fn load(reader: impl Read) -> WaterResult<WaterGrid> {
        let snapshot: GridSnapshot = bincode::deserialize_from(reader)?;
        snapshot.restore()
    }
}
