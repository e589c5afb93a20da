//! Terraflow - grid-based water simulation over a terrain heightfield
//!
//! An explicit, first-order, grid-local hydrodynamic model tuned for
//! real-time interactive rates: pressure-gradient flow, velocity-threshold
//! erosion with a sediment ledger, flat-rate evaporation/absorption,
//! stochastic rain, a world-space water brush, and bilinear world-space
//! queries. The owning terrain stays external behind [`TerrainProvider`].

pub mod constants;
pub mod error;
pub mod terrain;
pub mod water;

pub use error::{WaterError, WaterResult};
pub use terrain::{Heightfield, TerrainProvider};
pub use water::{
    BrushMode, CellProcess, ErosionStats, GridSnapshot, WaterGrid, WaterSimConfig, WaterSimulation,
};
