//! Grid-based water simulation
//!
//! A cell-grid hydrodynamic model over a fixed 2-D terrain: pressure-gradient
//! driven flow with explicit mass transfer, velocity-threshold erosion and
//! deposition, flat-rate evaporation/absorption, stochastic rain injection,
//! and a per-tick foam field for rendering.
//!
//! Tick ordering is fixed and load-bearing:
//! weather -> flow forces -> depth transfer -> evaporation -> erosion -> foam.

pub mod brush;
pub mod config;
pub mod erosion;
pub mod evaporation;
pub mod flow;
pub mod foam;
pub mod grid;
pub mod query;
pub mod simulation;
pub mod snapshot;
pub mod weather;

pub use brush::BrushMode;
pub use config::WaterSimConfig;
pub use erosion::{CellProcess, ErosionStats};
pub use grid::WaterGrid;
pub use simulation::WaterSimulation;
pub use snapshot::GridSnapshot;

#[cfg(test)]
mod tests;
