//! Simulation tunables
//!
//! Every knob the original exposed through editor reflection lives here as
//! a plain struct field. Defaults come from `constants.rs`; hosts construct
//! the struct directly or load it from TOML.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{WaterError, WaterResult};

/// Tunable parameters for the water simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSimConfig {
    /// Velocity gain applied to the pressure-gradient force
    pub flow_speed_gain: f32,
    /// Per-tick velocity damping factor, in (0, 1]
    pub damping: f32,
    /// Hard clamp on flow speed (cells per second)
    pub max_velocity: f32,
    /// Cells at or below this depth are treated as dry and skipped
    pub min_depth: f32,
    /// Stability scale applied to all depth transfer
    pub transfer_scale: f32,

    /// Flat depth loss to the atmosphere per second
    pub evaporation_rate: f32,
    /// Flat depth loss into the ground per second
    pub absorption_rate: f32,

    /// Terrain height removed per unit of flow speed per second
    pub erosion_rate: f32,
    /// Minimum flow speed before erosion starts
    pub erosion_velocity_threshold: f32,
    /// Fraction of suspended sediment settled per second
    pub deposition_rate: f32,

    /// Whether boundary cells may drain off-grid
    pub edge_drainage_enabled: bool,
    /// Outward force per unit of surface height at open boundaries
    pub edge_drainage_strength: f32,
    /// Extra multiplier on edge drainage (1.0 = plain drainage)
    pub enhanced_waterfall: f32,

    /// Fewest cells wetted per rainy tick
    pub rain_cells_min: usize,
    /// Most cells wetted per rainy tick
    pub rain_cells_max: usize,
    /// Depth added per sampled cell per unit of rain intensity
    pub rain_per_cell_scale: f32,

    /// Foam contribution of flow speed relative to max velocity
    pub foam_speed_scale: f32,
    /// Foam contribution of terrain steepness under moving water
    pub foam_steepness_scale: f32,
    /// Foam fade-out per second on dry cells
    pub foam_decay: f32,
}

impl Default for WaterSimConfig {
    fn default() -> Self {
        Self {
            flow_speed_gain: constants::flow::FLOW_SPEED_GAIN,
            damping: constants::flow::DAMPING,
            max_velocity: constants::flow::MAX_VELOCITY,
            min_depth: constants::flow::MIN_DEPTH,
            transfer_scale: constants::flow::TRANSFER_SCALE,
            evaporation_rate: constants::depletion::EVAPORATION_RATE,
            absorption_rate: constants::depletion::ABSORPTION_RATE,
            erosion_rate: constants::erosion::EROSION_RATE,
            erosion_velocity_threshold: constants::erosion::EROSION_VELOCITY_THRESHOLD,
            deposition_rate: constants::erosion::DEPOSITION_RATE,
            edge_drainage_enabled: true,
            edge_drainage_strength: constants::flow::EDGE_DRAINAGE_STRENGTH,
            enhanced_waterfall: constants::flow::ENHANCED_WATERFALL,
            rain_cells_min: constants::weather::RAIN_CELLS_MIN,
            rain_cells_max: constants::weather::RAIN_CELLS_MAX,
            rain_per_cell_scale: constants::weather::RAIN_PER_CELL_SCALE,
            foam_speed_scale: constants::foam::SPEED_SCALE,
            foam_steepness_scale: constants::foam::STEEPNESS_SCALE,
            foam_decay: constants::foam::DECAY,
        }
    }
}

impl WaterSimConfig {
    /// Parse a config from TOML; missing fields fall back to defaults
    pub fn from_toml_str(text: &str) -> WaterResult<Self> {
        let config: WaterSimConfig =
            toml::from_str(text).map_err(|e| WaterError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the solver cannot run stably with
    pub fn validate(&self) -> WaterResult<()> {
        if self.max_velocity <= 0.0 {
            return Err(WaterError::config("max_velocity must be positive"));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(WaterError::config("damping must be in (0, 1]"));
        }
        if self.min_depth < 0.0 {
            return Err(WaterError::config("min_depth must not be negative"));
        }
        if self.transfer_scale <= 0.0 {
            return Err(WaterError::config("transfer_scale must be positive"));
        }
        let rates = [
            ("evaporation_rate", self.evaporation_rate),
            ("absorption_rate", self.absorption_rate),
            ("erosion_rate", self.erosion_rate),
            ("erosion_velocity_threshold", self.erosion_velocity_threshold),
            ("deposition_rate", self.deposition_rate),
            ("edge_drainage_strength", self.edge_drainage_strength),
            ("rain_per_cell_scale", self.rain_per_cell_scale),
            ("foam_speed_scale", self.foam_speed_scale),
            ("foam_steepness_scale", self.foam_steepness_scale),
            ("foam_decay", self.foam_decay),
        ];
        for (name, value) in rates {
            if value < 0.0 {
                return Err(WaterError::config(format!("{} must not be negative", name)));
            }
        }
        if self.enhanced_waterfall < 1.0 {
            return Err(WaterError::config("enhanced_waterfall must be at least 1.0"));
        }
        if self.rain_cells_min > self.rain_cells_max {
            return Err(WaterError::config(
                "rain_cells_min must not exceed rain_cells_max",
            ));
        }
        Ok(())
    }
}
