// Terraflow Constants - SINGLE SOURCE OF TRUTH
//
// Default tunables for the water simulation. `WaterSimConfig::default()`
// pulls every value from here; individual runs override through the config,
// never by editing call sites.

/// Flow solver defaults
pub mod flow {
    /// Velocity gain applied to the pressure-gradient force
    pub const FLOW_SPEED_GAIN: f32 = 4.0;

    /// Per-tick velocity damping (1.0 = frictionless)
    pub const DAMPING: f32 = 0.98;

    /// Hard clamp on flow speed (cells per second)
    pub const MAX_VELOCITY: f32 = 10.0;

    /// Cells at or below this depth are treated as dry
    pub const MIN_DEPTH: f32 = 0.001;

    /// Stability scale on depth transfer; not user-facing in spirit,
    /// exposed only so extreme grids can be tuned
    pub const TRANSFER_SCALE: f32 = 0.25;

    /// Outward force per unit of surface height at open boundaries
    pub const EDGE_DRAINAGE_STRENGTH: f32 = 0.5;

    /// Extra multiplier on edge drainage (1.0 = plain drainage)
    pub const ENHANCED_WATERFALL: f32 = 1.0;
}

/// Evaporation / absorption defaults
pub mod depletion {
    /// Flat depth loss to the atmosphere per second
    pub const EVAPORATION_RATE: f32 = 0.0001;

    /// Flat depth loss into the ground per second
    pub const ABSORPTION_RATE: f32 = 0.0002;
}

/// Erosion model defaults
pub mod erosion {
    /// Terrain height removed per unit of flow speed per second
    pub const EROSION_RATE: f32 = 0.01;

    /// Minimum flow speed before erosion starts
    pub const EROSION_VELOCITY_THRESHOLD: f32 = 0.5;

    /// Fraction of suspended sediment settled per second
    pub const DEPOSITION_RATE: f32 = 0.02;
}

/// Weather injector defaults
pub mod weather {
    /// Fewest cells wetted per rainy tick
    pub const RAIN_CELLS_MIN: usize = 100;

    /// Most cells wetted per rainy tick
    pub const RAIN_CELLS_MAX: usize = 1000;

    /// Depth added per sampled cell per unit of rain intensity
    pub const RAIN_PER_CELL_SCALE: f32 = 0.1;
}

/// Foam shaping defaults (render hint only)
pub mod foam {
    /// Foam contribution of flow speed relative to max velocity
    pub const SPEED_SCALE: f32 = 1.5;

    /// Foam contribution of terrain steepness under moving water
    pub const STEEPNESS_SCALE: f32 = 0.5;

    /// Foam fade-out per second on dry cells
    pub const DECAY: f32 = 2.0;
}
