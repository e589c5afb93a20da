//! Scenario tests for the full simulation pipeline

use glam::Vec2;

use super::config::WaterSimConfig;
use super::erosion;
use super::simulation::WaterSimulation;
use super::snapshot::GridSnapshot;
use crate::terrain::{Heightfield, TerrainProvider};

fn quiet_config() -> WaterSimConfig {
    WaterSimConfig {
        edge_drainage_enabled: false,
        evaporation_rate: 0.0,
        absorption_rate: 0.0,
        ..WaterSimConfig::default()
    }
}

#[test]
fn test_initialize_discards_prior_state() {
    let mut terrain = Heightfield::flat(16, 16, 1.0, 0.0);
    let mut sim = WaterSimulation::with_seed(quiet_config(), 1).expect("valid config");

    sim.initialize(16, 16).expect("valid dims");
    sim.add_water(&mut terrain, Vec2::new(8.0, 8.0), 5.0);
    assert!(sim.total_water_volume() > 0.0);

    sim.initialize(16, 16).expect("valid dims");

    assert_eq!(sim.total_water_volume(), 0.0);
    assert_eq!(sim.active_cell_count(), 0);
    assert_eq!(sim.max_flow_speed(), 0.0);
    assert_eq!(sim.depth_at(&terrain, Vec2::new(8.0, 8.0)), 0.0);
    assert_eq!(sim.flow_at(&terrain, Vec2::new(8.0, 8.0)), Vec2::ZERO);
}

#[test]
fn test_uninitialized_operations_are_no_ops() {
    let mut terrain = Heightfield::flat(8, 8, 1.0, 0.0);
    let mut sim = WaterSimulation::new(WaterSimConfig::default()).expect("valid config");

    sim.update(&mut terrain, 0.016);
    sim.add_water(&mut terrain, Vec2::new(4.0, 4.0), 1.0);
    sim.add_water_in_radius(&mut terrain, Vec2::new(4.0, 4.0), 2.0, 1.0);

    assert!(!sim.is_initialized());
    assert_eq!(sim.total_water_volume(), 0.0);
    assert_eq!(sim.depth_at(&terrain, Vec2::new(4.0, 4.0)), 0.0);
    assert_eq!(sim.tick_count(), 0);
}

#[test]
fn test_closed_system_volume_never_increases() {
    let mut terrain = Heightfield::from_noise(32, 32, 1.0, 11, 3.0);
    // Rain off, rim closed; evaporation and absorption keep their defaults,
    // so mass can only leave, never appear.
    let config = WaterSimConfig {
        edge_drainage_enabled: false,
        ..WaterSimConfig::default()
    };
    let mut sim = WaterSimulation::with_seed(config, 5).expect("valid config");
    sim.initialize(32, 32).expect("valid dims");
    sim.add_water_in_radius(&mut terrain, Vec2::new(16.0, 16.0), 8.0, 2.0);

    let mut previous = sim.total_water_volume();
    assert!(previous > 0.0);

    for _ in 0..100 {
        sim.update(&mut terrain, 0.05);
        let volume = sim.total_water_volume();
        assert!(
            volume <= previous + 1e-3,
            "closed-system volume rose from {} to {}",
            previous,
            volume
        );
        previous = volume;
    }
}

#[test]
fn test_invariants_hold_under_rain_and_drainage() {
    let mut terrain = Heightfield::from_noise(48, 48, 1.0, 23, 8.0);
    let config = WaterSimConfig {
        rain_cells_min: 100,
        rain_cells_max: 300,
        ..WaterSimConfig::default()
    };
    let max_velocity = config.max_velocity;
    let mut sim = WaterSimulation::with_seed(config, 17).expect("valid config");
    sim.initialize(48, 48).expect("valid dims");
    sim.start_rain(2.0);

    for _ in 0..200 {
        sim.update(&mut terrain, 0.05);
        let grid = sim.grid();
        assert!(grid.depth().iter().all(|&d| d >= 0.0));
        assert!(grid.sediment().iter().all(|&s| s >= 0.0));
        assert!(grid.foam().iter().all(|&f| (0.0..=1.0).contains(&f)));
        assert!(sim.max_flow_speed() <= max_velocity + 1e-3);
    }
    assert!(sim.total_water_volume() > 0.0);
}

#[test]
fn test_river_carving_scenario() {
    // One fast row held at constant depth and speed for 100 ticks must cut
    // a channel and leave sediment in suspension.
    let mut terrain = Heightfield::flat(16, 4, 1.0, 100.0);
    let config = WaterSimConfig {
        max_velocity: 50.0,
        erosion_velocity_threshold: 15.0,
        erosion_rate: 0.001,
        ..WaterSimConfig::default()
    };
    let mut sim = WaterSimulation::with_seed(config.clone(), 2).expect("valid config");
    sim.initialize(16, 4).expect("valid dims");

    let mut last_height = terrain.height(8, 1);
    for _ in 0..100 {
        {
            let grid = sim.grid_mut();
            for x in 0..16 {
                let i = grid.index(x, 1);
                grid.depth[i] = 1.0;
                grid.velocity_x[i] = 30.0;
                grid.velocity_y[i] = 0.0;
            }
        }
        erosion::apply_erosion(sim.grid_mut(), &mut terrain, &config, 0.016);

        let h = terrain.height(8, 1);
        assert!(h < last_height, "terrain must strictly decrease each tick");
        last_height = h;
    }

    let grid = sim.grid();
    for x in 0..16 {
        let i = grid.index(x, 1);
        assert!(grid.sediment()[i] > 0.0, "sediment missing at column {}", x);
        assert!(terrain.height(x, 1) < 100.0);
    }
    // Rows the river never touched are intact.
    assert_eq!(terrain.height(8, 0), 100.0);
    assert_eq!(terrain.height(8, 3), 100.0);
}

#[test]
fn test_stagnant_pool_decay_scenario() {
    // With flow disabled, a 5x5 pool of depth 2.0 must follow
    // depth = max(0, 2.0 - (evaporation + absorption) * ticks) exactly.
    let mut terrain = Heightfield::flat(16, 16, 1.0, 0.0);
    let config = WaterSimConfig {
        flow_speed_gain: 0.0,
        edge_drainage_enabled: false,
        evaporation_rate: 0.01,
        absorption_rate: 0.02,
        ..WaterSimConfig::default()
    };
    let mut sim = WaterSimulation::with_seed(config, 3).expect("valid config");
    sim.initialize(16, 16).expect("valid dims");
    {
        let grid = sim.grid_mut();
        for y in 5..10 {
            for x in 5..10 {
                let i = grid.index(x, y);
                grid.depth[i] = 2.0;
            }
        }
    }

    for _ in 0..30 {
        sim.update(&mut terrain, 1.0);
    }
    let expected = 2.0 - 0.03 * 30.0;
    for y in 5..10 {
        for x in 5..10 {
            let d = sim.grid().depth_at_cell(x, y);
            assert!((d - expected).abs() < 1e-4, "expected {}, got {}", expected, d);
        }
    }

    for _ in 0..50 {
        sim.update(&mut terrain, 1.0);
    }
    // 80 ticks of 0.03 exceeds the initial depth: floored at zero.
    for y in 5..10 {
        for x in 5..10 {
            assert_eq!(sim.grid().depth_at_cell(x, y), 0.0);
        }
    }
}

#[test]
fn test_edge_drainage_scenario() {
    let mut terrain = Heightfield::flat(8, 8, 1.0, 0.0);
    let config = WaterSimConfig {
        edge_drainage_enabled: true,
        // Strong pull so the boundary cell drains outward from the first
        // tick instead of equalizing inward first.
        edge_drainage_strength: 2.0,
        evaporation_rate: 0.0,
        absorption_rate: 0.0,
        ..WaterSimConfig::default()
    };
    let mut sim = WaterSimulation::with_seed(config, 4).expect("valid config");
    sim.initialize(8, 8).expect("valid dims");
    {
        let grid = sim.grid_mut();
        let i = grid.index(0, 4);
        grid.depth[i] = 5.0;
    }

    let before = sim.total_water_volume();
    for _ in 0..20 {
        sim.update(&mut terrain, 0.1);
    }
    let after = sim.total_water_volume();

    assert!(
        after < before,
        "edge drainage must bleed mass off-grid ({} -> {})",
        before,
        after
    );
}

#[test]
fn test_reset_zeroes_in_place() {
    let mut terrain = Heightfield::flat(8, 8, 1.0, 0.0);
    let mut sim = WaterSimulation::with_seed(quiet_config(), 6).expect("valid config");
    sim.initialize(8, 8).expect("valid dims");
    sim.add_water_in_radius(&mut terrain, Vec2::new(4.0, 4.0), 3.0, 2.0);
    sim.update(&mut terrain, 0.1);

    sim.reset();

    assert!(sim.is_initialized());
    assert_eq!(sim.total_water_volume(), 0.0);
    assert_eq!(sim.tick_count(), 0);
}

#[test]
fn test_snapshot_file_round_trip() {
    let mut terrain = Heightfield::from_noise(24, 24, 1.0, 9, 4.0);
    let mut sim = WaterSimulation::with_seed(WaterSimConfig::default(), 8).expect("valid config");
    sim.initialize(24, 24).expect("valid dims");
    sim.start_rain(1.5);
    for _ in 0..50 {
        sim.update(&mut terrain, 0.05);
    }

    let file = tempfile::NamedTempFile::new().expect("temp file");
    GridSnapshot::save(sim.grid(), file.as_file()).expect("save");

    let reopened = file.reopen().expect("reopen");
    let restored = GridSnapshot::load(reopened).expect("load");

    assert_eq!(restored.depth(), sim.grid().depth());
    assert_eq!(restored.velocity_x(), sim.grid().velocity_x());
    assert_eq!(restored.velocity_y(), sim.grid().velocity_y());
    assert_eq!(restored.sediment(), sim.grid().sediment());
}

#[test]
fn test_spring_emergence_through_brush() {
    // The groundwater collaborator injects spring volume through the same
    // brush primitive as user interaction.
    let mut terrain = Heightfield::flat(32, 32, 1.0, 0.0);
    let mut sim = WaterSimulation::with_seed(quiet_config(), 10).expect("valid config");
    sim.initialize(32, 32).expect("valid dims");

    let added = sim.add_water_in_radius(&mut terrain, Vec2::new(10.0, 10.0), 4.0, 0.5);

    assert!(added > 0.0);
    assert!((sim.total_water_volume() - added).abs() < 1e-4);
    assert!(terrain.dirty_chunk_count() > 0);
}
