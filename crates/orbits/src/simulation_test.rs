use approx::assert_relative_eq;
use nalgebra::Point3;

use crate::body::BodyId;
use crate::config::SimulationConfig;
use crate::error::OrbitError;
use crate::simulation::Simulation;
use crate::state::{BodyParams, OrbitParams, Placement};

fn params(radius: f64, surface_gravity: f64, is_anchor: bool) -> BodyParams {
    BodyParams {
        radius,
        surface_gravity,
        axis_tilt: 0.0,
        axial_spin: 0.0,
        is_anchor,
    }
}

fn make_simulation() -> (Simulation, BodyId, BodyId) {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    let star = sim.create_body(params(10.0, 20.0, true)).unwrap();
    let planet = sim.create_body(params(1.0, 1.0, false)).unwrap();
    sim.assign_parent(
        planet,
        star,
        OrbitParams {
            eccentricity: 0.71,
            placement: Placement::Offset {
                angle_deg: 120.0,
                distance: 45.0,
            },
        },
    )
    .unwrap();
    (sim, star, planet)
}

#[test]
fn test_invalid_config_rejected() {
    let config = SimulationConfig {
        tracer_time_step: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        Simulation::new(config),
        Err(OrbitError::InvalidConstant { .. })
    ));
}

#[test]
fn test_tick_scales_time_step() {
    let (mut sim, _, _) = make_simulation();
    sim.tick(1.0).unwrap();
    sim.tick(2.5).unwrap();

    assert_eq!(sim.ticks(), 2);
    assert_relative_eq!(sim.state().time, 0.01 + 0.025, epsilon = 1e-12);
}

#[test]
fn test_tick_rejects_bad_multiplier() {
    let (mut sim, _, _) = make_simulation();
    for multiplier in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            sim.tick(multiplier),
            Err(OrbitError::InvalidSpeedMultiplier(_))
        ));
    }
    assert_eq!(sim.ticks(), 0);
    assert!(!sim.is_running());
}

#[test]
fn test_tick_failure_is_reported() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    let a = sim.create_body(params(1.0, 1.0, false)).unwrap();
    sim.create_body(params(1.0, 1.0, false)).unwrap();
    sim.set_position(a, Point3::origin()).unwrap();

    assert!(matches!(
        sim.tick(1.0),
        Err(OrbitError::CoincidentBodies { .. })
    ));
    assert_eq!(sim.ticks(), 0);
}

#[test]
fn test_preview_uses_initial_velocity_before_first_tick() {
    let (mut sim, _, planet) = make_simulation();
    let position = sim.body(planet).unwrap().position();
    let preview = sim.predict_path(planet, 25.0).unwrap();
    assert_eq!(preview.segments[0].start, position);

    sim.tick(1.0).unwrap();
    assert!(sim.is_running());
    let running = sim.predict_path(planet, 25.0).unwrap();
    assert_eq!(running.segments[0].start, sim.body(planet).unwrap().position());
    assert_ne!(preview, running);
}

#[test]
fn test_predict_path_does_not_advance_simulation() {
    let (sim, _, planet) = make_simulation();
    let before = sim.snapshot();

    let path = sim.predict_path(planet, 60.0).unwrap();

    assert!(!path.is_empty());
    assert!(!path.truncated);
    assert!(path.total_length_squared() >= 60.0 * 60.0);
    assert_eq!(sim.ticks(), 0);
    assert_eq!(
        sim.body(planet).unwrap().position(),
        before.get_body(planet).unwrap().position()
    );
}

#[test]
fn test_step_cap_is_reported_by_predict_path() {
    let config = SimulationConfig {
        max_prediction_steps: 50,
        ..Default::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    let star = sim.create_body(params(10.0, 20.0, true)).unwrap();
    let planet = sim.create_body(params(1.0, 1.0, false)).unwrap();
    sim.assign_parent(
        planet,
        star,
        OrbitParams {
            eccentricity: 0.71,
            placement: Placement::Offset {
                angle_deg: 0.0,
                distance: 50.0,
            },
        },
    )
    .unwrap();

    let budget = 1000.0;
    let path = sim.predict_path(planet, budget).unwrap();

    assert_eq!(path.len(), 50);
    assert!(path.truncated);
    assert!(path.total_length_squared() < budget * budget);

    let short = sim.predict_path(planet, 5.0).unwrap();
    assert!(!short.truncated);
}

#[test]
fn test_traced_paths_only_for_marked_bodies() {
    let (mut sim, star, planet) = make_simulation();
    let moon = sim.create_body(params(0.5, 0.1, false)).unwrap();
    sim.assign_parent(
        moon,
        planet,
        OrbitParams {
            eccentricity: 0.71,
            placement: Placement::Offset {
                angle_deg: 0.0,
                distance: 9.0,
            },
        },
    )
    .unwrap();
    sim.set_trace_length(planet, Some(20.0)).unwrap();
    sim.set_trace_length(moon, Some(5.0)).unwrap();

    let traced = sim.traced_paths().unwrap();

    let ids: Vec<BodyId> = traced.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![planet, moon]);
    assert!(!ids.contains(&star));
    assert!(traced.iter().all(|(_, path)| !path.is_empty() && !path.truncated));
}

#[test]
fn test_find_by_id_miss() {
    let (sim, star, _) = make_simulation();
    assert_eq!(sim.find_by_id(star), Some(star));
    assert_eq!(sim.find_by_id(BodyId(1_000)), None);
}

#[test]
fn test_clear_resets_run() {
    let (mut sim, star, _) = make_simulation();
    sim.tick(1.0).unwrap();

    sim.clear();

    assert_eq!(sim.bodies().len(), 0);
    assert_eq!(sim.ticks(), 0);
    assert!(sim.find_by_id(star).is_none());
    // A new anchor is allowed after regeneration
    assert!(sim.create_body(params(10.0, 20.0, true)).is_ok());
}

#[test]
fn test_preview_on_snapshot_while_ticking() {
    let (mut sim, _, planet) = make_simulation();
    let snapshot = sim.clone();

    let handle = std::thread::spawn(move || snapshot.predict_path(planet, 30.0));
    for _ in 0..100 {
        sim.tick(1.0).unwrap();
    }
    let path = handle.join().unwrap().unwrap();

    assert!(!path.is_empty());
    assert_eq!(sim.ticks(), 100);
}
