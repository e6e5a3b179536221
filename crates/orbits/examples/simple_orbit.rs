//! Simple orbital integration example
//!
//! A single planet with one moon around an anchored star. Prints the planet's
//! orbital radius once per simulated time unit and a short path preview.
//!
//! Run with: cargo run --package orbits --example simple_orbit

use orbits::config::SimulationConfig;
use orbits::simulation::Simulation;
use orbits::state::{BodyParams, OrbitParams, Placement};
use orbits::OrbitError;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), OrbitError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    println!("Hierarchical orbit: star, planet, moon\n");
    println!("{}", "=".repeat(60));

    let mut sim = Simulation::new(SimulationConfig::default())?;

    let star = sim.create_body(BodyParams {
        radius: 10.0,
        surface_gravity: 20.0,
        axis_tilt: 0.0,
        axial_spin: 2.0,
        is_anchor: true,
    })?;
    let planet = sim.create_body(BodyParams {
        radius: 2.0,
        surface_gravity: 3.0,
        axis_tilt: 23.5,
        axial_spin: 45.0,
        is_anchor: false,
    })?;
    let moon = sim.create_body(BodyParams {
        radius: 0.5,
        surface_gravity: 0.1,
        axis_tilt: 5.0,
        axial_spin: 10.0,
        is_anchor: false,
    })?;

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
    )?;
    sim.assign_parent(
        moon,
        planet,
        OrbitParams {
            eccentricity: 0.71,
            placement: Placement::Offset {
                angle_deg: 90.0,
                distance: 8.0,
            },
        },
    )?;

    for id in [star, planet, moon] {
        if let Some(body) = sim.body(id) {
            println!(
                "{:?}: mass={:.2}, |v0|={:.4}",
                id,
                body.mass(),
                body.initial_velocity().magnitude()
            );
        }
    }

    let preview = sim.predict_path(planet, 40.0)?;
    println!(
        "\nPreview: {} segments{}",
        preview.len(),
        if preview.truncated { " (truncated)" } else { "" }
    );
    if let (Some(first), Some(last)) = (preview.segments.first(), preview.segments.last()) {
        println!("  from {:?}", first.start);
        println!("  to   {:?}", last.end);
    }

    println!("\nIntegrating...");
    let ticks_per_unit = (1.0 / sim.config().physics_time_step).round() as u64;
    for unit in 1..=50 {
        for _ in 0..ticks_per_unit {
            sim.tick(1.0)?;
        }
        if unit % 5 == 0 {
            let star_pos = sim.body(star).map(|b| b.position());
            let planet_body = sim.body(planet);
            if let (Some(origin), Some(body)) = (star_pos, planet_body) {
                println!(
                    "t={:>5.1}: r={:.4}, |v|={:.4}, spin={:.1}°",
                    sim.state().time,
                    (body.position() - origin).magnitude(),
                    body.speed(),
                    body.spin().rotation_deg
                );
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Ticks run: {}", sim.ticks());
    Ok(())
}
