use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::BodyId;
use crate::error::OrbitError;
use crate::initial_velocity::{initial_velocity, tangent_direction, vis_viva_speed};
use crate::state::{BodyParams, OrbitParams, Placement, SystemState};

const G: f64 = 0.1;

fn make_pair() -> (SystemState, BodyId, BodyId) {
    let mut system = SystemState::new();
    let star = system
        .create_body(
            BodyParams {
                radius: 10.0,
                surface_gravity: 20.0,
                axis_tilt: 0.0,
                axial_spin: 0.0,
                is_anchor: true,
            },
            G,
        )
        .unwrap();
    let planet = system
        .create_body(
            BodyParams {
                radius: 1.0,
                surface_gravity: 2.0,
                axis_tilt: 0.0,
                axial_spin: 0.0,
                is_anchor: false,
            },
            G,
        )
        .unwrap();
    (system, star, planet)
}

fn circular(angle_deg: f64, distance: f64) -> OrbitParams {
    OrbitParams {
        eccentricity: 1.0,
        placement: Placement::Offset {
            angle_deg,
            distance,
        },
    }
}

#[test]
fn test_speed_matches_vis_viva_with_squared_proxy() {
    for (angle, distance) in [(0.0, 50.0), (37.0, 12.5), (135.0, 80.0), (250.0, 3.0)] {
        let (mut system, star, planet) = make_pair();
        system
            .assign_parent(planet, star, circular(angle, distance), G)
            .unwrap();

        let parent_mass = system.get_body(star).unwrap().mass();
        let expected = (G * parent_mass * (2.0 / distance - 1.0 / (distance * distance))).sqrt();
        let velocity = system.get_body(planet).unwrap().initial_velocity();

        assert_relative_eq!(velocity.magnitude(), expected, max_relative = 1e-9);
    }
}

#[test]
fn test_velocity_is_orthogonal_to_displacement() {
    for angle in [10.0, 45.0, 90.0, 200.0, 315.0] {
        let (mut system, star, planet) = make_pair();
        system
            .assign_parent(planet, star, circular(angle, 40.0), G)
            .unwrap();

        let child = system.get_body(planet).unwrap();
        let parent = system.get_body(star).unwrap();
        let d = parent.position() - child.position();
        let v = child.initial_velocity();

        assert!(
            (d.dot(&v) / (d.magnitude() * v.magnitude())).abs() < 1e-9,
            "angle {angle}: d·v = {}",
            d.dot(&v)
        );
        assert_eq!(v.y, 0.0);
    }
}

#[test]
fn test_aligned_on_z_uses_forward_axis() {
    for x in [30.0, -30.0, 0.75] {
        let (mut system, star, planet) = make_pair();
        system.set_position(planet, Point3::new(x, 0.0, 0.0)).unwrap();
        system
            .assign_parent(
                planet,
                star,
                OrbitParams {
                    eccentricity: 1.0,
                    placement: Placement::KeepPosition,
                },
                G,
            )
            .unwrap();

        let v = system.get_body(planet).unwrap().initial_velocity();
        assert_relative_eq!(v.normalize(), Vector3::z(), epsilon = 1e-12);
    }
}

#[test]
fn test_tangent_direction_forward_case() {
    assert_eq!(tangent_direction(&Vector3::new(-7.0, 0.0, 0.0)), Vector3::z());
    assert_eq!(tangent_direction(&Vector3::new(3.0, 0.0, 0.0)), Vector3::z());
}

#[test]
fn test_tangent_direction_is_unit_and_planar() {
    let d = Vector3::new(3.0, 0.0, -4.0);
    let t = tangent_direction(&d);
    assert_relative_eq!(t.magnitude(), 1.0, epsilon = 1e-12);
    assert_eq!(t.y, 0.0);
    assert_relative_eq!(t.dot(&d), 0.0, epsilon = 1e-12);
}

#[test]
fn test_eccentricity_scales_speed() {
    let (mut full, star, planet) = make_pair();
    full.assign_parent(planet, star, circular(60.0, 25.0), G).unwrap();

    let (mut detuned, star2, planet2) = make_pair();
    detuned
        .assign_parent(
            planet2,
            star2,
            OrbitParams {
                eccentricity: 0.71,
                placement: Placement::Offset {
                    angle_deg: 60.0,
                    distance: 25.0,
                },
            },
            G,
        )
        .unwrap();

    let v_full = full.get_body(planet).unwrap().initial_velocity();
    let v_detuned = detuned.get_body(planet2).unwrap().initial_velocity();
    assert_relative_eq!(v_detuned, v_full * 0.71, epsilon = 1e-9);
}

#[test]
fn test_vertical_offset_is_ignored() {
    let (system, star, planet) = {
        let (mut s, star, planet) = make_pair();
        s.set_position(planet, Point3::new(0.0, 5.0, 20.0)).unwrap();
        (s, star, planet)
    };

    let child = system.get_body(planet).unwrap();
    let parent = system.get_body(star).unwrap();
    let v = initial_velocity(child, parent, G, 1.0).unwrap();

    let expected = vis_viva_speed(&Vector3::new(0.0, 0.0, -20.0), parent.mass(), G).unwrap();
    assert_relative_eq!(v.magnitude(), expected, max_relative = 1e-12);
    assert_eq!(v.y, 0.0);
}

#[test]
fn test_zero_separation_is_degenerate() {
    let (system, star, planet) = make_pair();
    // Both bodies start at the origin
    let child = system.get_body(planet).unwrap();
    let parent = system.get_body(star).unwrap();

    let result = initial_velocity(child, parent, G, 1.0);
    assert!(matches!(result, Err(OrbitError::DegenerateOrbit { .. })));
}

#[test]
fn test_close_orbit_with_negative_radicand_is_degenerate() {
    let (mut system, star, planet) = make_pair();
    // 2/r - 1/r² < 0 for r < 0.5
    let result = system.assign_parent(planet, star, circular(0.0, 0.3), G);
    assert!(matches!(result, Err(OrbitError::DegenerateOrbit { .. })));
}

#[test]
fn test_invalid_eccentricity() {
    let (system, star, planet) = make_pair();
    let child = system.get_body(planet).unwrap();
    let parent = system.get_body(star).unwrap();

    assert_eq!(
        initial_velocity(child, parent, G, 0.0),
        Err(OrbitError::InvalidEccentricity(0.0))
    );
    assert!(initial_velocity(child, parent, G, f64::NAN).is_err());
}
