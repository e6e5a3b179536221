//! Fixed-step time integration
//!
//! Anchors are never integrated. Every other body is advanced with a
//! semi-implicit Euler step split into two passes over the whole registry:
//!
//! 1. Kick: a(t) for every body from pre-tick positions, then v += a·dt
//! 2. Drift: x += v·dt with the velocity from pass 1
//!
//! No position moves until every acceleration of the tick is known, so the
//! result does not depend on iteration order.

use crate::error::Result;
use crate::forces::ForceModel;
use crate::state::SystemState;
use nalgebra::Vector3;

/// A time integrator for the body registry
pub trait Integrator: Send + Sync {
    /// Advance the system by one timestep
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state (modified in place)
    /// * `dt` - Timestep in simulation time units
    /// * `force` - Force model to compute accelerations
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) -> Result<()>;

    /// Advance the system by multiple timesteps, returning the final time
    fn integrate(
        &self,
        state: &mut SystemState,
        dt: f64,
        n_steps: usize,
        force: &dyn ForceModel,
    ) -> Result<f64> {
        for _ in 0..n_steps {
            self.step(state, dt, force)?;
        }
        Ok(state.time)
    }
}

/// Two-pass semi-implicit Euler (kick, then drift)
///
/// # Examples
///
/// ```
/// use orbits::forces::HierarchicalGravity;
/// use orbits::integrator::{Integrator, TwoPassEuler};
/// use orbits::state::{BodyParams, OrbitParams, Placement, SystemState};
///
/// let g = 0.1;
/// let mut system = SystemState::new();
/// let star = system
///     .create_body(BodyParams { radius: 10.0, surface_gravity: 20.0, axis_tilt: 0.0, axial_spin: 0.0, is_anchor: true }, g)
///     .unwrap();
/// let planet = system
///     .create_body(BodyParams { radius: 1.0, surface_gravity: 1.0, axis_tilt: 0.0, axial_spin: 0.0, is_anchor: false }, g)
///     .unwrap();
/// let orbit = OrbitParams { eccentricity: 1.0, placement: Placement::Offset { angle_deg: 0.0, distance: 50.0 } };
/// system.assign_parent(planet, star, orbit, g).unwrap();
///
/// TwoPassEuler.step(&mut system, 0.01, &HierarchicalGravity::new(g)).unwrap();
/// assert!(system.time > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPassEuler;

impl TwoPassEuler {
    /// Accelerations for every body at its current position; anchors get none
    fn accelerations(
        &self,
        state: &SystemState,
        force: &dyn ForceModel,
    ) -> Result<Vec<Option<Vector3<f64>>>> {
        state
            .bodies()
            .iter()
            .enumerate()
            .map(|(i, body)| {
                if body.is_anchor() {
                    Ok(None)
                } else {
                    force.acceleration(i, body.position(), state).map(Some)
                }
            })
            .collect()
    }

    fn kick(&self, state: &mut SystemState, accelerations: &[Option<Vector3<f64>>], dt: f64) {
        state
            .bodies_mut()
            .iter_mut()
            .zip(accelerations.iter())
            .for_each(|(body, accel)| {
                if let Some(accel) = accel {
                    body.velocity += accel * dt;
                    body.spin.advance(dt);
                }
            });
    }

    fn drift(&self, state: &mut SystemState, dt: f64) {
        state
            .bodies_mut()
            .iter_mut()
            .filter(|body| !body.is_anchor())
            .for_each(|body| {
                body.position += body.velocity * dt;
            });
    }
}

impl Integrator for TwoPassEuler {
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) -> Result<()> {
        let accelerations = self.accelerations(state, force)?;
        self.kick(state, &accelerations, dt);
        self.drift(state, dt);
        state.time += dt;
        Ok(())
    }
}
