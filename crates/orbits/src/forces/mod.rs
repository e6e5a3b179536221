//! Acceleration models
//!
//! A [`ForceModel`] answers "what acceleration would body `idx` feel at
//! `point`?" against a registry snapshot. The integrator asks at the body's
//! own position; the orbit predictor asks at points along a preview path.

use crate::error::Result;
use crate::state::SystemState;
use nalgebra::{Point3, Vector3};

pub mod gravity;


pub use gravity::HierarchicalGravity;

/// A source of acceleration on bodies in the registry
///
/// # Examples
///
/// ```
/// use nalgebra::Point3;
/// use orbits::forces::{ForceModel, HierarchicalGravity};
/// use orbits::state::{BodyParams, SystemState};
///
/// let g = 0.1;
/// let mut system = SystemState::new();
/// let params = BodyParams {
///     radius: 1.0,
///     surface_gravity: 1.0,
///     axis_tilt: 0.0,
///     axial_spin: 0.0,
///     is_anchor: false,
/// };
/// let a = system.create_body(params, g).unwrap();
/// let b = system.create_body(params, g).unwrap();
/// system.set_position(b, Point3::new(2.0, 0.0, 0.0)).unwrap();
///
/// let gravity = HierarchicalGravity::new(g);
/// let accel = gravity.acceleration(0, Point3::origin(), &system).unwrap();
///
/// // Body `a` is pulled toward `b`
/// assert!(accel.x > 0.0);
/// # let _ = a;
/// ```
pub trait ForceModel: Send + Sync {
    /// Acceleration on the body at index `idx` if it were at `point`
    ///
    /// Fails rather than returning a non-finite vector when a contributing
    /// body sits exactly at `point`.
    fn acceleration(
        &self,
        idx: usize,
        point: Point3<f64>,
        state: &SystemState,
    ) -> Result<Vector3<f64>>;
}
