//! Initial orbital velocity for a body placed around its parent
//!
//! The solver works in the x/z plane (y is out of plane). It picks the
//! in-plane tangent to the parent displacement and a vis-viva speed:
//!
//! v = √(G·M·(2/r − 1/a))
//!
//! where `r` is the planar distance and `a` is the *squared* planar distance.
//! The squared proxy for the semi-major axis is kept as-is; it makes the
//! orbit close to circular for large separations and lets the eccentricity
//! factor do the detuning.

use nalgebra::Vector3;

use crate::body::Body;
use crate::error::{OrbitError, Result};

/// Unit vector tangent to the planar displacement `d`
///
/// When the displacement has no z component the slope form is undefined and
/// the forward axis is returned instead.
pub fn tangent_direction(d: &Vector3<f64>) -> Vector3<f64> {
    if d.z == 0.0 {
        return Vector3::z();
    }
    let slope = -d.x / d.z;
    let h = (1.0 + slope * slope).sqrt();
    Vector3::new(1.0 / h, 0.0, slope / h).normalize()
}

/// Speed magnitude for a parent of `parent_mass` at planar displacement `d`
///
/// Returns `None` when the separation is zero or the vis-viva radicand is
/// negative, since neither has a real speed.
pub fn vis_viva_speed(d: &Vector3<f64>, parent_mass: f64, g: f64) -> Option<f64> {
    let semi_major_axis = d.x * d.x + d.z * d.z;
    if semi_major_axis == 0.0 {
        return None;
    }
    let distance = semi_major_axis.sqrt();
    let radicand = g * parent_mass * (2.0 / distance - 1.0 / semi_major_axis);
    if radicand < 0.0 || !radicand.is_finite() {
        return None;
    }
    Some(radicand.sqrt())
}

/// Velocity that puts `child` on an orbit around `parent`
///
/// `eccentricity` scales the computed speed; 1.0 keeps it, smaller values
/// drop the body into a tighter ellipse.
pub fn initial_velocity(
    child: &Body,
    parent: &Body,
    g: f64,
    eccentricity: f64,
) -> Result<Vector3<f64>> {
    if !(eccentricity.is_finite() && eccentricity > 0.0) {
        return Err(OrbitError::InvalidEccentricity(eccentricity));
    }

    let mut d = parent.position - child.position;
    d.y = 0.0;

    let degenerate = |reason| OrbitError::DegenerateOrbit {
        child: child.id,
        parent: parent.id,
        reason,
    };

    if d.x == 0.0 && d.z == 0.0 {
        return Err(degenerate("zero planar separation"));
    }
    let speed = vis_viva_speed(&d, parent.mass, g).ok_or_else(|| degenerate("negative vis-viva term"))?;

    Ok(tangent_direction(&d) * (speed * eccentricity))
}
