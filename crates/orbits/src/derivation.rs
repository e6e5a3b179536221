//! Mass and gravitational parameter derivation
//!
//! Mass is never set directly. It follows from surface gravity and radius:
//! g = G·M / r², so M = r²·g / G.

use crate::error::{OrbitError, Result};

/// Derives body mass from radius and surface gravitational acceleration
///
/// # Examples
///
/// ```
/// use orbits::derivation::derive_mass;
///
/// let mass = derive_mass(2.0, 5.0, 0.1).unwrap();
/// assert!((mass - 200.0).abs() < 1e-9);
/// assert!(derive_mass(0.0, 5.0, 0.1).is_err());
/// ```
pub fn derive_mass(radius: f64, surface_gravity: f64, g: f64) -> Result<f64> {
    positive("radius", radius)?;
    positive("surface_gravity", surface_gravity)?;
    if !(g.is_finite() && g > 0.0) {
        return Err(OrbitError::InvalidConstant {
            name: "gravitational_constant",
            value: g,
        });
    }
    Ok(radius * radius * surface_gravity / g)
}

/// Standard gravitational parameter μ = G·M
pub fn gravitational_parameter(mass: f64, g: f64) -> f64 {
    g * mass
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OrbitError::InvalidBodyParameter { name, value })
    }
}
