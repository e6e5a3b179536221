//! Hierarchical gravity: one dominant source per body

use crate::body::BodyId;
use crate::error::{OrbitError, Result};
use crate::forces::ForceModel;
use crate::state::SystemState;
use nalgebra::{Point3, Vector3};

/// Gravity from the body's orbital parent only, or from every other body
/// when it has none
///
/// Following a single parent keeps planets and moons on stable orbits. Bodies
/// without a parent (the anchor, or bodies left free on purpose) fall back to
/// a direct O(N) sum over the registry.
#[derive(Debug, Clone, Copy)]
pub struct HierarchicalGravity {
    /// Gravitational constant in simulation units
    pub g: f64,
}

impl HierarchicalGravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Acceleration toward a point mass at `source`
    fn pull(
        &self,
        target: BodyId,
        source_id: BodyId,
        source: Point3<f64>,
        source_mass: f64,
        point: Point3<f64>,
    ) -> Result<Vector3<f64>> {
        let dr = source - point;
        let r2 = dr.magnitude_squared();
        if r2 == 0.0 {
            return Err(OrbitError::CoincidentBodies {
                a: target,
                b: source_id,
            });
        }
        Ok(dr * (self.g * source_mass / (r2 * r2.sqrt())))
    }
}

impl ForceModel for HierarchicalGravity {
    fn acceleration(
        &self,
        idx: usize,
        point: Point3<f64>,
        state: &SystemState,
    ) -> Result<Vector3<f64>> {
        let bodies = state.bodies();
        let body = bodies.get(idx).ok_or(OrbitError::IndexOutOfRange(idx))?;

        if let Some(link) = body.parent() {
            let parent = state
                .get_body(link.id)
                .ok_or(OrbitError::UnknownBody(link.id))?;
            return self.pull(body.id(), link.id, parent.position(), link.mass, point);
        }

        bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .try_fold(Vector3::zeros(), |acc, (_, other)| -> Result<Vector3<f64>> {
                let a = self.pull(body.id(), other.id(), other.position(), other.mass(), point)?;
                Ok(acc + a)
            })
    }
}
