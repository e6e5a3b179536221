use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{OrbitError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Hands out body ids for one simulation run
///
/// Ids are never reused, even after the registry is cleared.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails once every `u32` id has been issued
    pub fn allocate(&mut self) -> Result<BodyId> {
        let id = BodyId(self.next);
        self.next = self.next.checked_add(1).ok_or(OrbitError::IdsExhausted)?;
        Ok(id)
    }

    #[cfg(test)]
    pub(crate) fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.next
    }
}

/// Link to the body whose gravity this body follows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentLink {
    pub id: BodyId,
    /// Parent mass captured when the link was made, not re-read afterwards
    pub mass: f64,
}

/// Physics role of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitalRole {
    /// Gravity source that is never integrated (the system's star)
    Anchor,
    /// Integrated body; without a parent it feels every other body
    Orbiting { parent: Option<ParentLink> },
}

impl OrbitalRole {
    pub fn is_anchor(&self) -> bool {
        matches!(self, OrbitalRole::Anchor)
    }

    pub fn parent(&self) -> Option<ParentLink> {
        match self {
            OrbitalRole::Anchor => None,
            OrbitalRole::Orbiting { parent } => *parent,
        }
    }
}

/// Axial tilt and spin, kept apart from the orbital state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    /// Tilt of the local up axis about the forward (z) axis, degrees
    pub axis_tilt_deg: f64,
    /// Degrees per unit of simulation time
    pub axial_spin_deg_per_sec: f64,
    /// Accumulated rotation about the local up axis, degrees in [0, 360)
    pub rotation_deg: f64,
}

impl Spin {
    pub fn new(axis_tilt_deg: f64, axial_spin_deg_per_sec: f64) -> Self {
        Self {
            axis_tilt_deg,
            axial_spin_deg_per_sec,
            rotation_deg: 0.0,
        }
    }

    pub fn local_up(&self) -> Vector3<f64> {
        self.tilt() * Vector3::y()
    }

    /// Tilt followed by the accumulated spin about the tilted axis
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        let spin = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.rotation_deg.to_radians());
        self.tilt() * spin
    }

    pub fn advance(&mut self, dt: f64) {
        self.rotation_deg = (self.rotation_deg + self.axial_spin_deg_per_sec * dt).rem_euclid(360.0);
    }

    fn tilt(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.axis_tilt_deg.to_radians())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) radius: f64,
    pub(crate) surface_gravity: f64,
    pub(crate) mass: f64,
    pub(crate) position: Point3<f64>,
    pub(crate) velocity: Vector3<f64>,
    pub(crate) initial_velocity: Vector3<f64>,
    pub(crate) role: OrbitalRole,
    pub(crate) spin: Spin,
    pub(crate) trace_length: Option<f64>,
}

impl Body {
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn surface_gravity(&self) -> f64 {
        self.surface_gravity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    /// Velocity computed when the parent was assigned
    pub fn initial_velocity(&self) -> Vector3<f64> {
        self.initial_velocity
    }

    pub fn role(&self) -> OrbitalRole {
        self.role
    }

    pub fn is_anchor(&self) -> bool {
        self.role.is_anchor()
    }

    pub fn parent(&self) -> Option<ParentLink> {
        self.role.parent()
    }

    pub fn spin(&self) -> Spin {
        self.spin
    }

    /// Path preview budget, if this body wants its orbit traced
    pub fn trace_length(&self) -> Option<f64> {
        self.trace_length
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Specific angular momentum (r × v) relative to `origin`
    pub fn specific_angular_momentum(&self, origin: &Point3<f64>) -> Vector3<f64> {
        (self.position - origin).cross(&self.velocity)
    }
}
