use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::{Body, BodyId, IdAllocator, OrbitalRole, ParentLink, Spin};
use crate::derivation::derive_mass;
use crate::error::{OrbitError, Result};
use crate::initial_velocity::initial_velocity;

/// Physical parameters supplied when a body is created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    pub radius: f64,
    pub surface_gravity: f64,
    /// Degrees
    pub axis_tilt: f64,
    /// Degrees per unit of simulation time
    pub axial_spin: f64,
    pub is_anchor: bool,
}

/// Where a child ends up when it is linked to a parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Move the child to `parent + (cos θ, 0, sin θ) · distance`
    Offset { angle_deg: f64, distance: f64 },
    /// Keep the child where it is and only recompute its velocity
    KeepPosition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub eccentricity: f64,
    pub placement: Placement,
}

/// Registry of every body in one simulation run
///
/// Positions and velocities are only changed by the integrator and by the
/// wiring operations below. Cloning the state yields a point-in-time snapshot.
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    /// Simulation time elapsed over all ticks
    pub time: f64,
    bodies: Vec<Body>,
    ids: IdAllocator,
    anchor: Option<BodyId>,
}

impl SystemState {
    /// Creates an empty registry with a fresh id allocator
    ///
    /// # Examples
    ///
    /// ```
    /// use orbits::state::SystemState;
    ///
    /// let system = SystemState::new();
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a body and returns its id
    ///
    /// Mass is derived from `radius` and `surface_gravity` with the given
    /// gravitational constant. The body starts at the origin at rest; an
    /// orbiting body gets its velocity from [`SystemState::assign_parent`].
    ///
    /// # Examples
    ///
    /// ```
    /// use orbits::state::{BodyParams, SystemState};
    ///
    /// let mut system = SystemState::new();
    /// let star = system
    ///     .create_body(
    ///         BodyParams {
    ///             radius: 10.0,
    ///             surface_gravity: 20.0,
    ///             axis_tilt: 0.0,
    ///             axial_spin: 0.0,
    ///             is_anchor: true,
    ///         },
    ///         0.1,
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(system.find_by_id(star), Some(star));
    /// assert_eq!(system.anchor(), Some(star));
    /// ```
    pub fn create_body(&mut self, params: BodyParams, g: f64) -> Result<BodyId> {
        let mass = derive_mass(params.radius, params.surface_gravity, g)?;

        if params.is_anchor {
            if let Some(existing) = self.anchor {
                return Err(OrbitError::DuplicateAnchor(existing));
            }
        }

        let id = self.ids.allocate()?;
        let role = if params.is_anchor {
            self.anchor = Some(id);
            OrbitalRole::Anchor
        } else {
            OrbitalRole::Orbiting { parent: None }
        };

        self.bodies.push(Body {
            id,
            radius: params.radius,
            surface_gravity: params.surface_gravity,
            mass,
            position: Point3::origin(),
            velocity: Vector3::zeros(),
            initial_velocity: Vector3::zeros(),
            role,
            spin: Spin::new(params.axis_tilt, params.axial_spin),
            trace_length: None,
        });

        debug!(?id, mass, anchor = params.is_anchor, "created body");
        Ok(id)
    }

    /// Links `child` to `parent` and initialises the child's velocity
    ///
    /// Every check runs before anything is written, so a rejected link leaves
    /// the registry exactly as it was.
    pub fn assign_parent(
        &mut self,
        child: BodyId,
        parent: BodyId,
        orbit: OrbitParams,
        g: f64,
    ) -> Result<()> {
        let child_idx = self.index_of(child).ok_or(OrbitError::UnknownBody(child))?;
        let parent_idx = self.index_of(parent).ok_or(OrbitError::UnknownBody(parent))?;

        if child == parent {
            return Err(OrbitError::SelfParent(child));
        }
        if self.bodies[child_idx].is_anchor() {
            return Err(OrbitError::AnchorCannotOrbit(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(OrbitError::ParentCycle { child, parent });
        }

        let parent_body = self.bodies[parent_idx];
        let mut placed = self.bodies[child_idx];
        if let Placement::Offset {
            angle_deg,
            distance,
        } = orbit.placement
        {
            if !(distance.is_finite() && distance > 0.0) {
                return Err(OrbitError::InvalidBodyParameter {
                    name: "distance",
                    value: distance,
                });
            }
            let theta = angle_deg.to_radians();
            let direction = Vector3::new(theta.cos(), 0.0, theta.sin());
            placed.position = parent_body.position + direction * distance;
        }

        let velocity = initial_velocity(&placed, &parent_body, g, orbit.eccentricity)?;

        placed.initial_velocity = velocity;
        placed.velocity = velocity;
        placed.role = OrbitalRole::Orbiting {
            parent: Some(ParentLink {
                id: parent,
                mass: parent_body.mass,
            }),
        };
        self.bodies[child_idx] = placed;

        debug!(?child, ?parent, speed = velocity.magnitude(), "assigned orbital parent");
        Ok(())
    }

    /// Moves a body without recomputing its velocity
    pub fn set_position(&mut self, id: BodyId, position: Point3<f64>) -> Result<()> {
        let body = self.get_body_mut(id).ok_or(OrbitError::UnknownBody(id))?;
        body.position = position;
        Ok(())
    }

    /// Sets or clears the trajectory preview budget of a body
    pub fn set_trace_length(&mut self, id: BodyId, length: Option<f64>) -> Result<()> {
        if let Some(length) = length {
            if !(length.is_finite() && length >= 0.0) {
                return Err(OrbitError::InvalidLengthBudget(length));
            }
        }
        let body = self.get_body_mut(id).ok_or(OrbitError::UnknownBody(id))?;
        body.trace_length = length;
        Ok(())
    }

    /// Resolves an id to a live body, `None` if it was never issued or was cleared
    pub fn find_by_id(&self, id: BodyId) -> Option<BodyId> {
        self.get_body(id).map(|b| b.id)
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub(crate) fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Returns the number of registered bodies, anchor included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn anchor(&self) -> Option<BodyId> {
        self.anchor
    }

    /// Removes every body; ids keep counting up
    pub fn clear(&mut self) {
        debug!(count = self.bodies.len(), "clearing registry");
        self.bodies.clear();
        self.anchor = None;
        self.time = 0.0;
    }

    /// Total kinetic energy of all non-anchor bodies
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .filter(|b| !b.is_anchor())
            .map(|b| b.kinetic_energy())
            .sum()
    }

    /// True if `ancestor` appears on the parent chain starting at `id`
    fn is_ancestor(&self, ancestor: BodyId, id: BodyId) -> bool {
        let mut current = Some(id);
        // The chain can be no longer than the registry if the graph is a forest
        for _ in 0..=self.bodies.len() {
            match current {
                Some(c) if c == ancestor => return true,
                Some(c) => current = self.get_body(c).and_then(|b| b.parent()).map(|p| p.id),
                None => return false,
            }
        }
        true
    }
}
