//! One simulation run: registry, constants, gravity, integrator and predictor

use nalgebra::Point3;
use tracing::{error, trace};

use crate::body::{Body, BodyId};
use crate::config::SimulationConfig;
use crate::error::{OrbitError, Result};
use crate::forces::HierarchicalGravity;
use crate::integrator::{Integrator, TwoPassEuler};
use crate::predictor::{OrbitPredictor, PredictedPath, PredictedSegments, VelocitySource};
use crate::state::{BodyParams, OrbitParams, SystemState};

/// Entry point for generation, tick and visualization collaborators
///
/// # Examples
///
/// ```
/// use orbits::config::SimulationConfig;
/// use orbits::simulation::Simulation;
/// use orbits::state::{BodyParams, OrbitParams, Placement};
///
/// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
/// let star = sim
///     .create_body(BodyParams { radius: 10.0, surface_gravity: 20.0, axis_tilt: 0.0, axial_spin: 0.0, is_anchor: true })
///     .unwrap();
/// let planet = sim
///     .create_body(BodyParams { radius: 1.0, surface_gravity: 1.0, axis_tilt: 0.0, axial_spin: 0.0, is_anchor: false })
///     .unwrap();
/// sim.assign_parent(
///     planet,
///     star,
///     OrbitParams { eccentricity: 0.9, placement: Placement::Offset { angle_deg: 0.0, distance: 50.0 } },
/// )
/// .unwrap();
///
/// let path = sim.predict_path(planet, 20.0).unwrap();
/// assert!(!path.is_empty());
///
/// sim.tick(1.0).unwrap();
/// assert!(sim.is_running());
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    state: SystemState,
    gravity: HierarchicalGravity,
    integrator: TwoPassEuler,
    predictor: OrbitPredictor,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: SystemState::new(),
            gravity: HierarchicalGravity::new(config.gravitational_constant),
            integrator: TwoPassEuler,
            predictor: OrbitPredictor::new(config.max_prediction_steps),
            ticks: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Point-in-time copy of the registry
    pub fn snapshot(&self) -> SystemState {
        self.state.clone()
    }

    pub fn create_body(&mut self, params: BodyParams) -> Result<BodyId> {
        self.state
            .create_body(params, self.config.gravitational_constant)
    }

    pub fn assign_parent(&mut self, child: BodyId, parent: BodyId, orbit: OrbitParams) -> Result<()> {
        self.state
            .assign_parent(child, parent, orbit, self.config.gravitational_constant)
    }

    pub fn set_position(&mut self, id: BodyId, position: Point3<f64>) -> Result<()> {
        self.state.set_position(id, position)
    }

    pub fn set_trace_length(&mut self, id: BodyId, length: Option<f64>) -> Result<()> {
        self.state.set_trace_length(id, length)
    }

    pub fn find_by_id(&self, id: BodyId) -> Option<BodyId> {
        self.state.find_by_id(id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.state.get_body(id)
    }

    pub fn bodies(&self) -> &[Body] {
        self.state.bodies()
    }

    /// Number of ticks run since creation or the last [`Simulation::clear`]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.ticks > 0
    }

    /// Advances every non-anchor body by one physics step scaled by `speed_multiplier`
    pub fn tick(&mut self, speed_multiplier: f64) -> Result<()> {
        if !(speed_multiplier.is_finite() && speed_multiplier > 0.0) {
            return Err(OrbitError::InvalidSpeedMultiplier(speed_multiplier));
        }
        let dt = self.config.physics_time_step * speed_multiplier;

        if let Err(err) = self.integrator.step(&mut self.state, dt, &self.gravity) {
            error!(%err, tick = self.ticks, "tick failed");
            return Err(err);
        }
        self.ticks += 1;
        trace!(tick = self.ticks, time = self.state.time, "tick");
        Ok(())
    }

    /// Lazy preview of `id`'s trajectory using the tracer time step
    pub fn path_iter(&self, id: BodyId, length_budget: f64) -> Result<PredictedPath<'_>> {
        let source = if self.is_running() {
            VelocitySource::Live
        } else {
            VelocitySource::Initial
        };
        self.predictor.predict(
            &self.state,
            &self.gravity,
            id,
            length_budget,
            self.config.tracer_time_step,
            source,
        )
    }

    /// Ordered segments of `id`'s predicted trajectory
    ///
    /// A preview cut short by `max_prediction_steps` comes back with
    /// `truncated` set.
    pub fn predict_path(&self, id: BodyId, length_budget: f64) -> Result<PredictedSegments> {
        let mut path = self.path_iter(id, length_budget)?;
        let segments = path.by_ref().collect::<Result<Vec<_>>>()?;
        Ok(PredictedSegments {
            segments,
            truncated: path.truncated(),
        })
    }

    /// Predicted paths of every body with a trace length set
    pub fn traced_paths(&self) -> Result<Vec<(BodyId, PredictedSegments)>> {
        self.state
            .bodies()
            .iter()
            .filter_map(|b| b.trace_length().map(|length| (b.id(), length)))
            .map(|(id, length)| Ok((id, self.predict_path(id, length)?)))
            .collect()
    }

    /// Drops every body so the system can be regenerated from scratch
    pub fn clear(&mut self) {
        self.state.clear();
        self.ticks = 0;
    }
}
