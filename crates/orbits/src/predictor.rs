//! Trajectory preview
//!
//! Steps a private copy of one body through the same kick/drift update the
//! integrator uses, against a fixed registry snapshot: other bodies do not
//! move during a preview. The result is a lazy sequence of segments that
//! ends once the summed squared segment lengths reach the square of the
//! requested length budget, or after a fixed number of steps, whichever
//! comes first.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::body::BodyId;
use crate::config::DEFAULT_MAX_PREDICTION_STEPS;
use crate::error::{OrbitError, Result};
use crate::forces::ForceModel;
use crate::state::SystemState;

/// One predicted step of motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment {
    pub fn length_squared(&self) -> f64 {
        (self.end - self.start).magnitude_squared()
    }
}

/// A fully collected preview
///
/// `truncated` is set when the step cap ended the preview before the length
/// budget was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedSegments {
    pub segments: Vec<Segment>,
    pub truncated: bool,
}

impl PredictedSegments {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of the squared segment lengths, the quantity compared to L²
    pub fn total_length_squared(&self) -> f64 {
        self.segments.iter().map(Segment::length_squared).sum()
    }
}

/// Which velocity a preview starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocitySource {
    /// The body's current velocity, once the simulation is running
    Live,
    /// The velocity computed when the parent was assigned
    Initial,
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitPredictor {
    pub max_steps: usize,
}

impl Default for OrbitPredictor {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_PREDICTION_STEPS,
        }
    }
}

impl OrbitPredictor {
    pub fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }

    /// Starts a preview for `id`
    ///
    /// Nothing is stepped until the returned iterator is consumed.
    pub fn predict<'a>(
        &self,
        state: &'a SystemState,
        force: &'a dyn ForceModel,
        id: BodyId,
        length_budget: f64,
        dt: f64,
        source: VelocitySource,
    ) -> Result<PredictedPath<'a>> {
        if !(length_budget.is_finite() && length_budget >= 0.0) {
            return Err(OrbitError::InvalidLengthBudget(length_budget));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(OrbitError::InvalidTimeStep(dt));
        }
        let idx = state.index_of(id).ok_or(OrbitError::UnknownBody(id))?;
        let body = &state.bodies()[idx];
        let velocity = match source {
            VelocitySource::Live => body.velocity(),
            VelocitySource::Initial => body.initial_velocity(),
        };

        Ok(PredictedPath {
            state,
            force,
            idx,
            id,
            dt,
            position: body.position(),
            velocity,
            budget_squared: length_budget * length_budget,
            travelled_squared: 0.0,
            steps: 0,
            max_steps: self.max_steps,
            truncated: false,
            done: false,
        })
    }
}

/// Lazy, finite sequence of predicted segments
///
/// Yields `Err` at most once, if an acceleration query fails, and then ends.
pub struct PredictedPath<'a> {
    state: &'a SystemState,
    force: &'a dyn ForceModel,
    idx: usize,
    id: BodyId,
    dt: f64,
    position: Point3<f64>,
    velocity: Vector3<f64>,
    budget_squared: f64,
    travelled_squared: f64,
    steps: usize,
    max_steps: usize,
    truncated: bool,
    done: bool,
}

impl PredictedPath<'_> {
    /// Sum of squared segment lengths emitted so far
    pub fn travelled_squared(&self) -> f64 {
        self.travelled_squared
    }

    /// True if the preview stopped on the step cap instead of the budget
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl Iterator for PredictedPath<'_> {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.travelled_squared >= self.budget_squared {
            return None;
        }
        if self.steps >= self.max_steps {
            self.done = true;
            self.truncated = true;
            warn!(
                id = ?self.id,
                steps = self.steps,
                travelled = self.travelled_squared.sqrt(),
                "path prediction hit step cap"
            );
            return None;
        }

        let accel = match self.force.acceleration(self.idx, self.position, self.state) {
            Ok(accel) => accel,
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        };

        self.velocity += accel * self.dt;
        let start = self.position;
        self.position += self.velocity * self.dt;
        let segment = Segment {
            start,
            end: self.position,
        };

        self.travelled_squared += segment.length_squared();
        self.steps += 1;
        Some(Ok(segment))
    }
}

impl std::iter::FusedIterator for PredictedPath<'_> {}
