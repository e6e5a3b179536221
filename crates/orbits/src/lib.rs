//! Hierarchical orbital simulation core
//!
//! Bodies orbit a single designated parent instead of feeling the whole
//! system, which keeps generated planet/moon systems stable. Bodies without
//! a parent fall back to a direct sum over the registry.

pub mod body;
pub mod config;
pub mod derivation;
pub mod error;
pub mod forces;
pub mod initial_velocity;
pub mod integrator;
pub mod predictor;
pub mod simulation;
pub mod state;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod initial_velocity_test;
#[cfg(test)]
mod simulation_test;

pub use body::{Body, BodyId, OrbitalRole, ParentLink, Spin};
pub use config::SimulationConfig;
pub use error::OrbitError;
pub use predictor::{PredictedSegments, Segment};
pub use simulation::Simulation;
pub use state::{BodyParams, OrbitParams, Placement, SystemState};
