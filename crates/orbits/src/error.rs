//! Error types for the orbital simulation core

use thiserror::Error;

use crate::body::BodyId;

/// Errors raised while building or advancing a simulation
///
/// Configuration errors are reported before the registry is touched, so a
/// failed call never leaves a body half-created or half-linked.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrbitError {
    #[error("invalid {name}: {value} (must be positive and finite)")]
    InvalidBodyParameter { name: &'static str, value: f64 },

    #[error("invalid constant {name}: {value}")]
    InvalidConstant { name: &'static str, value: f64 },

    #[error("invalid eccentricity factor: {0}")]
    InvalidEccentricity(f64),

    #[error("body {0:?} is not registered")]
    UnknownBody(BodyId),

    #[error("no body at registry index {0}")]
    IndexOutOfRange(usize),

    #[error("body ids exhausted")]
    IdsExhausted,

    #[error("body {0:?} cannot orbit itself")]
    SelfParent(BodyId),

    #[error("assigning {parent:?} as parent of {child:?} would create a cycle")]
    ParentCycle { child: BodyId, parent: BodyId },

    #[error("anchor body {0:?} cannot be given an orbital parent")]
    AnchorCannotOrbit(BodyId),

    #[error("system already has an anchor body {0:?}")]
    DuplicateAnchor(BodyId),

    #[error("bodies {a:?} and {b:?} occupy the same point")]
    CoincidentBodies { a: BodyId, b: BodyId },

    #[error("degenerate orbit for {child:?} around {parent:?}: {reason}")]
    DegenerateOrbit {
        child: BodyId,
        parent: BodyId,
        reason: &'static str,
    },

    #[error("invalid speed multiplier: {0}")]
    InvalidSpeedMultiplier(f64),

    #[error("invalid path length budget: {0}")]
    InvalidLengthBudget(f64),

    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    #[error("config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for OrbitError {
    fn from(err: toml::de::Error) -> Self {
        OrbitError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OrbitError>;
