//! Simulation-wide constants
//!
//! A [`SimulationConfig`] is supplied by whoever constructs a simulation run.
//! It can be built in code, taken from [`Default`], or loaded from TOML:
//!
//! ```toml
//! gravitational_constant = 0.1
//! physics_time_step = 0.01
//! tracer_time_step = 0.5
//! max_prediction_steps = 10000
//! ```
//!
//! Missing keys fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{OrbitError, Result};

/// Gravitational constant in simulation units
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 0.1;

/// Duration of one physics tick before the speed multiplier is applied
pub const DEFAULT_PHYSICS_TIME_STEP: f64 = 0.01;

/// Step used when previewing trajectories
pub const DEFAULT_TRACER_TIME_STEP: f64 = 0.5;

/// Hard cap on segments emitted by a single path prediction
pub const DEFAULT_MAX_PREDICTION_STEPS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravitational_constant: f64,
    pub physics_time_step: f64,
    pub tracer_time_step: f64,
    pub max_prediction_steps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            physics_time_step: DEFAULT_PHYSICS_TIME_STEP,
            tracer_time_step: DEFAULT_TRACER_TIME_STEP,
            max_prediction_steps: DEFAULT_MAX_PREDICTION_STEPS,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML document
    ///
    /// # Examples
    ///
    /// ```
    /// use orbits::config::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_toml_str("physics_time_step = 0.02").unwrap();
    /// assert_eq!(config.physics_time_step, 0.02);
    /// assert_eq!(config.gravitational_constant, 0.1);
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every constant is usable
    pub fn validate(&self) -> Result<()> {
        check_positive("gravitational_constant", self.gravitational_constant)?;
        check_positive("physics_time_step", self.physics_time_step)?;
        check_positive("tracer_time_step", self.tracer_time_step)?;
        if self.max_prediction_steps == 0 {
            return Err(OrbitError::InvalidConstant {
                name: "max_prediction_steps",
                value: 0.0,
            });
        }
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OrbitError::InvalidConstant { name, value })
    }
}
