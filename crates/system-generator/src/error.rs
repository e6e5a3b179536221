use orbits::OrbitError;
use thiserror::Error;

use crate::settings::SettingsId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerationError {
    #[error(transparent)]
    Orbit(#[from] OrbitError),

    #[error("no body was built for parent settings {0:?}")]
    UnresolvedParent(SettingsId),

    #[error("settings id {0:?} is used more than once")]
    DuplicateSettingsId(SettingsId),

    #[error("invalid range {name}: [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("settings error: {0}")]
    Settings(String),
}

impl From<toml::de::Error> for GenerationError {
    fn from(err: toml::de::Error) -> Self {
        GenerationError::Settings(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
