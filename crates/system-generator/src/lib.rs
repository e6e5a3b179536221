//! Planetary system generation
//!
//! Turns declarative star/planet/moon settings, either hand-written or drawn
//! from seeded random ranges, into a wired [`orbits::Simulation`].

pub mod error;
pub mod generation;
pub mod sampling;
pub mod settings;

pub use error::GenerationError;
pub use generation::{build_system, GeneratedSystem};
pub use sampling::{generate_settings, generate_settings_seeded, RandomGenerationSettings};
pub use settings::{
    BodySettings, GenerationSettings, MoonSettings, OrbitSettings, PlanetSettings, SettingsId,
    SettingsIdAllocator, StarSettings,
};
