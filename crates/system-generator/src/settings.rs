//! Declarative system settings
//!
//! A system is one star plus an ordered list of planets, each carrying its own
//! moons. Every body settings block has a [`SettingsId`] so generated bodies
//! can be looked up again once the hierarchy is built.

use serde::{Deserialize, Serialize};

use orbits::BodyParams;

use crate::error::Result;

/// Default velocity scaling factor for a fresh orbit
pub const DEFAULT_ECCENTRICITY: f64 = 0.71;

/// Identifier of a body settings block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingsId(pub u32);

/// Hands out settings ids in creation order
#[derive(Debug, Clone, Default)]
pub struct SettingsIdAllocator {
    next: u32,
}

impl SettingsIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> SettingsId {
        let id = SettingsId(self.next);
        self.next += 1;
        id
    }
}

/// Physical properties shared by every kind of body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySettings {
    pub id: SettingsId,
    pub surface_gravity: f64,
    pub radius: f64,
    /// Degrees per second; the sign sets the spin direction
    #[serde(default)]
    pub axial_spin: f64,
    /// Degrees
    #[serde(default)]
    pub axis_tilt: f64,
}

impl BodySettings {
    /// Creation parameters for the simulation core
    pub fn params(&self, is_anchor: bool) -> BodyParams {
        BodyParams {
            radius: self.radius,
            surface_gravity: self.surface_gravity,
            axis_tilt: self.axis_tilt,
            axial_spin: self.axial_spin,
            is_anchor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarSettings {
    #[serde(flatten)]
    pub body: BodySettings,
    /// Normalised colour temperature in [0, 1]
    #[serde(default)]
    pub temperature: f64,
}

/// Where a body starts relative to its parent and how it is traced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitSettings {
    pub distance: f64,
    #[serde(default = "default_eccentricity")]
    pub eccentricity: f64,
    /// Degrees around the parent in the x/z plane
    #[serde(default)]
    pub offset_angle: f64,
    #[serde(default)]
    pub draw_path: bool,
    #[serde(default)]
    pub path_length: f64,
}

fn default_eccentricity() -> f64 {
    DEFAULT_ECCENTRICITY
}

impl OrbitSettings {
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            eccentricity: DEFAULT_ECCENTRICITY,
            offset_angle: 0.0,
            draw_path: false,
            path_length: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonSettings {
    #[serde(flatten)]
    pub body: BodySettings,
    pub orbit: OrbitSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSettings {
    #[serde(flatten)]
    pub body: BodySettings,
    pub orbit: OrbitSettings,
    #[serde(default)]
    pub moons: Vec<MoonSettings>,
}

/// A complete system description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default)]
    pub name: String,
    pub star: StarSettings,
    #[serde(default)]
    pub planets: Vec<PlanetSettings>,
}

impl GenerationSettings {
    /// Parse a hand-written system description
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Star, planets and moons together
    pub fn body_count(&self) -> usize {
        1 + self
            .planets
            .iter()
            .map(|planet| 1 + planet.moons.len())
            .sum::<usize>()
    }

    pub fn moon_count(&self) -> usize {
        self.planets.iter().map(|planet| planet.moons.len()).sum()
    }
}
