//! Seeded random system settings
//!
//! Every property is drawn uniformly from a configurable range. Planets and
//! moons are spaced outward: each one sits at the previous distance scaled by
//! `1 + multiplier`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::settings::{
    BodySettings, GenerationSettings, MoonSettings, OrbitSettings, PlanetSettings,
    SettingsIdAllocator, StarSettings,
};

/// Linear interpolation between `min` and `max`
pub fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + t * (max - min)
}

/// Inclusive range of a continuous property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut ChaChaRng) -> f64 {
        lerp(self.min, self.max, rng.random::<f64>())
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(GenerationError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Inclusive range of a body count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Both bounds are reachable
    pub fn sample(&self, rng: &mut ChaChaRng) -> u32 {
        let drawn = lerp(self.min as f64, self.max as f64 + 1.0, rng.random::<f64>());
        (drawn.floor() as u32).min(self.max)
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        if self.min > self.max {
            return Err(GenerationError::InvalidRange {
                name,
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        Ok(())
    }
}

/// Ranges for random system construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomGenerationSettings {
    pub orbit_eccentricity: ValueRange,
    /// Degrees per second, before the random direction is applied
    pub axial_spin: ValueRange,
    pub axial_tilt: ValueRange,

    pub star_surface_gravity: ValueRange,
    pub star_radius: ValueRange,
    pub star_temperature: ValueRange,

    pub planet_count: CountRange,
    pub planet_surface_gravity: ValueRange,
    pub planet_radius: ValueRange,
    pub planet_initial_distance: ValueRange,
    pub planet_distance_multiplier: ValueRange,

    pub moon_count: CountRange,
    pub moon_surface_gravity: ValueRange,
    pub moon_radius: ValueRange,
    pub moon_initial_distance: ValueRange,
    pub moon_distance_multiplier: ValueRange,

    pub trace_orbits: bool,
    pub tracing_length: f64,
}

impl Default for RandomGenerationSettings {
    fn default() -> Self {
        Self {
            orbit_eccentricity: ValueRange::new(0.3, 0.9),
            axial_spin: ValueRange::new(-4.0, 4.0),
            axial_tilt: ValueRange::new(-90.0, 90.0),

            star_surface_gravity: ValueRange::new(18.0, 25.0),
            star_radius: ValueRange::new(5.0, 15.0),
            star_temperature: ValueRange::new(0.0, 1.0),

            planet_count: CountRange::new(0, 10),
            planet_surface_gravity: ValueRange::new(0.1, 4.0),
            planet_radius: ValueRange::new(0.5, 3.0),
            planet_initial_distance: ValueRange::new(40.0, 60.0),
            planet_distance_multiplier: ValueRange::new(0.7, 2.0),

            moon_count: CountRange::new(0, 3),
            moon_surface_gravity: ValueRange::new(0.01, 0.2),
            moon_radius: ValueRange::new(0.5, 1.5),
            moon_initial_distance: ValueRange::new(8.0, 12.0),
            moon_distance_multiplier: ValueRange::new(0.7, 1.5),

            trace_orbits: false,
            tracing_length: 1.0,
        }
    }
}

impl RandomGenerationSettings {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let settings: Self = toml::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.orbit_eccentricity.validate("orbit_eccentricity")?;
        self.axial_spin.validate("axial_spin")?;
        self.axial_tilt.validate("axial_tilt")?;
        self.star_surface_gravity.validate("star_surface_gravity")?;
        self.star_radius.validate("star_radius")?;
        self.star_temperature.validate("star_temperature")?;
        self.planet_count.validate("planet_count")?;
        self.planet_surface_gravity.validate("planet_surface_gravity")?;
        self.planet_radius.validate("planet_radius")?;
        self.planet_initial_distance.validate("planet_initial_distance")?;
        self.planet_distance_multiplier.validate("planet_distance_multiplier")?;
        self.moon_count.validate("moon_count")?;
        self.moon_surface_gravity.validate("moon_surface_gravity")?;
        self.moon_radius.validate("moon_radius")?;
        self.moon_initial_distance.validate("moon_initial_distance")?;
        self.moon_distance_multiplier.validate("moon_distance_multiplier")?;

        // Spacing must never pull a body inward
        for (name, range) in [
            ("planet_distance_multiplier", self.planet_distance_multiplier),
            ("moon_distance_multiplier", self.moon_distance_multiplier),
        ] {
            if range.min < 0.0 {
                return Err(GenerationError::InvalidRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if !self.tracing_length.is_finite() || self.tracing_length < 0.0 {
            return Err(GenerationError::InvalidRange {
                name: "tracing_length",
                min: self.tracing_length,
                max: self.tracing_length,
            });
        }
        Ok(())
    }

    fn sample_spin(&self, rng: &mut ChaChaRng) -> f64 {
        let magnitude = self.axial_spin.sample(rng);
        let direction = if rng.random::<f64>() < 0.5 { -1.0 } else { 1.0 };
        magnitude * direction
    }

    fn sample_body(
        &self,
        rng: &mut ChaChaRng,
        ids: &mut SettingsIdAllocator,
        surface_gravity: &ValueRange,
        radius: &ValueRange,
    ) -> BodySettings {
        BodySettings {
            id: ids.allocate(),
            surface_gravity: surface_gravity.sample(rng),
            radius: radius.sample(rng),
            axial_spin: self.sample_spin(rng),
            axis_tilt: self.axial_tilt.sample(rng),
        }
    }

    fn sample_orbit(&self, rng: &mut ChaChaRng, distance: f64) -> OrbitSettings {
        OrbitSettings {
            distance,
            eccentricity: self.orbit_eccentricity.sample(rng),
            offset_angle: lerp(0.0, 360.0, rng.random::<f64>()),
            draw_path: self.trace_orbits,
            path_length: self.tracing_length,
        }
    }
}

/// Draw a complete system description from `random`
pub fn generate_settings(
    random: &RandomGenerationSettings,
    rng: &mut ChaChaRng,
    ids: &mut SettingsIdAllocator,
) -> Result<GenerationSettings> {
    random.validate()?;

    let star = StarSettings {
        body: random.sample_body(rng, ids, &random.star_surface_gravity, &random.star_radius),
        temperature: random.star_temperature.sample(rng),
    };

    let planet_count = random.planet_count.sample(rng);
    let mut distance_from_star = random.planet_initial_distance.sample(rng);
    let mut planets = Vec::with_capacity(planet_count as usize);

    for _ in 0..planet_count {
        let body = random.sample_body(
            rng,
            ids,
            &random.planet_surface_gravity,
            &random.planet_radius,
        );
        let orbit = random.sample_orbit(rng, distance_from_star);

        let moon_count = random.moon_count.sample(rng);
        let mut distance_from_planet = random.moon_initial_distance.sample(rng);
        let mut moons = Vec::with_capacity(moon_count as usize);
        for _ in 0..moon_count {
            moons.push(MoonSettings {
                body: random.sample_body(rng, ids, &random.moon_surface_gravity, &random.moon_radius),
                orbit: random.sample_orbit(rng, distance_from_planet),
            });
            distance_from_planet *= 1.0 + random.moon_distance_multiplier.sample(rng);
        }

        planets.push(PlanetSettings { body, orbit, moons });
        distance_from_star *= 1.0 + random.planet_distance_multiplier.sample(rng);
    }

    let settings = GenerationSettings {
        name: "New Settings".to_string(),
        star,
        planets,
    };
    debug!(
        planets = settings.planets.len(),
        moons = settings.moon_count(),
        "generated system settings"
    );
    Ok(settings)
}

/// [`generate_settings`] with a fresh ChaCha stream and id allocator
pub fn generate_settings_seeded(
    random: &RandomGenerationSettings,
    seed: u64,
) -> Result<GenerationSettings> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let mut ids = SettingsIdAllocator::new();
    let mut settings = generate_settings(random, &mut rng, &mut ids)?;
    settings.name = format!("System {seed}");
    Ok(settings)
}
