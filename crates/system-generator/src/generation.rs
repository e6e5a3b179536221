//! Hierarchy construction
//!
//! Builds the star first, then each planet around the star, then that
//! planet's moons around it. Moons find their planet through the settings id
//! recorded when the planet was built.

use std::collections::HashMap;

use orbits::{BodyId, OrbitParams, Placement, Simulation, SimulationConfig};
use tracing::{debug, info};

use crate::error::{GenerationError, Result};
use crate::settings::{BodySettings, GenerationSettings, OrbitSettings, SettingsId};

/// A wired simulation plus the settings-to-body lookup
#[derive(Debug, Clone)]
pub struct GeneratedSystem {
    pub simulation: Simulation,
    ids: HashMap<SettingsId, BodyId>,
}

impl GeneratedSystem {
    /// Body built from the settings block `id`, if it is still registered
    pub fn body_for(&self, id: SettingsId) -> Option<BodyId> {
        self.ids
            .get(&id)
            .and_then(|body| self.simulation.find_by_id(*body))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

pub(crate) struct Builder {
    simulation: Simulation,
    ids: HashMap<SettingsId, BodyId>,
}

impl Builder {
    pub(crate) fn new(config: SimulationConfig, capacity: usize) -> Result<Self> {
        Ok(Self {
            simulation: Simulation::new(config)?,
            ids: HashMap::with_capacity(capacity),
        })
    }

    fn create(&mut self, body: &BodySettings, is_anchor: bool) -> Result<BodyId> {
        if self.ids.contains_key(&body.id) {
            return Err(GenerationError::DuplicateSettingsId(body.id));
        }
        let id = self.simulation.create_body(body.params(is_anchor))?;
        self.ids.insert(body.id, id);
        Ok(id)
    }

    pub(crate) fn resolve(&self, id: SettingsId) -> Result<BodyId> {
        self.ids
            .get(&id)
            .and_then(|body| self.simulation.find_by_id(*body))
            .ok_or(GenerationError::UnresolvedParent(id))
    }

    fn wire(&mut self, child: BodyId, parent: BodyId, orbit: &OrbitSettings) -> Result<()> {
        self.simulation.assign_parent(
            child,
            parent,
            OrbitParams {
                eccentricity: orbit.eccentricity,
                placement: Placement::Offset {
                    angle_deg: orbit.offset_angle,
                    distance: orbit.distance,
                },
            },
        )?;
        if orbit.draw_path {
            self.simulation
                .set_trace_length(child, Some(orbit.path_length))?;
        }
        Ok(())
    }

    fn orbiting(
        &mut self,
        body: &BodySettings,
        orbit: &OrbitSettings,
        parent: SettingsId,
    ) -> Result<BodyId> {
        let parent = self.resolve(parent)?;
        let id = self.create(body, false)?;
        self.wire(id, parent, orbit)?;
        debug!(settings = body.id.0, body = id.0, parent = parent.0, "wired body");
        Ok(id)
    }
}

/// Create and wire every body described by `settings`
pub fn build_system(settings: &GenerationSettings, config: SimulationConfig) -> Result<GeneratedSystem> {
    let mut builder = Builder::new(config, settings.body_count())?;

    builder.create(&settings.star.body, true)?;
    let star = settings.star.body.id;

    for planet in &settings.planets {
        builder.orbiting(&planet.body, &planet.orbit, star)?;
        for moon in &planet.moons {
            builder.orbiting(&moon.body, &moon.orbit, planet.body.id)?;
        }
    }

    info!(
        name = %settings.name,
        bodies = builder.ids.len(),
        "built system"
    );
    Ok(GeneratedSystem {
        simulation: builder.simulation,
        ids: builder.ids,
    })
}
