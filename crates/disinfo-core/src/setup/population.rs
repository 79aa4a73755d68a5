//! Population Spawning
//!
//! Draws each agent's platform and demographics, then forces a random seed
//! cohort into EXPOSED.

use disinfo_types::{PopulationReport, SocialPlatform};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::{Agent, Demographics};
use crate::distributions::DemographicTables;
use crate::error::ConfigError;
use crate::systems::sampling::{
    sample_category, sample_education, sample_platform, DegradedPath, Sampled,
};

/// Population size, seed cohort, and eligible platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of agents, N.
    pub agents: usize,
    /// Agents forced into EXPOSED at construction.
    pub initial_believing: usize,
    /// Platforms agents are drawn from; empty means all of them.
    pub platforms: Vec<SocialPlatform>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            agents: 1000,
            initial_believing: 10,
            platforms: Vec::new(),
        }
    }
}

impl PopulationConfig {
    pub fn new(agents: usize, initial_believing: usize, platforms: Vec<SocialPlatform>) -> Self {
        Self {
            agents,
            initial_believing,
            platforms,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents == 0 {
            return Err(ConfigError::NoAgents);
        }
        Ok(())
    }
}

/// Deduplicated eligible platforms, and whether all platforms were
/// substituted for an empty request.
pub fn resolve_platforms(requested: &[SocialPlatform]) -> (Vec<SocialPlatform>, bool) {
    if requested.is_empty() {
        return (SocialPlatform::ALL.to_vec(), true);
    }
    let mut platforms = Vec::with_capacity(requested.len());
    for &platform in requested {
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }
    (platforms, false)
}

/// Fallback tallies gathered while drawing demographics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DegradedTally {
    pub missing_platform: usize,
    pub zero_mass: usize,
}

impl DegradedTally {
    fn note<C>(&mut self, sampled: &Sampled<C>) {
        match sampled.degraded {
            Some(DegradedPath::MissingPlatform { .. }) => self.missing_platform += 1,
            Some(DegradedPath::ZeroMassConditional { .. }) => self.zero_mass += 1,
            None => {}
        }
    }
}

/// Draws one agent's demographics. Education is drawn after age because it
/// is conditioned on it. `None` if there is nothing to draw from.
pub fn draw_demographics<R: Rng + ?Sized>(
    platforms: &[SocialPlatform],
    tables: &DemographicTables,
    tally: &mut DegradedTally,
    rng: &mut R,
) -> Option<Demographics> {
    let platform = sample_platform(platforms, rng)?;

    let age = sample_category(&tables.age, platform, rng)?;
    tally.note(&age);
    let sex = sample_category(&tables.sex, platform, rng)?;
    tally.note(&sex);
    let education = sample_education(&tables.education, platform, age.value, rng)?;
    tally.note(&education);

    Some(Demographics::new(age.value, sex.value, education.value, platform))
}

/// Forces `min(requested, agents.len())` distinct agents into EXPOSED.
/// Returns how many were seeded.
pub fn seed_cohort<R: Rng + ?Sized>(agents: &mut [Agent], requested: usize, rng: &mut R) -> usize {
    let seeded = requested.min(agents.len());
    if seeded < requested {
        info!(
            requested,
            population = agents.len(),
            "Seed cohort larger than population, seeding every agent"
        );
    }
    for i in index::sample(rng, agents.len(), seeded) {
        agents[i].seed_exposed();
    }
    seeded
}

/// A freshly built population and what happened while building it.
#[derive(Debug, Clone)]
pub struct SpawnedPopulation {
    pub agents: Vec<Agent>,
    pub report: PopulationReport,
}

/// Builds the full population: N agents with ids 0..N, all SUSCEPTIBLE
/// except the seed cohort.
pub fn spawn_population<R: Rng + ?Sized>(
    config: &PopulationConfig,
    tables: &DemographicTables,
    rng: &mut R,
) -> Result<SpawnedPopulation, ConfigError> {
    config.validate()?;

    let (platforms, all_platforms_substituted) = resolve_platforms(&config.platforms);
    if all_platforms_substituted {
        info!("No platforms configured, drawing from all {}", platforms.len());
    }

    let mut tally = DegradedTally::default();
    let mut agents: Vec<Agent> = (0..config.agents)
        .map(|id| draw_demographics(&platforms, tables, &mut tally, rng).map(|d| Agent::new(id, d)))
        .collect::<Option<_>>()
        .ok_or(ConfigError::EmptyDraw)?;

    let seeded = seed_cohort(&mut agents, config.initial_believing, rng);

    let report = PopulationReport {
        agents: agents.len(),
        requested_seed: config.initial_believing,
        seeded,
        platforms,
        all_platforms_substituted,
        missing_platform_fallbacks: tally.missing_platform,
        zero_mass_fallbacks: tally.zero_mass,
    };

    Ok(SpawnedPopulation { agents, report })
}
