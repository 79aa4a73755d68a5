//! Population Engine
//!
//! Owns the agents, the base rates, and the modifier model. Each step visits
//! every agent exactly once in a freshly shuffled order.

use disinfo_types::{PopulationReport, SocialPlatform, State, StateCounts};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::components::{Agent, AgentId};
use crate::distributions::DemographicTables;
use crate::error::ConfigError;
use crate::setup::{spawn_population, PopulationConfig, SpawnedPopulation};
use crate::systems::modifiers::{BaseRates, ModifierModel};

pub struct PopulationEngine {
    agents: Vec<Agent>,
    rates: BaseRates,
    modifiers: ModifierModel,
    report: PopulationReport,
    steps: usize,
}

impl PopulationEngine {
    /// Validates the configuration and builds the population.
    pub fn new<R: Rng + ?Sized>(
        config: &PopulationConfig,
        rates: BaseRates,
        tables: &DemographicTables,
        modifiers: ModifierModel,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        rates.validate()?;
        let SpawnedPopulation { agents, report } = spawn_population(config, tables, rng)?;

        info!(
            agents = report.agents,
            seeded = report.seeded,
            platforms = report.platforms.len(),
            alpha = rates.alpha,
            beta = rates.beta,
            gamma = rates.gamma,
            delta = rates.delta,
            theta = rates.theta,
            noise_std_dev = modifiers.noise_std_dev(),
            "Population initialized"
        );
        if report.degraded_draws() > 0 {
            info!(
                missing_platform = report.missing_platform_fallbacks,
                zero_mass = report.zero_mass_fallbacks,
                "Population built with fallback draws"
            );
        }

        Ok(Self {
            agents,
            rates,
            modifiers,
            report,
            steps: 0,
        })
    }

    /// Wraps agents built elsewhere, keeping their states as given.
    pub fn from_agents(
        agents: Vec<Agent>,
        rates: BaseRates,
        modifiers: ModifierModel,
    ) -> Result<Self, ConfigError> {
        if agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }
        rates.validate()?;

        let platforms = SocialPlatform::ALL
            .into_iter()
            .filter(|p| agents.iter().any(|a| a.social_platform() == *p))
            .collect();
        let report = PopulationReport {
            agents: agents.len(),
            platforms,
            ..PopulationReport::default()
        };

        Ok(Self {
            agents,
            rates,
            modifiers,
            report,
            steps: 0,
        })
    }

    /// Advances every agent by one step and returns the new counts.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StateCounts {
        self.agents.shuffle(rng);
        for agent in self.agents.iter_mut() {
            agent.step(&self.modifiers, &self.rates, rng);
        }
        self.steps += 1;

        let counts = self.counts();
        debug!(step = self.steps, %counts, "Step complete");
        counts
    }

    pub fn counts(&self) -> StateCounts {
        StateCounts::from_states(self.agents.iter().map(Agent::state))
    }

    /// Agents in their current (last shuffled) order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Agents sorted by id.
    pub fn agents_by_id(&self) -> Vec<&Agent> {
        let mut sorted: Vec<&Agent> = self.agents.iter().collect();
        sorted.sort_by_key(|a| a.id());
        sorted
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn rates(&self) -> &BaseRates {
        &self.rates
    }

    pub fn modifiers(&self) -> &ModifierModel {
        &self.modifiers
    }

    pub fn report(&self) -> &PopulationReport {
        &self.report
    }

    /// Steps taken since construction.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn is_fully_recovered(&self) -> bool {
        self.agents.iter().all(|a| a.state() == State::Recovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Demographics;
    use disinfo_types::{AgeGroup, EducationGroup, SexGroup};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn engine(agents: usize, seed_cohort: usize, rates: BaseRates, seed: u64) -> PopulationEngine {
        let mut rng = SmallRng::seed_from_u64(seed);
        PopulationEngine::new(
            &PopulationConfig::new(agents, seed_cohort, vec![]),
            rates,
            &DemographicTables::defaults().unwrap(),
            ModifierModel::defaults().unwrap(),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        let mut rng = SmallRng::seed_from_u64(0);
        let result = PopulationEngine::new(
            &PopulationConfig::default(),
            BaseRates::new(0.1, 0.1, 1.01, 0.1, 0.1),
            &DemographicTables::defaults().unwrap(),
            ModifierModel::neutral(),
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(ConfigError::RateOutOfRange { name: "gamma", .. })
        ));
    }

    #[test]
    fn test_counts_total_stays_n() {
        let mut e = engine(300, 30, BaseRates::new(0.3, 0.3, 0.2, 0.1, 0.2), 8);
        let mut rng = SmallRng::seed_from_u64(8);
        assert_eq!(e.counts().exposed, 30);
        for _ in 0..25 {
            assert_eq!(e.step(&mut rng).total(), 300);
        }
        assert_eq!(e.steps_taken(), 25);
    }

    #[test]
    fn test_agents_by_id_is_sorted_after_shuffle() {
        let mut e = engine(40, 0, BaseRates::default(), 2);
        let mut rng = SmallRng::seed_from_u64(2);
        e.step(&mut rng);
        let ids: Vec<usize> = e.agents_by_id().iter().map(|a| a.id().0).collect();
        assert_eq!(ids, (0..40).collect::<Vec<_>>());
        assert!(e.agent(AgentId(17)).is_some());
        assert!(e.agent(AgentId(40)).is_none());
    }

    #[test]
    fn test_from_agents_and_full_recovery() {
        let d = Demographics::new(
            AgeGroup::Age25To34,
            SexGroup::Male,
            EducationGroup::Higher,
            SocialPlatform::Reddit,
        );
        let agents = (0..5).map(|i| Agent::with_state(i, d, State::Infected)).collect();
        let mut e = PopulationEngine::from_agents(
            agents,
            BaseRates::new(0.0, 0.0, 0.0, 1.0, 0.0),
            ModifierModel::defaults().unwrap(),
        )
        .unwrap();
        assert_eq!(e.report().platforms, vec![SocialPlatform::Reddit]);
        assert!(!e.is_fully_recovered());

        let mut rng = SmallRng::seed_from_u64(0);
        e.step(&mut rng);
        assert!(e.is_fully_recovered());
        assert_eq!(e.counts().recovered, 5);
    }

    #[test]
    fn test_from_agents_rejects_empty() {
        let result =
            PopulationEngine::from_agents(Vec::new(), BaseRates::default(), ModifierModel::neutral());
        assert!(matches!(result, Err(ConfigError::NoAgents)));
    }
}
