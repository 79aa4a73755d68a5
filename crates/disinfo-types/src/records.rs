//! Record Types
//!
//! Serialization structs for tabular export and run summaries.
//!
//! Column names and order are stable; downstream consumers depend on them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{AgeGroup, EducationGroup, SexGroup, SocialPlatform, State, StateCounts};

/// Header of the per-step table.
pub const STEP_COLUMNS: [&str; 6] = [
    "Step",
    "SUSCEPTIBLE",
    "EXPOSED",
    "INFECTED",
    "DOUBTFUL",
    "RECOVERED",
];

/// Header of the per-agent table.
pub const AGENT_COLUMNS: [&str; 6] = [
    "ID",
    "AgeGroup",
    "SexGroup",
    "EducationGroup",
    "SocialPlatform",
    "State",
];

/// One row of the per-step table. `step` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRow {
    pub step: usize,
    pub counts: StateCounts,
}

impl StepRow {
    pub fn fields(&self) -> [String; 6] {
        [
            self.step.to_string(),
            self.counts.susceptible.to_string(),
            self.counts.exposed.to_string(),
            self.counts.infected.to_string(),
            self.counts.doubtful.to_string(),
            self.counts.recovered.to_string(),
        ]
    }
}

/// One row of the per-agent table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRow {
    pub id: usize,
    pub age_group: AgeGroup,
    pub sex_group: SexGroup,
    pub education_group: EducationGroup,
    pub social_platform: SocialPlatform,
    pub state: State,
}

impl AgentRow {
    pub fn fields(&self) -> [String; 6] {
        [
            self.id.to_string(),
            self.age_group.to_string(),
            self.sex_group.to_string(),
            self.education_group.to_string(),
            self.social_platform.to_string(),
            self.state.to_string(),
        ]
    }
}

/// What happened while building a population.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationReport {
    pub agents: usize,
    /// Seed cohort size as configured.
    pub requested_seed: usize,
    /// Seed cohort size actually applied, `min(requested_seed, agents)`.
    pub seeded: usize,
    /// Platforms agents were drawn from.
    pub platforms: Vec<SocialPlatform>,
    /// True when no platforms were configured and every platform was used.
    pub all_platforms_substituted: bool,
    /// Uniform fallbacks caused by a platform missing from a distribution table.
    pub missing_platform_fallbacks: usize,
    /// Fallbacks to the unconditioned education distribution for young agents.
    pub zero_mass_fallbacks: usize,
}

impl PopulationReport {
    pub fn seed_was_clamped(&self) -> bool {
        self.seeded < self.requested_seed
    }

    pub fn degraded_draws(&self) -> usize {
        self.missing_platform_fallbacks + self.zero_mass_fallbacks
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The configured number of steps completed.
    StepLimit,
    /// Every agent reached RECOVERED.
    AllRecovered,
    /// Cancellation was observed between steps.
    Cancelled,
}

impl StopReason {
    pub fn name(self) -> &'static str {
        match self {
            StopReason::StepLimit => "step limit reached",
            StopReason::AllRecovered => "all agents recovered",
            StopReason::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Highest count reached by a state and the step it first occurred at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peak {
    pub step: usize,
    pub count: usize,
}

/// Summary written at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub seed: u64,
    pub steps: usize,
    pub stop_reason: StopReason,
    pub final_counts: StateCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_infected: Option<Peak>,
    pub population: PopulationReport,
}

/// Generates a fresh run identifier.
pub fn generate_run_id() -> Uuid {
    Uuid::new_v4()
}
