//! Agent Components
//!
//! An agent's fixed demographic attributes and its mutable belief state.

use disinfo_types::{AgeGroup, AgentRow, EducationGroup, SexGroup, SocialPlatform, State};
use serde::Serialize;

/// Unique identifier for an agent, equal to its creation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AgentId(pub usize);

/// Demographic attributes - fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Demographics {
    pub age_group: AgeGroup,
    pub sex_group: SexGroup,
    pub education_group: EducationGroup,
    pub social_platform: SocialPlatform,
}

impl Demographics {
    pub fn new(
        age_group: AgeGroup,
        sex_group: SexGroup,
        education_group: EducationGroup,
        social_platform: SocialPlatform,
    ) -> Self {
        Self {
            age_group,
            sex_group,
            education_group,
            social_platform,
        }
    }
}

/// A single member of the simulated population.
///
/// Identity and demographics are private and only readable, so they cannot
/// change after construction. The state is only changed by the agent's own
/// [`Agent::step`](crate::systems::transition) or by seeding during
/// population construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    id: AgentId,
    demographics: Demographics,
    pub(crate) state: State,
}

impl Agent {
    /// Creates a SUSCEPTIBLE agent.
    pub fn new(id: usize, demographics: Demographics) -> Self {
        Self::with_state(id, demographics, State::Susceptible)
    }

    /// Creates an agent that starts in `state`.
    pub fn with_state(id: usize, demographics: Demographics, state: State) -> Self {
        Self {
            id: AgentId(id),
            demographics,
            state,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    pub fn age_group(&self) -> AgeGroup {
        self.demographics.age_group
    }

    pub fn sex_group(&self) -> SexGroup {
        self.demographics.sex_group
    }

    pub fn education_group(&self) -> EducationGroup {
        self.demographics.education_group
    }

    pub fn social_platform(&self) -> SocialPlatform {
        self.demographics.social_platform
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Forces the agent into the seed cohort.
    pub(crate) fn seed_exposed(&mut self) {
        self.state = State::Exposed;
    }

    /// Export row for this agent.
    pub fn to_row(&self) -> AgentRow {
        AgentRow {
            id: self.id.0,
            age_group: self.demographics.age_group,
            sex_group: self.demographics.sex_group,
            education_group: self.demographics.education_group,
            social_platform: self.demographics.social_platform,
            state: self.state,
        }
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UserAgent [ID: {}, Age Group: {}, Sex Group: {}, Education: {}, Platform: {}, State: {}]",
            self.id.0,
            self.demographics.age_group,
            self.demographics.sex_group,
            self.demographics.education_group,
            self.demographics.social_platform,
            self.state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demographics() -> Demographics {
        Demographics::new(
            AgeGroup::Age35To44,
            SexGroup::Male,
            EducationGroup::Vocational,
            SocialPlatform::Telegram,
        )
    }

    #[test]
    fn test_new_agent_is_susceptible() {
        let agent = Agent::new(3, demographics());
        assert_eq!(agent.id(), AgentId(3));
        assert_eq!(agent.state(), State::Susceptible);
        assert_eq!(agent.social_platform(), SocialPlatform::Telegram);
    }

    #[test]
    fn test_seed_exposed() {
        let mut agent = Agent::new(0, demographics());
        agent.seed_exposed();
        assert_eq!(agent.state(), State::Exposed);
    }

    #[test]
    fn test_to_row() {
        let agent = Agent::with_state(9, demographics(), State::Infected);
        let row = agent.to_row();
        assert_eq!(row.id, 9);
        assert_eq!(row.education_group, EducationGroup::Vocational);
        assert_eq!(row.state, State::Infected);
    }

    #[test]
    fn test_display() {
        let agent = Agent::new(1, demographics());
        assert_eq!(
            agent.to_string(),
            "UserAgent [ID: 1, Age Group: Age35To44, Sex Group: Male, Education: Vocational, Platform: Telegram, State: SUSCEPTIBLE]"
        );
    }
}
