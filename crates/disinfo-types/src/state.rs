//! Compartment Types
//!
//! The five belief states and per-state tallies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Belief state of an agent. Exactly one per agent at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Susceptible,
    Exposed,
    /// Believes the disinformation.
    Infected,
    Doubtful,
    /// Terminal.
    Recovered,
}

impl State {
    pub const COUNT: usize = 5;

    pub const ALL: [State; State::COUNT] = [
        State::Susceptible,
        State::Exposed,
        State::Infected,
        State::Doubtful,
        State::Recovered,
    ];

    /// Stable upper-case name used as a column header.
    pub fn name(self) -> &'static str {
        match self {
            State::Susceptible => "SUSCEPTIBLE",
            State::Exposed => "EXPOSED",
            State::Infected => "INFECTED",
            State::Doubtful => "DOUBTFUL",
            State::Recovered => "RECOVERED",
        }
    }

    /// Position in [`State::ALL`].
    pub fn index(self) -> usize {
        match self {
            State::Susceptible => 0,
            State::Exposed => 1,
            State::Infected => 2,
            State::Doubtful => 3,
            State::Recovered => 4,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, State::Recovered)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of agents in each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub susceptible: usize,
    pub exposed: usize,
    pub infected: usize,
    pub doubtful: usize,
    pub recovered: usize,
}

impl StateCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies an iterator of states.
    pub fn from_states(states: impl IntoIterator<Item = State>) -> Self {
        let mut counts = Self::new();
        for state in states {
            counts[state] += 1;
        }
        counts
    }

    pub fn get(&self, state: State) -> usize {
        self[state]
    }

    pub fn total(&self) -> usize {
        self.susceptible + self.exposed + self.infected + self.doubtful + self.recovered
    }

    /// Iterates `(state, count)` pairs in [`State::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (State, usize)> + '_ {
        State::ALL.iter().map(move |&state| (state, self[state]))
    }
}

impl Index<State> for StateCounts {
    type Output = usize;

    fn index(&self, state: State) -> &usize {
        match state {
            State::Susceptible => &self.susceptible,
            State::Exposed => &self.exposed,
            State::Infected => &self.infected,
            State::Doubtful => &self.doubtful,
            State::Recovered => &self.recovered,
        }
    }
}

impl IndexMut<State> for StateCounts {
    fn index_mut(&mut self, state: State) -> &mut usize {
        match state {
            State::Susceptible => &mut self.susceptible,
            State::Exposed => &mut self.exposed,
            State::Infected => &mut self.infected,
            State::Doubtful => &mut self.doubtful,
            State::Recovered => &mut self.recovered,
        }
    }
}

impl fmt::Display for StateCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (state, count) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", state, count)?;
            first = false;
        }
        Ok(())
    }
}
