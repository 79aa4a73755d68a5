//! State Transition System
//!
//! Belief-state machine. Legal edges:
//!
//! ```text
//! SUSCEPTIBLE -> EXPOSED -> INFECTED -> RECOVERED
//!                  ^   \
//!                  |    -> DOUBTFUL
//!                  +-------/
//! ```
//!
//! RECOVERED is absorbing. [`next_state`] is a pure function of the current
//! state, the effective rates, and one uniform draw; [`Agent::step`] wires it
//! to the modifier model and the RNG.

use disinfo_types::State;
use rand::Rng;

use crate::components::Agent;

use super::modifiers::{BaseRates, ModifierModel, Rate};

/// Per-agent effective rates for one step.
///
/// Rates the current state does not consult are left at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectiveRates {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
    pub theta: f64,
}

impl EffectiveRates {
    fn set(&mut self, rate: Rate, value: f64) {
        match rate {
            Rate::Alpha => self.alpha = value,
            Rate::Beta => self.beta = value,
            Rate::Gamma => self.gamma = value,
            Rate::Delta => self.delta = value,
            Rate::Theta => self.theta = value,
        }
    }
}

/// Rates consulted from `state`, in evaluation order.
pub fn consulted_rates(state: State) -> &'static [Rate] {
    match state {
        State::Susceptible => &[Rate::Alpha],
        State::Exposed => &[Rate::Beta, Rate::Gamma],
        State::Infected => &[Rate::Delta],
        State::Doubtful => &[Rate::Theta],
        State::Recovered => &[],
    }
}

/// States reachable from `state` in one step, excluding staying put.
pub fn legal_successors(state: State) -> &'static [State] {
    match state {
        State::Susceptible => &[State::Exposed],
        State::Exposed => &[State::Infected, State::Doubtful],
        State::Infected => &[State::Recovered],
        State::Doubtful => &[State::Exposed],
        State::Recovered => &[],
    }
}

/// Applies one transition given a uniform draw in [0, 1).
///
/// From EXPOSED a single draw is split: below beta believes, then the next
/// gamma-wide band doubts, otherwise the agent stays EXPOSED.
pub fn next_state(state: State, rates: &EffectiveRates, draw: f64) -> State {
    match state {
        State::Susceptible if draw < rates.alpha => State::Exposed,
        State::Exposed if draw < rates.beta => State::Infected,
        State::Exposed if draw < rates.beta + rates.gamma => State::Doubtful,
        State::Infected if draw < rates.delta => State::Recovered,
        State::Doubtful if draw < rates.theta => State::Exposed,
        other => other,
    }
}

impl Agent {
    /// Advances this agent by one step and returns its new state.
    ///
    /// Only the rates the current state consults are computed. A RECOVERED
    /// agent consumes no randomness.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        modifiers: &ModifierModel,
        base_rates: &BaseRates,
        rng: &mut R,
    ) -> State {
        let consulted = consulted_rates(self.state);
        if consulted.is_empty() {
            return self.state;
        }

        let mut rates = EffectiveRates::default();
        for &rate in consulted {
            let value = modifiers.effective_rate(base_rates.get(rate), rate, self.demographics(), rng);
            rates.set(rate, value);
        }

        let draw: f64 = rng.gen();
        self.state = next_state(self.state, &rates, draw);
        self.state
    }
}
