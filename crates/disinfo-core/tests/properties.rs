//! Seed-quantified invariants of the engine and history.

use disinfo_core::{
    AgentId, BaseRates, CancelToken, DemographicTables, PopulationConfig,
    Simulation, SimulationSetup, State,
};
use disinfo_core::systems::{legal_successors, ProbabilityPolicy};
use proptest::prelude::*;

fn setup(agents: usize, seeded: usize, rates: BaseRates, policy: ProbabilityPolicy) -> SimulationSetup {
    let modifiers = disinfo_core::config::ModifierConfig {
        policy,
        ..Default::default()
    }
    .build()
    .unwrap();
    SimulationSetup {
        population: PopulationConfig::new(agents, seeded, vec![]),
        rates,
        tables: DemographicTables::defaults().unwrap(),
        modifiers,
        stop_when_recovered: false,
    }
}

fn any_rate() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.0..=1.0f64]
}

fn any_rates() -> impl Strategy<Value = BaseRates> {
    (any_rate(), any_rate(), any_rate(), any_rate(), any_rate())
        .prop_map(|(alpha, beta, gamma, delta, theta)| BaseRates::new(alpha, beta, gamma, delta, theta))
}

fn any_policy() -> impl Strategy<Value = ProbabilityPolicy> {
    prop_oneof![Just(ProbabilityPolicy::Clamp), Just(ProbabilityPolicy::Unclamped)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_every_step_conserves_population(
        seed in any::<u64>(),
        agents in 1usize..120,
        seeded in 0usize..150,
        rates in any_rates(),
        policy in any_policy(),
    ) {
        let mut sim = Simulation::new(setup(agents, seeded, rates, policy), seed).unwrap();
        prop_assert_eq!(sim.counts().exposed, seeded.min(agents));
        sim.run(15, &CancelToken::new());

        let history = sim.history();
        prop_assert_eq!(history.len(), 15);
        for state in State::ALL {
            prop_assert_eq!(history.series(state).len(), history.len());
        }
        for step in 1..=history.len() {
            prop_assert_eq!(history.total_at_step(step), agents);
        }
    }

    #[test]
    fn test_agents_only_follow_legal_edges_and_keep_demographics(
        seed in any::<u64>(),
        agents in 1usize..80,
        rates in any_rates(),
        policy in any_policy(),
    ) {
        let mut sim = Simulation::new(setup(agents, agents / 4, rates, policy), seed).unwrap();
        let initial: Vec<_> = sim
            .engine()
            .agents_by_id()
            .iter()
            .map(|a| (*a.demographics(), a.state()))
            .collect();

        let mut previous: Vec<State> = initial.iter().map(|(_, s)| *s).collect();
        for _ in 0..12 {
            sim.advance();
            for (i, agent) in sim.engine().agents_by_id().iter().enumerate() {
                prop_assert_eq!(agent.id(), AgentId(i));
                prop_assert_eq!(*agent.demographics(), initial[i].0);

                let before = previous[i];
                let after = agent.state();
                prop_assert!(
                    after == before || legal_successors(before).contains(&after),
                    "{} -> {} is not a legal edge", before, after
                );
                if before == State::Recovered {
                    prop_assert_eq!(after, State::Recovered);
                }
                previous[i] = after;
            }
        }
    }

    #[test]
    fn test_recovered_count_never_decreases(seed in any::<u64>(), rates in any_rates()) {
        let mut sim = Simulation::new(setup(60, 10, rates, ProbabilityPolicy::Clamp), seed).unwrap();
        sim.run(20, &CancelToken::new());
        let recovered = sim.history().series(State::Recovered);
        prop_assert!(recovered.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_history_lookups_clamp(seed in any::<u64>(), steps in 1usize..20, lookup in 0usize..60) {
        let mut sim = Simulation::new(
            setup(40, 4, BaseRates::default(), ProbabilityPolicy::Clamp),
            seed,
        ).unwrap();
        sim.run(steps, &CancelToken::new());
        let history = sim.history();

        let counts = history.counts_for_step(lookup);
        if lookup == 0 {
            prop_assert_eq!(counts.total(), 0);
        } else {
            prop_assert_eq!(counts, history.counts_for_step(lookup.min(steps)));
            prop_assert_eq!(counts.total(), 40);
        }
    }
}
