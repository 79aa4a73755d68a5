//! Simulation runner: couples the engine, its history, and a seeded RNG.
//!
//! [`Simulation`] drives steps on the calling thread. [`BackgroundRun`]
//! moves a simulation onto its own thread and publishes each step's counts
//! over a channel, so a presentation layer only ever reads history that has
//! already been recorded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use disinfo_types::{generate_run_id, RunSummary, State, StateCounts, StopReason};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::distributions::DemographicTables;
use crate::engine::PopulationEngine;
use crate::error::ConfigError;
use crate::output::HistoryCollector;
use crate::setup::PopulationConfig;
use crate::systems::modifiers::{BaseRates, ModifierModel};

/// Cooperative cancellation flag, checked once per step before the step
/// starts.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything needed to (re)build a population.
#[derive(Debug, Clone)]
pub struct SimulationSetup {
    pub population: PopulationConfig,
    pub rates: BaseRates,
    pub tables: DemographicTables,
    pub modifiers: ModifierModel,
    /// End a run early once every agent is RECOVERED.
    pub stop_when_recovered: bool,
}

/// How a call to [`Simulation::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Total steps recorded so far.
    pub steps: usize,
    pub stop_reason: StopReason,
    pub final_counts: StateCounts,
}

pub struct Simulation {
    setup: SimulationSetup,
    seed: u64,
    rng: SmallRng,
    engine: PopulationEngine,
    history: HistoryCollector,
}

impl Simulation {
    pub fn new(setup: SimulationSetup, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let engine = PopulationEngine::new(
            &setup.population,
            setup.rates,
            &setup.tables,
            setup.modifiers.clone(),
            &mut rng,
        )?;
        Ok(Self {
            setup,
            seed,
            rng,
            engine,
            history: HistoryCollector::new(),
        })
    }

    /// Discards the current population and history and rebuilds from the
    /// same setup with `seed`.
    pub fn restart(&mut self, seed: u64) -> Result<(), ConfigError> {
        info!(seed, "Restarting simulation");
        *self = Self::new(self.setup.clone(), seed)?;
        Ok(())
    }

    /// Runs one step and records its counts.
    pub fn advance(&mut self) -> StateCounts {
        let counts = self.engine.step(&mut self.rng);
        self.history.record(&counts);
        counts
    }

    pub fn run(&mut self, max_steps: usize, cancel: &CancelToken) -> RunOutcome {
        self.run_with(max_steps, cancel, |_, _| {})
    }

    /// Runs up to `max_steps` further steps, calling `on_step` with the step
    /// number and counts after each one.
    pub fn run_with<F>(&mut self, max_steps: usize, cancel: &CancelToken, mut on_step: F) -> RunOutcome
    where
        F: FnMut(usize, &StateCounts),
    {
        let mut taken = 0;
        let stop_reason = loop {
            if self.setup.stop_when_recovered && self.engine.is_fully_recovered() {
                break StopReason::AllRecovered;
            }
            if taken >= max_steps {
                break StopReason::StepLimit;
            }
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            let counts = self.advance();
            taken += 1;
            on_step(self.history.len(), &counts);
        };

        let outcome = RunOutcome {
            steps: self.history.len(),
            stop_reason,
            final_counts: self.engine.counts(),
        };
        info!(
            steps = outcome.steps,
            reason = ?outcome.stop_reason,
            counts = %outcome.final_counts,
            "Run finished"
        );
        outcome
    }

    /// Summary of the run so far.
    pub fn summary(&self, stop_reason: StopReason) -> RunSummary {
        RunSummary {
            run_id: generate_run_id(),
            seed: self.seed,
            steps: self.history.len(),
            stop_reason,
            final_counts: self.engine.counts(),
            peak_infected: self.history.peak(State::Infected),
            population: self.engine.report().clone(),
        }
    }

    pub fn engine(&self) -> &PopulationEngine {
        &self.engine
    }

    pub fn history(&self) -> &HistoryCollector {
        &self.history
    }

    pub fn counts(&self) -> StateCounts {
        self.engine.counts()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn setup(&self) -> &SimulationSetup {
        &self.setup
    }
}

/// Published by a [`BackgroundRun`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Step { step: usize, counts: StateCounts },
    Finished(RunOutcome),
}

/// A simulation running on its own thread.
pub struct BackgroundRun {
    handle: Option<JoinHandle<Simulation>>,
    events: Receiver<RunEvent>,
    cancel: CancelToken,
    mirror: HistoryCollector,
    outcome: Option<RunOutcome>,
}

impl BackgroundRun {
    pub fn spawn(mut simulation: Simulation, max_steps: usize) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let mirror = simulation.history().clone();

        let handle = thread::spawn(move || {
            let outcome = simulation.run_with(max_steps, &token, |step, counts| {
                let _ = tx.send(RunEvent::Step {
                    step,
                    counts: *counts,
                });
            });
            let _ = tx.send(RunEvent::Finished(outcome));
            simulation
        });

        Self {
            handle: Some(handle),
            events: rx,
            cancel,
            mirror,
            outcome: None,
        }
    }

    /// Drains published events into the mirrored history and returns them.
    pub fn poll(&mut self) -> Vec<RunEvent> {
        let mut events = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    match &event {
                        RunEvent::Step { counts, .. } => self.mirror.record(counts),
                        RunEvent::Finished(outcome) => self.outcome = Some(*outcome),
                    }
                    events.push(event);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    /// Requests the run to stop before its next step.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// History published so far.
    pub fn history(&self) -> &HistoryCollector {
        &self.mirror
    }

    /// Set once the final event has been polled.
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Waits for the thread, drains remaining events, and returns the
    /// simulation.
    pub fn join(mut self) -> thread::Result<Simulation> {
        let result = match self.handle.take() {
            Some(handle) => handle.join(),
            None => Err(Box::new("background run already joined") as Box<dyn std::any::Any + Send>),
        };
        self.poll();
        result
    }
}

impl Drop for BackgroundRun {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel.cancel();
        }
    }
}
