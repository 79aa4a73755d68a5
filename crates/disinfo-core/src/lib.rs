//! Disinformation Spread Simulation Engine Library
//!
//! Agent-based compartmental model: each agent moves between SUSCEPTIBLE,
//! EXPOSED, INFECTED, DOUBTFUL and RECOVERED with probabilities derived from
//! global base rates and its own demographics.
//!
//! # Example
//!
//! ```
//! use disinfo_core::{CancelToken, Simulation, SimulationConfig};
//!
//! let mut config = SimulationConfig::default();
//! config.population.agents = 200;
//! let mut sim = Simulation::new(config.to_setup().unwrap(), 42).unwrap();
//! let outcome = sim.run(20, &CancelToken::new());
//! assert_eq!(outcome.final_counts.total(), 200);
//! ```

pub mod components;
pub mod config;
pub mod distributions;
pub mod engine;
pub mod error;
pub mod output;
pub mod runner;
pub mod setup;
pub mod systems;

pub use components::{Agent, AgentId, Demographics};
pub use config::{default_config_toml, SimulationConfig};
pub use distributions::{DemographicTables, DistributionTable};
pub use engine::PopulationEngine;
pub use error::{ConfigError, ExportError, TableError};
pub use output::HistoryCollector;
pub use runner::{BackgroundRun, CancelToken, RunEvent, RunOutcome, Simulation, SimulationSetup};
pub use setup::PopulationConfig;
pub use systems::{BaseRates, ModifierModel, ProbabilityPolicy, Rate};

pub use disinfo_types::{
    AgeGroup, EducationGroup, SexGroup, SocialPlatform, State, StateCounts, StopReason,
};
