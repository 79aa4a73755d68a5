//! Shared data types for the disinformation spread simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine and any presentation layer both depend on it.

pub mod demographics;
pub mod records;
pub mod state;

pub use demographics::{AgeGroup, EducationGroup, ParseGroupError, SexGroup, SocialPlatform};

pub use records::{
    generate_run_id, AgentRow, Peak, PopulationReport, RunSummary, StepRow, StopReason,
    AGENT_COLUMNS, STEP_COLUMNS,
};

pub use state::{State, StateCounts};
