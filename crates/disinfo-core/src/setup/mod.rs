//! Population Setup
//!
//! Agent spawning and seed-cohort selection.

pub mod population;

pub use population::*;
