//! Components
//!
//! Per-agent data: identity, demographics, and belief state.

pub mod agent;

pub use agent::*;
