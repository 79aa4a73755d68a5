//! Simulation Systems
//!
//! Demographic sampling, rate modifiers, and belief-state transitions.

pub mod modifiers;
pub mod sampling;
pub mod transition;

pub use modifiers::{
    BaseRates, Coefficients, ModifierModel, ModifierTable, ProbabilityPolicy, Rate, RateProfile,
    RateProfiles, DEFAULT_NOISE_STD_DEV,
};
pub use sampling::{
    category_weights, education_weights, sample_category, sample_education, sample_platform,
    weighted_choice, DegradedPath, Sampled, Weights,
};
pub use transition::{consulted_rates, legal_successors, next_state, EffectiveRates};
