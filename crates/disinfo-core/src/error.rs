//! Error types
//!
//! Configuration and table errors are fatal and reported before any
//! simulation step runs. Degraded sampling paths are not errors; see
//! [`crate::systems::sampling::DegradedPath`].

use std::path::PathBuf;

use disinfo_types::SocialPlatform;
use thiserror::Error;

/// Tolerance for a per-platform distribution summing to one.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// A distribution table failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("{dimension} distribution for {platform} does not sum to 1.0 (sum={sum})")]
    BadSum {
        dimension: &'static str,
        platform: SocialPlatform,
        sum: f64,
    },
    #[error("{dimension} distribution for {platform} has invalid weight {weight} for {category}")]
    InvalidWeight {
        dimension: &'static str,
        platform: SocialPlatform,
        category: &'static str,
        weight: f64,
    },
}

/// A simulation configuration was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("population must contain at least one agent")]
    NoAgents,
    #[error("rate {name} = {value} is outside [0, 1]")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("noise standard deviation must be finite and non-negative, got {0}")]
    InvalidNoise(f64),
    #[error("modifier weight {name} for rate {rate} must be finite and non-negative, got {value}")]
    InvalidModifierWeight {
        rate: &'static str,
        name: &'static str,
        value: f64,
    },
    #[error("step limit must be positive")]
    NoSteps,
    #[error("a demographic draw had no categories to choose from")]
    EmptyDraw,
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Writing an export failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Write(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
