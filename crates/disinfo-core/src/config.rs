//! Configuration loading for the simulator.
//!
//! All run settings can be loaded from a TOML file. Every section and field
//! is optional and falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::distributions::DemographicTables;
use crate::error::ConfigError;
use crate::runner::SimulationSetup;
use crate::setup::PopulationConfig;
use crate::systems::modifiers::{
    BaseRates, ModifierModel, ModifierTable, ProbabilityPolicy, RateProfiles,
    DEFAULT_NOISE_STD_DEV,
};

/// Complete simulator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed, step limit, and stop conditions
    #[serde(default)]
    pub simulation: RunConfig,
    /// Population size, seed cohort, and platforms
    #[serde(default)]
    pub population: PopulationConfig,
    /// Base transition rates
    #[serde(default)]
    pub rates: BaseRates,
    /// Demographic rate modifiers
    #[serde(default)]
    pub modifiers: ModifierConfig,
    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.steps == 0 {
            return Err(ConfigError::NoSteps);
        }
        self.population.validate()?;
        self.rates.validate()?;
        self.modifiers.profiles.validate()?;
        if !self.modifiers.noise_std_dev.is_finite() || self.modifiers.noise_std_dev < 0.0 {
            return Err(ConfigError::InvalidNoise(self.modifiers.noise_std_dev));
        }
        Ok(())
    }

    /// Validates and builds everything a [`crate::Simulation`] needs.
    pub fn to_setup(&self) -> Result<SimulationSetup, ConfigError> {
        self.validate()?;
        Ok(SimulationSetup {
            population: self.population.clone(),
            rates: self.rates,
            tables: DemographicTables::defaults()?,
            modifiers: self.modifiers.build()?,
            stop_when_recovered: self.simulation.stop_when_recovered,
        })
    }
}

/// Run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// RNG seed
    pub seed: u64,
    /// Maximum number of steps
    pub steps: usize,
    /// End early once every agent is RECOVERED
    pub stop_when_recovered: bool,
    /// Print progress every this many steps (0 disables)
    pub report_interval: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            steps: 100,
            stop_when_recovered: true,
            report_interval: 10,
        }
    }
}

/// Which coefficient table to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientSet {
    /// Built-in demographic coefficients.
    #[default]
    Default,
    /// Every coefficient 1.0.
    Neutral,
}

/// Modifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierConfig {
    pub coefficients: CoefficientSet,
    /// Standard deviation of the Gaussian noise added to each effective rate
    pub noise_std_dev: f64,
    pub policy: ProbabilityPolicy,
    /// Per-rate dimension weights and scale
    pub profiles: RateProfiles,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            coefficients: CoefficientSet::Default,
            noise_std_dev: DEFAULT_NOISE_STD_DEV,
            policy: ProbabilityPolicy::Clamp,
            profiles: RateProfiles::default(),
        }
    }
}

impl ModifierConfig {
    pub fn build(&self) -> Result<ModifierModel, ConfigError> {
        let table = match self.coefficients {
            CoefficientSet::Default => ModifierTable::defaults(),
            CoefficientSet::Neutral => ModifierTable::neutral(),
        };
        ModifierModel::new(table, self.profiles, self.noise_std_dev, self.policy)
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write CSV tables and the JSON summary at the end of a run
    pub export: bool,
    /// Directory for exported files
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export: true,
            dir: PathBuf::from("output"),
        }
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Disinformation Spread Simulator Configuration

[simulation]
seed = 42
steps = 100
stop_when_recovered = true
report_interval = 10

[population]
agents = 1000
initial_believing = 10
# Empty means every platform
platforms = []

[rates]
alpha = 0.05
beta = 0.1
gamma = 0.05
delta = 0.02
theta = 0.01

[modifiers]
coefficients = "default"
noise_std_dev = 0.001
policy = "clamp"

[modifiers.profiles.alpha]
age_weight = 0.3
sex_weight = 0.1
education_weight = 0.2
platform_weight = 0.4
scale = 1.0

[modifiers.profiles.beta]
age_weight = 0.4
sex_weight = 0.2
education_weight = 0.4
scale = 1.0

[modifiers.profiles.gamma]
age_weight = 0.3
sex_weight = 0.2
education_weight = 0.5
scale = 1.0

[modifiers.profiles.delta]
age_weight = 0.4
sex_weight = 0.2
education_weight = 0.4
scale = 1.0

[modifiers.profiles.theta]
age_weight = 0.4
sex_weight = 0.3
education_weight = 0.3
scale = 1.0

[output]
export = true
dir = "output"
"#
    .to_string()
}
