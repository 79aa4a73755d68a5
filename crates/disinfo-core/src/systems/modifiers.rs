//! Rate Modifier System
//!
//! Turns a global base rate into a per-agent effective rate.
//!
//! For each rate a [`RateProfile`] fixes which demographic dimensions take
//! part and with what weight. The coefficients looked up for the agent's
//! attributes are combined linearly, scaled, multiplied into the base rate,
//! and perturbed with zero-mean Gaussian noise:
//!
//! ```text
//! effective = base * scale * (w_age*c_age + w_sex*c_sex + w_edu*c_edu + w_plat*c_plat) + N(0, sd)
//! ```

use std::collections::BTreeMap;

use disinfo_types::{AgeGroup, EducationGroup, SexGroup, SocialPlatform};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::components::Demographics;
use crate::error::ConfigError;

/// Default noise standard deviation.
pub const DEFAULT_NOISE_STD_DEV: f64 = 0.001;

/// One of the five transition rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rate {
    /// SUSCEPTIBLE -> EXPOSED
    Alpha,
    /// EXPOSED -> INFECTED
    Beta,
    /// EXPOSED -> DOUBTFUL
    Gamma,
    /// INFECTED -> RECOVERED
    Delta,
    /// DOUBTFUL -> EXPOSED
    Theta,
}

impl Rate {
    pub const ALL: [Rate; 5] = [Rate::Alpha, Rate::Beta, Rate::Gamma, Rate::Delta, Rate::Theta];

    pub fn name(self) -> &'static str {
        match self {
            Rate::Alpha => "alpha",
            Rate::Beta => "beta",
            Rate::Gamma => "gamma",
            Rate::Delta => "delta",
            Rate::Theta => "theta",
        }
    }
}

/// Global base rates, each a probability in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseRates {
    /// Exposure rate
    pub alpha: f64,
    /// Probability of believing the disinformation
    pub beta: f64,
    /// Skepticism rate
    pub gamma: f64,
    /// Probability of recovering immunity
    pub delta: f64,
    /// Probability of re-exposure
    pub theta: f64,
}

impl Default for BaseRates {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            beta: 0.1,
            gamma: 0.05,
            delta: 0.02,
            theta: 0.01,
        }
    }
}

impl BaseRates {
    pub fn new(alpha: f64, beta: f64, gamma: f64, delta: f64, theta: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            delta,
            theta,
        }
    }

    pub fn get(&self, rate: Rate) -> f64 {
        match rate {
            Rate::Alpha => self.alpha,
            Rate::Beta => self.beta,
            Rate::Gamma => self.gamma,
            Rate::Delta => self.delta,
            Rate::Theta => self.theta,
        }
    }

    /// Rejects any rate outside [0, 1]. Out-of-range rates are never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rate in Rate::ALL {
            let value = self.get(rate);
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange {
                    name: rate.name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// How an effective rate is turned into a Bernoulli parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityPolicy {
    /// Clamp into [0, 1].
    #[default]
    Clamp,
    /// Use the composed value as is. Values above 1 always fire and values
    /// below 0 never do, but the EXPOSED split sees the raw thresholds.
    Unclamped,
}

impl ProbabilityPolicy {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            ProbabilityPolicy::Clamp => value.clamp(0.0, 1.0),
            ProbabilityPolicy::Unclamped => value,
        }
    }
}

/// Dimension weights and scale for one rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateProfile {
    pub age_weight: f64,
    pub sex_weight: f64,
    pub education_weight: f64,
    /// Platform virality; only exposure uses it by default.
    pub platform_weight: f64,
    pub scale: f64,
}

impl RateProfile {
    pub fn default_for(rate: Rate) -> Self {
        let (age_weight, sex_weight, education_weight, platform_weight) = match rate {
            Rate::Alpha => (0.3, 0.1, 0.2, 0.4),
            Rate::Beta => (0.4, 0.2, 0.4, 0.0),
            Rate::Gamma => (0.3, 0.2, 0.5, 0.0),
            Rate::Delta => (0.4, 0.2, 0.4, 0.0),
            Rate::Theta => (0.4, 0.3, 0.3, 0.0),
        };
        Self {
            age_weight,
            sex_weight,
            education_weight,
            platform_weight,
            scale: 1.0,
        }
    }

    fn validate(&self, rate: Rate) -> Result<(), ConfigError> {
        let fields = [
            ("age_weight", self.age_weight),
            ("sex_weight", self.sex_weight),
            ("education_weight", self.education_weight),
            ("platform_weight", self.platform_weight),
            ("scale", self.scale),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidModifierWeight {
                    rate: rate.name(),
                    name,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Keys given for one rate in a config file; missing keys keep that rate's
/// built-in value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct ProfileOverrides {
    age_weight: Option<f64>,
    sex_weight: Option<f64>,
    education_weight: Option<f64>,
    platform_weight: Option<f64>,
    scale: Option<f64>,
}

impl ProfileOverrides {
    fn apply(self, rate: Rate) -> RateProfile {
        let base = RateProfile::default_for(rate);
        RateProfile {
            age_weight: self.age_weight.unwrap_or(base.age_weight),
            sex_weight: self.sex_weight.unwrap_or(base.sex_weight),
            education_weight: self.education_weight.unwrap_or(base.education_weight),
            platform_weight: self.platform_weight.unwrap_or(base.platform_weight),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfilesOverrides {
    alpha: ProfileOverrides,
    beta: ProfileOverrides,
    gamma: ProfileOverrides,
    delta: ProfileOverrides,
    theta: ProfileOverrides,
}

impl From<ProfilesOverrides> for RateProfiles {
    fn from(raw: ProfilesOverrides) -> Self {
        Self {
            alpha: raw.alpha.apply(Rate::Alpha),
            beta: raw.beta.apply(Rate::Beta),
            gamma: raw.gamma.apply(Rate::Gamma),
            delta: raw.delta.apply(Rate::Delta),
            theta: raw.theta.apply(Rate::Theta),
        }
    }
}

/// Rate profiles for all five rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProfilesOverrides")]
pub struct RateProfiles {
    pub alpha: RateProfile,
    pub beta: RateProfile,
    pub gamma: RateProfile,
    pub delta: RateProfile,
    pub theta: RateProfile,
}

impl Default for RateProfiles {
    fn default() -> Self {
        ProfilesOverrides::default().into()
    }
}

impl RateProfiles {
    pub fn get(&self, rate: Rate) -> &RateProfile {
        match rate {
            Rate::Alpha => &self.alpha,
            Rate::Beta => &self.beta,
            Rate::Gamma => &self.gamma,
            Rate::Delta => &self.delta,
            Rate::Theta => &self.theta,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for rate in Rate::ALL {
            self.get(rate).validate(rate)?;
        }
        Ok(())
    }
}

/// Coefficients for one rate. Attribute values without an entry are neutral.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coefficients {
    age: BTreeMap<AgeGroup, f64>,
    sex: BTreeMap<SexGroup, f64>,
    education: BTreeMap<EducationGroup, f64>,
    platform: BTreeMap<SocialPlatform, f64>,
}

impl Coefficients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age(mut self, entries: impl IntoIterator<Item = (AgeGroup, f64)>) -> Self {
        self.age.extend(entries);
        self
    }

    pub fn with_sex(mut self, entries: impl IntoIterator<Item = (SexGroup, f64)>) -> Self {
        self.sex.extend(entries);
        self
    }

    pub fn with_education(mut self, entries: impl IntoIterator<Item = (EducationGroup, f64)>) -> Self {
        self.education.extend(entries);
        self
    }

    pub fn with_platform(mut self, entries: impl IntoIterator<Item = (SocialPlatform, f64)>) -> Self {
        self.platform.extend(entries);
        self
    }

    pub fn age(&self, group: AgeGroup) -> f64 {
        self.age.get(&group).copied().unwrap_or(1.0)
    }

    pub fn sex(&self, group: SexGroup) -> f64 {
        self.sex.get(&group).copied().unwrap_or(1.0)
    }

    pub fn education(&self, group: EducationGroup) -> f64 {
        self.education.get(&group).copied().unwrap_or(1.0)
    }

    pub fn platform(&self, platform: SocialPlatform) -> f64 {
        self.platform.get(&platform).copied().unwrap_or(1.0)
    }
}

/// Rate → coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierTable {
    rates: BTreeMap<Rate, Coefficients>,
}

impl ModifierTable {
    /// A table where every coefficient is neutral.
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, rate: Rate, coefficients: Coefficients) -> Self {
        self.rates.insert(rate, coefficients);
        self
    }

    pub fn coefficients(&self, rate: Rate) -> Option<&Coefficients> {
        self.rates.get(&rate)
    }

    /// Built-in coefficients.
    pub fn defaults() -> Self {
        use AgeGroup::*;
        use EducationGroup::*;
        use SocialPlatform as P;

        let alpha = Coefficients::new()
            .with_age([
                (Under18, 1.15),
                (Age18To24, 1.2),
                (Age25To34, 1.1),
                (Age35To44, 1.0),
                (Age45To54, 0.95),
                (Age55To64, 0.9),
                (Age65Plus, 0.85),
            ])
            .with_education([(Primary, 1.05), (Higher, 0.95)])
            .with_platform([
                (P::LinkedIn, 0.7),
                (P::Facebook, 1.15),
                (P::Instagram, 1.1),
                (P::X, 1.25),
                (P::Telegram, 1.3),
                (P::Pinterest, 0.8),
                (P::Snapchat, 1.05),
                (P::TikTok, 1.3),
                (P::YouTube, 1.1),
                (P::WeChat, 1.1),
                (P::Weibo, 1.15),
            ]);

        let beta = Coefficients::new()
            .with_age([
                (Under18, 1.1),
                (Age25To34, 0.95),
                (Age35To44, 0.95),
                (Age55To64, 1.1),
                (Age65Plus, 1.25),
            ])
            .with_education([(Primary, 1.25), (Secondary, 1.1), (Higher, 0.8), (Vocational, 1.05)]);

        let gamma = Coefficients::new()
            .with_age([
                (Under18, 0.85),
                (Age25To34, 1.05),
                (Age35To44, 1.05),
                (Age55To64, 0.95),
                (Age65Plus, 0.85),
            ])
            .with_education([(Primary, 0.8), (Secondary, 0.95), (Higher, 1.3)]);

        let delta = Coefficients::new()
            .with_age([
                (Under18, 1.1),
                (Age18To24, 1.1),
                (Age55To64, 0.9),
                (Age65Plus, 0.85),
            ])
            .with_education([(Primary, 0.85), (Higher, 1.2)]);

        let theta = Coefficients::new()
            .with_age([(Under18, 1.1), (Age65Plus, 1.1)])
            .with_education([(Primary, 1.15), (Higher, 0.85)]);

        Self::neutral()
            .with_rate(Rate::Alpha, alpha)
            .with_rate(Rate::Beta, beta)
            .with_rate(Rate::Gamma, gamma)
            .with_rate(Rate::Delta, delta)
            .with_rate(Rate::Theta, theta)
    }
}

/// Coefficient table, profiles, noise and probability policy combined.
#[derive(Debug, Clone)]
pub struct ModifierModel {
    table: ModifierTable,
    profiles: RateProfiles,
    noise: Option<Normal<f64>>,
    noise_std_dev: f64,
    policy: ProbabilityPolicy,
}

impl ModifierModel {
    pub fn new(
        table: ModifierTable,
        profiles: RateProfiles,
        noise_std_dev: f64,
        policy: ProbabilityPolicy,
    ) -> Result<Self, ConfigError> {
        profiles.validate()?;
        if !noise_std_dev.is_finite() || noise_std_dev < 0.0 {
            return Err(ConfigError::InvalidNoise(noise_std_dev));
        }
        let noise = if noise_std_dev > 0.0 {
            Some(
                Normal::new(0.0, noise_std_dev)
                    .map_err(|_| ConfigError::InvalidNoise(noise_std_dev))?,
            )
        } else {
            None
        };
        Ok(Self {
            table,
            profiles,
            noise,
            noise_std_dev,
            policy,
        })
    }

    /// Built-in coefficients and profiles with the default noise.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::new(
            ModifierTable::defaults(),
            RateProfiles::default(),
            DEFAULT_NOISE_STD_DEV,
            ProbabilityPolicy::Clamp,
        )
    }

    /// Neutral coefficients, default profiles, no noise: effective rates equal
    /// base rates.
    pub fn neutral() -> Self {
        Self {
            table: ModifierTable::neutral(),
            profiles: RateProfiles::default(),
            noise: None,
            noise_std_dev: 0.0,
            policy: ProbabilityPolicy::Clamp,
        }
    }

    pub fn noise_std_dev(&self) -> f64 {
        self.noise_std_dev
    }

    pub fn policy(&self) -> ProbabilityPolicy {
        self.policy
    }

    pub fn profiles(&self) -> &RateProfiles {
        &self.profiles
    }

    /// Deterministic multiplier for `rate` given the agent's attributes.
    pub fn composite(&self, rate: Rate, demographics: &Demographics) -> f64 {
        let profile = self.profiles.get(rate);
        let combined = match self.table.coefficients(rate) {
            Some(c) => {
                profile.age_weight * c.age(demographics.age_group)
                    + profile.sex_weight * c.sex(demographics.sex_group)
                    + profile.education_weight * c.education(demographics.education_group)
                    + profile.platform_weight * c.platform(demographics.social_platform)
            }
            None => {
                profile.age_weight
                    + profile.sex_weight
                    + profile.education_weight
                    + profile.platform_weight
            }
        };
        profile.scale * combined
    }

    /// Effective Bernoulli parameter for `rate`.
    ///
    /// Base rates of exactly 0 or 1 are certain and pass through untouched;
    /// only interior rates are modulated and perturbed.
    pub fn effective_rate<R: Rng + ?Sized>(
        &self,
        base_rate: f64,
        rate: Rate,
        demographics: &Demographics,
        rng: &mut R,
    ) -> f64 {
        if base_rate <= 0.0 {
            return 0.0;
        }
        if base_rate >= 1.0 {
            return 1.0;
        }
        let noise = match &self.noise {
            Some(normal) => normal.sample(rng),
            None => 0.0,
        };
        self.policy
            .apply(base_rate * self.composite(rate, demographics) + noise)
    }
}
