//! Weighted Categorical Sampling
//!
//! Draws demographic attributes from per-platform distribution tables.
//!
//! Weight lookup is split from drawing: [`category_weights`] and
//! [`education_weights`] are pure, total functions that return the
//! distribution actually used (plus any degraded path taken), and the
//! `sample_*` functions draw from it.

use std::fmt;

use disinfo_types::{AgeGroup, EducationGroup, SocialPlatform};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::warn;

use crate::distributions::{Category, DistributionTable};

/// A handled fallback taken while sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DegradedPath {
    /// The platform had no row in the table; a uniform draw was used.
    MissingPlatform {
        dimension: &'static str,
        platform: SocialPlatform,
    },
    /// A young agent's permitted education levels had zero mass on the
    /// platform; the unconditioned distribution was used.
    ZeroMassConditional {
        platform: SocialPlatform,
        age_group: AgeGroup,
    },
}

impl fmt::Display for DegradedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradedPath::MissingPlatform { dimension, platform } => write!(
                f,
                "no {} distribution for {}, using uniform draw",
                dimension, platform
            ),
            DegradedPath::ZeroMassConditional { platform, age_group } => write!(
                f,
                "education for {} on {} has zero mass over permitted levels, using unconditioned distribution",
                age_group, platform
            ),
        }
    }
}

/// The distribution a draw will be made from.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights<C> {
    pub weights: Vec<(C, f64)>,
    pub degraded: Option<DegradedPath>,
}

impl<C> Weights<C> {
    pub fn total(&self) -> f64 {
        self.weights.iter().map(|(_, p)| p).sum()
    }
}

/// A sampled value and the fallback used to produce it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampled<C> {
    pub value: C,
    pub degraded: Option<DegradedPath>,
}

fn uniform<C: Copy>(categories: &[C]) -> Vec<(C, f64)> {
    let p = 1.0 / categories.len() as f64;
    categories.iter().map(|&c| (c, p)).collect()
}

/// The platform's row, or a uniform distribution if the platform is missing.
pub fn category_weights<C: Category>(
    table: &DistributionTable<C>,
    platform: SocialPlatform,
) -> Weights<C> {
    match table.weights(platform) {
        Some(weights) => Weights {
            weights,
            degraded: None,
        },
        None => Weights {
            weights: uniform(C::all()),
            degraded: Some(DegradedPath::MissingPlatform {
                dimension: C::DIMENSION,
                platform,
            }),
        },
    }
}

/// Education distribution conditioned on age.
///
/// Young agents are restricted to [`EducationGroup::YOUNG_ATTAINABLE`] and the
/// remaining mass is renormalized. If that mass is zero the unconditioned
/// row is returned instead. A missing platform yields a uniform draw over
/// the levels the agent's age permits.
pub fn education_weights(
    table: &DistributionTable<EducationGroup>,
    platform: SocialPlatform,
    age_group: AgeGroup,
) -> Weights<EducationGroup> {
    let permitted: &[EducationGroup] = if age_group.is_young() {
        &EducationGroup::YOUNG_ATTAINABLE
    } else {
        &EducationGroup::ALL
    };

    let Some(row) = table.weights(platform) else {
        return Weights {
            weights: uniform(permitted),
            degraded: Some(DegradedPath::MissingPlatform {
                dimension: EducationGroup::DIMENSION,
                platform,
            }),
        };
    };

    if !age_group.is_young() {
        return Weights {
            weights: row,
            degraded: None,
        };
    }

    let restricted: Vec<(EducationGroup, f64)> = row
        .iter()
        .copied()
        .filter(|(level, _)| permitted.contains(level))
        .collect();
    let mass: f64 = restricted.iter().map(|(_, p)| p).sum();

    if mass <= 0.0 {
        return Weights {
            weights: row,
            degraded: Some(DegradedPath::ZeroMassConditional {
                platform,
                age_group,
            }),
        };
    }

    Weights {
        weights: restricted.into_iter().map(|(level, p)| (level, p / mass)).collect(),
        degraded: None,
    }
}

/// Weighted random choice over `(category, weight)` pairs.
///
/// Zero-weight entries are never chosen. Returns `None` for an empty slice.
pub fn weighted_choice<C: Copy, R: Rng + ?Sized>(weights: &[(C, f64)], rng: &mut R) -> Option<C> {
    let mut chosen = weights.first()?.0;
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen::<f64>() * total;

    for &(category, weight) in weights {
        if weight > 0.0 {
            chosen = category;
            if roll < weight {
                return Some(category);
            }
        }
        roll -= weight;
    }

    // Floating-point residue lands on the last category with mass
    Some(chosen)
}

fn draw<C: Copy, R: Rng + ?Sized>(weights: Weights<C>, rng: &mut R) -> Option<Sampled<C>> {
    if let Some(path) = weights.degraded {
        warn!("degraded sampling path: {}", path);
    }
    Some(Sampled {
        value: weighted_choice(&weights.weights, rng)?,
        degraded: weights.degraded,
    })
}

/// Draws one category for `platform`.
pub fn sample_category<C: Category, R: Rng + ?Sized>(
    table: &DistributionTable<C>,
    platform: SocialPlatform,
    rng: &mut R,
) -> Option<Sampled<C>> {
    draw(category_weights(table, platform), rng)
}

/// Draws an education level for an agent of `age_group` on `platform`.
pub fn sample_education<R: Rng + ?Sized>(
    table: &DistributionTable<EducationGroup>,
    platform: SocialPlatform,
    age_group: AgeGroup,
    rng: &mut R,
) -> Option<Sampled<EducationGroup>> {
    draw(education_weights(table, platform, age_group), rng)
}

/// Uniform draw from the eligible platforms, `None` if there are none.
pub fn sample_platform<R: Rng + ?Sized>(eligible: &[SocialPlatform], rng: &mut R) -> Option<SocialPlatform> {
    eligible.choose(rng).copied()
}
