//! Distribution Tables
//!
//! Per-platform categorical distributions for each demographic dimension.
//! Every table is validated when it is built: each platform's probabilities
//! must be finite, non-negative, and sum to 1.0 within [`SUM_TOLERANCE`].

mod defaults;

use std::collections::BTreeMap;
use std::fmt::Debug;

use disinfo_types::{AgeGroup, EducationGroup, SexGroup, SocialPlatform};

use crate::error::{TableError, SUM_TOLERANCE};

pub use defaults::{default_age_table, default_education_table, default_sex_table};

/// A closed demographic dimension that can be sampled.
pub trait Category: Copy + Ord + Debug + 'static {
    /// Dimension name used in diagnostics.
    const DIMENSION: &'static str;

    /// Every value, in declaration order.
    fn all() -> &'static [Self];

    fn label(self) -> &'static str;
}

impl Category for AgeGroup {
    const DIMENSION: &'static str = "Age";

    fn all() -> &'static [Self] {
        &AgeGroup::ALL
    }

    fn label(self) -> &'static str {
        self.name()
    }
}

impl Category for SexGroup {
    const DIMENSION: &'static str = "Sex";

    fn all() -> &'static [Self] {
        &SexGroup::ALL
    }

    fn label(self) -> &'static str {
        self.name()
    }
}

impl Category for EducationGroup {
    const DIMENSION: &'static str = "Education";

    fn all() -> &'static [Self] {
        &EducationGroup::ALL
    }

    fn label(self) -> &'static str {
        self.name()
    }
}

/// Platform → (category → probability).
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionTable<C: Category> {
    rows: BTreeMap<SocialPlatform, BTreeMap<C, f64>>,
}

impl<C: Category> DistributionTable<C> {
    /// Builds a table, rejecting any platform row that fails validation.
    pub fn new<I, R>(rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (SocialPlatform, R)>,
        R: IntoIterator<Item = (C, f64)>,
    {
        let mut table = BTreeMap::new();
        for (platform, row) in rows {
            let row: BTreeMap<C, f64> = row.into_iter().collect();
            validate_row(platform, &row)?;
            table.insert(platform, row);
        }
        Ok(Self { rows: table })
    }

    /// The platform's `(category, probability)` pairs in category order,
    /// or `None` if the platform has no entry.
    pub fn weights(&self, platform: SocialPlatform) -> Option<Vec<(C, f64)>> {
        self.rows
            .get(&platform)
            .map(|row| row.iter().map(|(&c, &p)| (c, p)).collect())
    }

    /// Probability of `category` on `platform`; categories absent from a
    /// present row have probability zero.
    pub fn probability(&self, platform: SocialPlatform, category: C) -> Option<f64> {
        self.rows
            .get(&platform)
            .map(|row| row.get(&category).copied().unwrap_or(0.0))
    }

    pub fn contains(&self, platform: SocialPlatform) -> bool {
        self.rows.contains_key(&platform)
    }

    pub fn platforms(&self) -> impl Iterator<Item = SocialPlatform> + '_ {
        self.rows.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn validate_row<C: Category>(
    platform: SocialPlatform,
    row: &BTreeMap<C, f64>,
) -> Result<(), TableError> {
    for (&category, &weight) in row {
        if !weight.is_finite() || weight < 0.0 {
            return Err(TableError::InvalidWeight {
                dimension: C::DIMENSION,
                platform,
                category: category.label(),
                weight,
            });
        }
    }
    let sum: f64 = row.values().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(TableError::BadSum {
            dimension: C::DIMENSION,
            platform,
            sum,
        });
    }
    Ok(())
}

/// The three tables used to build a population.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicTables {
    pub age: DistributionTable<AgeGroup>,
    pub sex: DistributionTable<SexGroup>,
    pub education: DistributionTable<EducationGroup>,
}

impl DemographicTables {
    pub fn new(
        age: DistributionTable<AgeGroup>,
        sex: DistributionTable<SexGroup>,
        education: DistributionTable<EducationGroup>,
    ) -> Self {
        Self { age, sex, education }
    }

    /// The built-in tables covering every platform.
    pub fn defaults() -> Result<Self, TableError> {
        Ok(Self {
            age: default_age_table()?,
            sex: default_sex_table()?,
            education: default_education_table()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_sum<C: Category>(table: &DistributionTable<C>, platform: SocialPlatform) -> f64 {
        table.weights(platform).unwrap().iter().map(|(_, p)| p).sum()
    }

    #[test]
    fn test_default_tables_cover_every_platform() {
        let tables = DemographicTables::defaults().unwrap();
        for platform in SocialPlatform::ALL {
            assert!(tables.age.contains(platform));
            assert!(tables.sex.contains(platform));
            assert!(tables.education.contains(platform));
        }
    }

    #[test]
    fn test_default_tables_sum_to_one() {
        let tables = DemographicTables::defaults().unwrap();
        for platform in SocialPlatform::ALL {
            assert!((row_sum(&tables.age, platform) - 1.0).abs() <= SUM_TOLERANCE);
            assert!((row_sum(&tables.sex, platform) - 1.0).abs() <= SUM_TOLERANCE);
            assert!((row_sum(&tables.education, platform) - 1.0).abs() <= SUM_TOLERANCE);
        }
    }

    #[test]
    fn test_rejects_bad_sum() {
        let result = DistributionTable::new([(
            SocialPlatform::Facebook,
            vec![(SexGroup::Male, 0.5), (SexGroup::Female, 0.4)],
        )]);
        match result {
            Err(TableError::BadSum { dimension, platform, sum }) => {
                assert_eq!(dimension, "Sex");
                assert_eq!(platform, SocialPlatform::Facebook);
                assert!((sum - 0.9).abs() < 1e-9);
            }
            other => panic!("expected BadSum, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_weight() {
        let result = DistributionTable::new([(
            SocialPlatform::X,
            vec![(SexGroup::Male, 1.2), (SexGroup::Female, -0.2)],
        )]);
        assert!(matches!(result, Err(TableError::InvalidWeight { .. })));
    }

    #[test]
    fn test_accepts_sum_within_tolerance() {
        let table = DistributionTable::new([(
            SocialPlatform::X,
            vec![(SexGroup::Male, 0.5), (SexGroup::Female, 0.5 + 5e-7)],
        )]);
        assert!(table.is_ok());
    }

    #[test]
    fn test_missing_category_has_zero_probability() {
        let table = DistributionTable::new([(
            SocialPlatform::X,
            vec![(SexGroup::Male, 1.0)],
        )])
        .unwrap();
        assert_eq!(table.probability(SocialPlatform::X, SexGroup::Other), Some(0.0));
        assert_eq!(table.probability(SocialPlatform::Reddit, SexGroup::Male), None);
        assert_eq!(table.len(), 1);
    }
}
