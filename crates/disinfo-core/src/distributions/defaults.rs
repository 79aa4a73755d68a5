//! Built-in distribution tables.
//!
//! Columns follow the category's declaration order.

use disinfo_types::{AgeGroup, EducationGroup, SexGroup, SocialPlatform};

use super::{Category, DistributionTable};
use crate::error::TableError;

/// Under18, 18-24, 25-34, 35-44, 45-54, 55-64, 65+
const AGE: [(SocialPlatform, [f64; 7]); 13] = [
    (SocialPlatform::LinkedIn, [0.02, 0.20, 0.35, 0.20, 0.13, 0.07, 0.03]),
    (SocialPlatform::Facebook, [0.04, 0.16, 0.26, 0.20, 0.15, 0.11, 0.08]),
    (SocialPlatform::Instagram, [0.08, 0.30, 0.31, 0.16, 0.08, 0.05, 0.02]),
    (SocialPlatform::X, [0.05, 0.22, 0.30, 0.20, 0.12, 0.07, 0.04]),
    (SocialPlatform::Telegram, [0.05, 0.22, 0.30, 0.22, 0.12, 0.06, 0.03]),
    (SocialPlatform::Reddit, [0.06, 0.28, 0.33, 0.18, 0.09, 0.04, 0.02]),
    (SocialPlatform::Pinterest, [0.05, 0.20, 0.28, 0.21, 0.14, 0.08, 0.04]),
    (SocialPlatform::Snapchat, [0.20, 0.38, 0.24, 0.10, 0.05, 0.02, 0.01]),
    (SocialPlatform::TikTok, [0.25, 0.35, 0.22, 0.10, 0.05, 0.02, 0.01]),
    (SocialPlatform::YouTube, [0.12, 0.18, 0.22, 0.18, 0.14, 0.10, 0.06]),
    (SocialPlatform::WeChat, [0.05, 0.15, 0.25, 0.22, 0.16, 0.11, 0.06]),
    (SocialPlatform::Weibo, [0.06, 0.24, 0.32, 0.20, 0.10, 0.05, 0.03]),
    (SocialPlatform::Other, [0.10, 0.17, 0.20, 0.17, 0.14, 0.12, 0.10]),
];

/// Male, Female, Other
const SEX: [(SocialPlatform, [f64; 3]); 13] = [
    (SocialPlatform::LinkedIn, [0.55, 0.40, 0.05]),
    (SocialPlatform::Facebook, [0.48, 0.48, 0.04]),
    (SocialPlatform::Instagram, [0.45, 0.50, 0.05]),
    (SocialPlatform::X, [0.50, 0.45, 0.05]),
    (SocialPlatform::Telegram, [0.52, 0.43, 0.05]),
    (SocialPlatform::Reddit, [0.60, 0.35, 0.05]),
    (SocialPlatform::Pinterest, [0.30, 0.65, 0.05]),
    (SocialPlatform::Snapchat, [0.40, 0.55, 0.05]),
    (SocialPlatform::TikTok, [0.47, 0.48, 0.05]),
    (SocialPlatform::YouTube, [0.50, 0.45, 0.05]),
    (SocialPlatform::WeChat, [0.51, 0.45, 0.04]),
    (SocialPlatform::Weibo, [0.52, 0.43, 0.05]),
    (SocialPlatform::Other, [0.49, 0.47, 0.04]),
];

/// Primary, Secondary, Higher, Vocational
const EDUCATION: [(SocialPlatform, [f64; 4]); 13] = [
    (SocialPlatform::LinkedIn, [0.02, 0.18, 0.75, 0.05]),
    (SocialPlatform::Facebook, [0.10, 0.40, 0.45, 0.05]),
    (SocialPlatform::Instagram, [0.05, 0.30, 0.60, 0.05]),
    (SocialPlatform::X, [0.03, 0.27, 0.65, 0.05]),
    (SocialPlatform::Telegram, [0.04, 0.35, 0.55, 0.06]),
    (SocialPlatform::Reddit, [0.01, 0.20, 0.75, 0.04]),
    (SocialPlatform::Pinterest, [0.03, 0.22, 0.70, 0.05]),
    (SocialPlatform::Snapchat, [0.08, 0.25, 0.60, 0.07]),
    (SocialPlatform::TikTok, [0.25, 0.50, 0.20, 0.05]),
    (SocialPlatform::YouTube, [0.05, 0.25, 0.65, 0.05]),
    (SocialPlatform::WeChat, [0.04, 0.30, 0.60, 0.06]),
    (SocialPlatform::Weibo, [0.03, 0.28, 0.65, 0.04]),
    (SocialPlatform::Other, [0.05, 0.25, 0.65, 0.05]),
];

fn build<C: Category, const K: usize>(
    data: &[(SocialPlatform, [f64; K])],
) -> Result<DistributionTable<C>, TableError> {
    DistributionTable::new(data.iter().map(|(platform, weights)| {
        (*platform, C::all().iter().copied().zip(weights.iter().copied()))
    }))
}

pub fn default_age_table() -> Result<DistributionTable<AgeGroup>, TableError> {
    build(&AGE[..])
}

pub fn default_sex_table() -> Result<DistributionTable<SexGroup>, TableError> {
    build(&SEX[..])
}

pub fn default_education_table() -> Result<DistributionTable<EducationGroup>, TableError> {
    build(&EDUCATION[..])
}
