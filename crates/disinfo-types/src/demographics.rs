//! Demographic Types
//!
//! Closed enumerations attached to every agent at creation time.
//!
//! # Example
//!
//! ```
//! use disinfo_types::{AgeGroup, SocialPlatform};
//!
//! let platform: SocialPlatform = "tiktok".parse().unwrap();
//! assert_eq!(platform, SocialPlatform::TikTok);
//! assert!(AgeGroup::Under18.is_young());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a demographic name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGroupError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseGroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for ParseGroupError {}

/// Finds the variant whose name matches `s`, ignoring case.
fn parse_by_name<T: Copy>(
    all: &[T],
    name: impl Fn(T) -> &'static str,
    kind: &'static str,
    s: &str,
) -> Result<T, ParseGroupError> {
    all.iter()
        .copied()
        .find(|v| name(*v).eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| ParseGroupError {
            kind,
            value: s.to_string(),
        })
}

/// Age bracket of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    Under18,
    Age18To24,
    Age25To34,
    Age35To44,
    Age45To54,
    Age55To64,
    Age65Plus,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 7] = [
        AgeGroup::Under18,
        AgeGroup::Age18To24,
        AgeGroup::Age25To34,
        AgeGroup::Age35To44,
        AgeGroup::Age45To54,
        AgeGroup::Age55To64,
        AgeGroup::Age65Plus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AgeGroup::Under18 => "Under18",
            AgeGroup::Age18To24 => "Age18To24",
            AgeGroup::Age25To34 => "Age25To34",
            AgeGroup::Age35To44 => "Age35To44",
            AgeGroup::Age45To54 => "Age45To54",
            AgeGroup::Age55To64 => "Age55To64",
            AgeGroup::Age65Plus => "Age65Plus",
        }
    }

    /// The two youngest brackets, which cannot hold higher-education attainment.
    pub fn is_young(self) -> bool {
        matches!(self, AgeGroup::Under18 | AgeGroup::Age18To24)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgeGroup {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(&Self::ALL, Self::name, "age group", s)
    }
}

/// Sex of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SexGroup {
    Male,
    Female,
    Other,
}

impl SexGroup {
    pub const ALL: [SexGroup; 3] = [SexGroup::Male, SexGroup::Female, SexGroup::Other];

    pub fn name(self) -> &'static str {
        match self {
            SexGroup::Male => "Male",
            SexGroup::Female => "Female",
            SexGroup::Other => "Other",
        }
    }
}

impl fmt::Display for SexGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SexGroup {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(&Self::ALL, Self::name, "sex group", s)
    }
}

/// Highest completed education level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationGroup {
    Primary,
    Secondary,
    Higher,
    Vocational,
}

impl EducationGroup {
    pub const ALL: [EducationGroup; 4] = [
        EducationGroup::Primary,
        EducationGroup::Secondary,
        EducationGroup::Higher,
        EducationGroup::Vocational,
    ];

    /// Levels attainable by agents in the youngest age brackets.
    pub const YOUNG_ATTAINABLE: [EducationGroup; 2] =
        [EducationGroup::Primary, EducationGroup::Secondary];

    pub fn name(self) -> &'static str {
        match self {
            EducationGroup::Primary => "Primary",
            EducationGroup::Secondary => "Secondary",
            EducationGroup::Higher => "Higher",
            EducationGroup::Vocational => "Vocational",
        }
    }
}

impl fmt::Display for EducationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EducationGroup {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(&Self::ALL, Self::name, "education group", s)
    }
}

/// Social platform an agent primarily consumes news through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SocialPlatform {
    LinkedIn,
    Facebook,
    Instagram,
    X,
    Telegram,
    Reddit,
    Pinterest,
    Snapchat,
    TikTok,
    YouTube,
    WeChat,
    Weibo,
    Other,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 13] = [
        SocialPlatform::LinkedIn,
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::X,
        SocialPlatform::Telegram,
        SocialPlatform::Reddit,
        SocialPlatform::Pinterest,
        SocialPlatform::Snapchat,
        SocialPlatform::TikTok,
        SocialPlatform::YouTube,
        SocialPlatform::WeChat,
        SocialPlatform::Weibo,
        SocialPlatform::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SocialPlatform::LinkedIn => "LinkedIn",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::X => "X",
            SocialPlatform::Telegram => "Telegram",
            SocialPlatform::Reddit => "Reddit",
            SocialPlatform::Pinterest => "Pinterest",
            SocialPlatform::Snapchat => "Snapchat",
            SocialPlatform::TikTok => "TikTok",
            SocialPlatform::YouTube => "YouTube",
            SocialPlatform::WeChat => "WeChat",
            SocialPlatform::Weibo => "Weibo",
            SocialPlatform::Other => "Other",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SocialPlatform {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(&Self::ALL, Self::name, "social platform", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("youtube".parse::<SocialPlatform>().unwrap(), SocialPlatform::YouTube);
        assert_eq!(" FEMALE ".parse::<SexGroup>().unwrap(), SexGroup::Female);
        assert_eq!("age65plus".parse::<AgeGroup>().unwrap(), AgeGroup::Age65Plus);
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "myspace".parse::<SocialPlatform>().unwrap_err();
        assert_eq!(err.kind, "social platform");
        assert_eq!(err.to_string(), "unknown social platform: myspace");
    }

    #[test]
    fn test_display_matches_name() {
        for platform in SocialPlatform::ALL {
            assert_eq!(platform.to_string(), platform.name());
            assert_eq!(platform.name().parse::<SocialPlatform>().unwrap(), platform);
        }
        for education in EducationGroup::ALL {
            assert_eq!(education.name().parse::<EducationGroup>().unwrap(), education);
        }
    }

    #[test]
    fn test_only_two_youngest_are_young() {
        let young: Vec<_> = AgeGroup::ALL.iter().filter(|a| a.is_young()).collect();
        assert_eq!(young, vec![&AgeGroup::Under18, &AgeGroup::Age18To24]);
    }

    #[test]
    fn test_serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&SocialPlatform::TikTok).unwrap(), r#""TikTok""#);
        let parsed: Vec<SocialPlatform> = serde_json::from_str(r#"["X", "Reddit"]"#).unwrap();
        assert_eq!(parsed, vec![SocialPlatform::X, SocialPlatform::Reddit]);
    }
}
