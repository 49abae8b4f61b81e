//! Achievements page sections.

use super::{decode_payload, unknown_section, FilterOption, HeroContent, SectionError};
use crate::model::domain::PageDomain;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SECTION_KEYS: &[&str] = &["hero", "stats", "filters", "achievements"];

/// Headline number such as "1200+ selections".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatItem {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub suffix: Option<String>,
}

/// One student result card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u64,
    pub student_name: String,
    pub exam: String,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AchievementsSection {
    Hero(HeroContent),
    Stats(Vec<StatItem>),
    Filters(Vec<FilterOption>),
    Achievements(Vec<Achievement>),
}

impl AchievementsSection {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hero(_) => "hero",
            Self::Stats(_) => "stats",
            Self::Filters(_) => "filters",
            Self::Achievements(_) => "achievements",
        }
    }

    pub fn decode(key: &str, value: &Value) -> Result<Self, SectionError> {
        let domain = PageDomain::Achievements;
        match key {
            "hero" => decode_payload(domain, key, value).map(Self::Hero),
            "stats" => decode_payload(domain, key, value).map(Self::Stats),
            "filters" => decode_payload(domain, key, value).map(Self::Filters),
            "achievements" => decode_payload(domain, key, value).map(Self::Achievements),
            other => Err(unknown_section(domain, other)),
        }
    }
}

pub(crate) fn default_sections() -> Vec<(&'static str, Value)> {
    vec![
        (
            "hero",
            json!({
                "title": "Our Achievers",
                "subtitle": "Results earned through consistent effort and focused mentoring.",
                "background_image": "/images/achievements/hero.jpg"
            }),
        ),
        (
            "stats",
            json!([
                { "label": "Selections", "value": "1200", "suffix": "+" },
                { "label": "Top 100 Ranks", "value": "85" },
                { "label": "Years of Results", "value": "15", "suffix": "+" }
            ]),
        ),
        (
            "filters",
            json!([
                { "id": "all", "label": "All" },
                { "id": "engineering", "label": "Engineering", "group": "category" },
                { "id": "medical", "label": "Medical", "group": "category" },
                { "id": "foundation", "label": "Foundation", "group": "category" }
            ]),
        ),
        (
            "achievements",
            json!([
                {
                    "id": 1,
                    "student_name": "Aarav Mehta",
                    "exam": "JEE Advanced",
                    "rank": "AIR 42",
                    "year": 2024,
                    "category": "engineering"
                },
                {
                    "id": 2,
                    "student_name": "Diya Sharma",
                    "exam": "NEET UG",
                    "rank": "AIR 118",
                    "year": 2024,
                    "category": "medical"
                }
            ]),
        ),
    ]
}
