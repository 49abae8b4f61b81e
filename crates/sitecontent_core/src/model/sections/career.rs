//! Career page sections.

use super::{decode_payload, unknown_section, FilterOption, HeroContent, SectionError};
use crate::model::domain::PageDomain;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SECTION_KEYS: &[&str] = &["hero", "benefits", "filters", "jobs"];

/// Open position listed on the career page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub apply_url: Option<String>,
}

/// Perk card shown above the openings list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CareerSection {
    Hero(HeroContent),
    Benefits(Vec<Benefit>),
    Filters(Vec<FilterOption>),
    Jobs(Vec<JobPosting>),
}

impl CareerSection {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hero(_) => "hero",
            Self::Benefits(_) => "benefits",
            Self::Filters(_) => "filters",
            Self::Jobs(_) => "jobs",
        }
    }

    /// Decodes one career section payload by key.
    pub fn decode(key: &str, value: &Value) -> Result<Self, SectionError> {
        let domain = PageDomain::Career;
        match key {
            "hero" => decode_payload(domain, key, value).map(Self::Hero),
            "benefits" => decode_payload(domain, key, value).map(Self::Benefits),
            "filters" => decode_payload(domain, key, value).map(Self::Filters),
            "jobs" => decode_payload(domain, key, value).map(Self::Jobs),
            other => Err(unknown_section(domain, other)),
        }
    }
}

pub(crate) fn default_sections() -> Vec<(&'static str, Value)> {
    vec![
        (
            "hero",
            json!({
                "title": "Build Your Career With Us",
                "subtitle": "Join a team of educators and mentors shaping the next generation of achievers.",
                "background_image": "/images/career/hero.jpg",
                "cta": { "label": "View Openings", "href": "#openings" }
            }),
        ),
        (
            "benefits",
            json!([
                {
                    "title": "Competitive Pay",
                    "description": "Market-aligned salaries with performance incentives.",
                    "icon": "wallet"
                },
                {
                    "title": "Learning Budget",
                    "description": "Annual allowance for courses, books and certifications.",
                    "icon": "book"
                },
                {
                    "title": "Flexible Schedule",
                    "description": "Batch timings planned around faculty availability.",
                    "icon": "clock"
                }
            ]),
        ),
        (
            "filters",
            json!([
                { "id": "all", "label": "All Departments" },
                { "id": "teaching", "label": "Teaching", "group": "department" },
                { "id": "operations", "label": "Operations", "group": "department" },
                { "id": "content", "label": "Content", "group": "department" }
            ]),
        ),
        ("jobs", json!([])),
    ]
}

#[cfg(test)]
mod tests {
    use super::{default_sections, CareerSection, SECTION_KEYS};
    use crate::model::sections::SectionError;
    use serde_json::json;

    #[test]
    fn defaults_decode_into_their_variants() {
        let defaults = default_sections();
        assert_eq!(defaults.len(), SECTION_KEYS.len());
        for (key, value) in defaults {
            let section = CareerSection::decode(key, &value).expect("default should decode");
            assert_eq!(section.key(), key);
        }
    }

    #[test]
    fn job_needs_id_and_title() {
        let ok = CareerSection::decode("jobs", &json!([{ "id": 1, "title": "Analyst" }]));
        match ok {
            Ok(CareerSection::Jobs(jobs)) => {
                assert_eq!(jobs.len(), 1);
                assert_eq!(jobs[0].title, "Analyst");
                assert!(jobs[0].requirements.is_empty());
            }
            other => panic!("unexpected decode result: {other:?}"),
        }

        let err = CareerSection::decode("jobs", &json!([{ "title": "Analyst" }])).unwrap_err();
        assert!(matches!(err, SectionError::InvalidPayload { .. }));
    }
}
