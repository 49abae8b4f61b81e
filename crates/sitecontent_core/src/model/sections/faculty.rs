//! Faculty page sections.

use super::{decode_payload, unknown_section, FilterOption, HeroContent, SectionError};
use crate::model::domain::PageDomain;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SECTION_KEYS: &[&str] = &["hero", "filters", "faculty"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyMember {
    pub id: u64,
    pub name: String,
    pub subject: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub experience_years: Option<u16>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacultySection {
    Hero(HeroContent),
    Filters(Vec<FilterOption>),
    Faculty(Vec<FacultyMember>),
}

impl FacultySection {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hero(_) => "hero",
            Self::Filters(_) => "filters",
            Self::Faculty(_) => "faculty",
        }
    }

    pub fn decode(key: &str, value: &Value) -> Result<Self, SectionError> {
        let domain = PageDomain::Faculty;
        match key {
            "hero" => decode_payload(domain, key, value).map(Self::Hero),
            "filters" => decode_payload(domain, key, value).map(Self::Filters),
            "faculty" => decode_payload(domain, key, value).map(Self::Faculty),
            other => Err(unknown_section(domain, other)),
        }
    }
}

pub(crate) fn default_sections() -> Vec<(&'static str, Value)> {
    vec![
        (
            "hero",
            json!({
                "title": "Meet Our Faculty",
                "subtitle": "Experienced educators who turn concepts into confidence."
            }),
        ),
        (
            "filters",
            json!([
                { "id": "all", "label": "All Subjects" },
                { "id": "physics", "label": "Physics", "group": "subject" },
                { "id": "chemistry", "label": "Chemistry", "group": "subject" },
                { "id": "mathematics", "label": "Mathematics", "group": "subject" },
                { "id": "biology", "label": "Biology", "group": "subject" }
            ]),
        ),
        (
            "faculty",
            json!([
                {
                    "id": 1,
                    "name": "Dr. Ramesh Iyer",
                    "subject": "physics",
                    "designation": "Head of Physics",
                    "experience_years": 18,
                    "qualifications": ["Ph.D. Physics"]
                },
                {
                    "id": 2,
                    "name": "Neha Kapoor",
                    "subject": "mathematics",
                    "designation": "Senior Faculty",
                    "experience_years": 11,
                    "qualifications": ["M.Sc. Mathematics", "B.Ed."]
                }
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{default_sections, FacultySection, SECTION_KEYS};

    #[test]
    fn defaults_decode_into_their_variants() {
        let defaults = default_sections();
        assert_eq!(defaults.len(), SECTION_KEYS.len());
        for (key, value) in defaults {
            let section = FacultySection::decode(key, &value).expect("default should decode");
            assert_eq!(section.key(), key);
        }
    }
}
