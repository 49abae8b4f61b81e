//! Teams page sections.

use super::{decode_payload, unknown_section, HeroContent, SectionError};
use crate::model::domain::PageDomain;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SECTION_KEYS: &[&str] = &["hero", "departments", "teams"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u64,
    pub name: String,
    pub role: String,
    /// Matches a `Department::id`.
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamsSection {
    Hero(HeroContent),
    Departments(Vec<Department>),
    Teams(Vec<TeamMember>),
}

impl TeamsSection {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hero(_) => "hero",
            Self::Departments(_) => "departments",
            Self::Teams(_) => "teams",
        }
    }

    pub fn decode(key: &str, value: &Value) -> Result<Self, SectionError> {
        let domain = PageDomain::Teams;
        match key {
            "hero" => decode_payload(domain, key, value).map(Self::Hero),
            "departments" => decode_payload(domain, key, value).map(Self::Departments),
            "teams" => decode_payload(domain, key, value).map(Self::Teams),
            other => Err(unknown_section(domain, other)),
        }
    }
}

pub(crate) fn default_sections() -> Vec<(&'static str, Value)> {
    vec![
        (
            "hero",
            json!({
                "title": "The People Behind The Institute",
                "subtitle": "Counsellors, coordinators and mentors supporting every student."
            }),
        ),
        (
            "departments",
            json!([
                { "id": "academics", "name": "Academics", "description": "Curriculum and batch planning." },
                { "id": "counselling", "name": "Counselling", "description": "Admissions and student guidance." },
                { "id": "operations", "name": "Operations" }
            ]),
        ),
        (
            "teams",
            json!([
                { "id": 1, "name": "Anita Desai", "role": "Academic Director", "department": "academics" },
                { "id": 2, "name": "Vikram Rao", "role": "Lead Counsellor", "department": "counselling" },
                { "id": 3, "name": "Sara Thomas", "role": "Centre Manager", "department": "operations" }
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{default_sections, TeamsSection, SECTION_KEYS};

    #[test]
    fn defaults_decode_into_their_variants() {
        let defaults = default_sections();
        assert_eq!(defaults.len(), SECTION_KEYS.len());
        for (key, value) in defaults {
            let section = TeamsSection::decode(key, &value).expect("default should decode");
            assert_eq!(section.key(), key);
        }
    }
}
