//! Concrete section schemas, one tagged union per page domain.
//!
//! # Responsibility
//! - Decode untyped section payloads into domain-specific variants.
//! - Provide compiled-in default payloads for every section.
//!
//! # Invariants
//! - Every key listed in a domain's `SECTION_KEYS` has a default payload.
//! - Every default payload decodes into its own variant.

use crate::model::domain::PageDomain;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod achievements;
pub mod career;
pub mod faculty;
pub mod teams;

pub use achievements::AchievementsSection;
pub use career::CareerSection;
pub use faculty::FacultySection;
pub use teams::TeamsSection;

/// Rejection of a section key or payload at the mutation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// Key is not one of the domain's enumerated sections.
    UnknownSection { domain: PageDomain, key: String },
    /// Payload does not match the section schema.
    InvalidPayload {
        domain: PageDomain,
        key: String,
        reason: String,
    },
}

impl Display for SectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSection { domain, key } => write!(
                f,
                "unknown section `{key}` for {} page; expected one of {}",
                domain.as_str(),
                domain.section_keys().join("|")
            ),
            Self::InvalidPayload {
                domain,
                key,
                reason,
            } => write!(
                f,
                "invalid `{key}` payload for {} page: {reason}",
                domain.as_str()
            ),
        }
    }
}

impl Error for SectionError {}

/// Page hero banner shared by all domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub cta: Option<CallToAction>,
}

/// Button label and target link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    pub href: String,
}

/// One selectable filter chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub group: Option<String>,
}

pub(crate) fn decode_payload<T: DeserializeOwned>(
    domain: PageDomain,
    key: &str,
    value: &Value,
) -> Result<T, SectionError> {
    T::deserialize(value).map_err(|err| SectionError::InvalidPayload {
        domain,
        key: key.to_string(),
        reason: err.to_string(),
    })
}

pub(crate) fn unknown_section(domain: PageDomain, key: &str) -> SectionError {
    SectionError::UnknownSection {
        domain,
        key: key.to_string(),
    }
}
