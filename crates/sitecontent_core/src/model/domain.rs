//! Page domain configuration.
//!
//! # Responsibility
//! - Enumerate editable page domains.
//! - Bind each domain to its versioned slot key, section keys and defaults.
//!
//! # Invariants
//! - `default_document()` contains exactly `section_keys()`.
//! - Slot keys are versioned `<namespace>:v<N>`; bumping the version orphans
//!   the previous slot without migrating it.

use crate::model::document::ContentDocument;
use crate::model::sections::{
    achievements, career, faculty, teams, AchievementsSection, CareerSection, FacultySection,
    SectionError, TeamsSection,
};
use crate::model::slot_key::SlotKey;
use serde_json::Value;

/// Editable page category with its own store instance and schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PageDomain {
    Achievements,
    Career,
    Faculty,
    Teams,
}

impl PageDomain {
    pub const ALL: [PageDomain; 4] = [
        PageDomain::Achievements,
        PageDomain::Career,
        PageDomain::Faculty,
        PageDomain::Teams,
    ];

    /// Stable lowercase name used by FFI and CLI callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Achievements => "achievements",
            Self::Career => "career",
            Self::Faculty => "faculty",
            Self::Teams => "teams",
        }
    }

    /// Parses a domain name case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == normalized)
    }

    /// Persistent slot identifier for this domain's current schema generation.
    pub fn slot_key(self) -> &'static str {
        match self {
            Self::Achievements => "achievementsPageContent:v1",
            Self::Career => "careerPageContent:v1",
            Self::Faculty => "facultyPageContent:v1",
            Self::Teams => "teamsPageContent:v2",
        }
    }

    /// Slot namespace shared by every schema generation of this domain.
    pub fn slot_namespace(self) -> &'static str {
        match self {
            Self::Achievements => "achievementsPageContent",
            Self::Career => "careerPageContent",
            Self::Faculty => "facultyPageContent",
            Self::Teams => "teamsPageContent",
        }
    }

    /// Current schema generation of this domain's slot.
    pub fn slot_version(self) -> u32 {
        match self {
            Self::Teams => 2,
            _ => 1,
        }
    }

    /// Parsed form of `slot_key()`.
    pub fn parsed_slot_key(self) -> SlotKey {
        SlotKey {
            namespace: self.slot_namespace().to_string(),
            version: self.slot_version(),
        }
    }

    /// Finds the domain owning a slot namespace (any version).
    pub fn from_slot_namespace(namespace: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.slot_namespace() == namespace)
    }

    /// Enumerated section keys, in display order.
    pub fn section_keys(self) -> &'static [&'static str] {
        match self {
            Self::Achievements => achievements::SECTION_KEYS,
            Self::Career => career::SECTION_KEYS,
            Self::Faculty => faculty::SECTION_KEYS,
            Self::Teams => teams::SECTION_KEYS,
        }
    }

    pub fn has_section(self, key: &str) -> bool {
        self.section_keys().contains(&key)
    }

    /// Whether the page edits several sections in one batch.
    pub fn supports_batch_update(self) -> bool {
        matches!(self, Self::Career)
    }

    /// Compiled-in fallback document.
    pub fn default_document(self) -> ContentDocument {
        let sections = match self {
            Self::Achievements => achievements::default_sections(),
            Self::Career => career::default_sections(),
            Self::Faculty => faculty::default_sections(),
            Self::Teams => teams::default_sections(),
        };
        ContentDocument::from_sections(sections)
    }

    /// Validates a section key and payload against this domain's schema.
    pub fn validate_section(self, key: &str, value: &Value) -> Result<(), SectionError> {
        match self {
            Self::Achievements => AchievementsSection::decode(key, value).map(|_| ()),
            Self::Career => CareerSection::decode(key, value).map(|_| ()),
            Self::Faculty => FacultySection::decode(key, value).map(|_| ()),
            Self::Teams => TeamsSection::decode(key, value).map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageDomain;
    use crate::model::slot_key::SlotKey;

    #[test]
    fn default_documents_match_section_keys() {
        for domain in PageDomain::ALL {
            let doc = domain.default_document();
            assert_eq!(doc.len(), domain.section_keys().len(), "{domain:?}");
            for key in domain.section_keys() {
                let value = doc.get(key).expect("default section should exist");
                domain
                    .validate_section(key, value)
                    .expect("default section should validate");
            }
        }
    }

    #[test]
    fn slot_key_matches_namespace_and_version() {
        for domain in PageDomain::ALL {
            let parsed = SlotKey::parse(domain.slot_key()).expect("slot key should be versioned");
            assert_eq!(parsed, domain.parsed_slot_key());
        }
    }

    #[test]
    fn parse_accepts_mixed_case() {
        assert_eq!(PageDomain::parse(" Career "), Some(PageDomain::Career));
        assert_eq!(PageDomain::parse("blog"), None);
    }

    #[test]
    fn slot_namespaces_resolve_to_domains() {
        assert_eq!(
            PageDomain::from_slot_namespace("teamsPageContent"),
            Some(PageDomain::Teams)
        );
        assert_eq!(PageDomain::Teams.parsed_slot_key().version, 2);
        assert_eq!(PageDomain::from_slot_namespace("quizPageContent"), None);
    }

    #[test]
    fn only_career_supports_batch_updates() {
        let batch: Vec<_> = PageDomain::ALL
            .into_iter()
            .filter(|domain| domain.supports_batch_update())
            .collect();
        assert_eq!(batch, vec![PageDomain::Career]);
    }
}
