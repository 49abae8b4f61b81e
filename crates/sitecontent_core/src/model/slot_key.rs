//! Versioned slot key parsing.
//!
//! Slot keys have the form `<namespace>:v<version>`, e.g.
//! `teamsPageContent:v2`. A version bump orphans older slots of the same
//! namespace; nothing migrates them.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static SLOT_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_]*):v([0-9]{1,9})$").expect("valid slot key regex")
});

/// Parsed `<namespace>:v<version>` slot key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub namespace: String,
    pub version: u32,
}

impl SlotKey {
    /// Parses a versioned slot key; returns `None` for foreign key shapes.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = SLOT_KEY_RE.captures(raw.trim())?;
        let version = caps.get(2)?.as_str().parse::<u32>().ok()?;
        Some(Self {
            namespace: caps.get(1)?.as_str().to_string(),
            version,
        })
    }
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:v{}", self.namespace, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::SlotKey;

    #[test]
    fn parses_versioned_keys() {
        let key = SlotKey::parse("teamsPageContent:v2").expect("versioned key should parse");
        assert_eq!(key.namespace, "teamsPageContent");
        assert_eq!(key.version, 2);
        assert_eq!(key.to_string(), "teamsPageContent:v2");
    }

    #[test]
    fn rejects_unversioned_keys() {
        assert_eq!(SlotKey::parse("teamsPageContent"), None);
        assert_eq!(SlotKey::parse("teams:2"), None);
        assert_eq!(SlotKey::parse(":v1"), None);
    }
}
