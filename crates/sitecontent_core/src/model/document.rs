//! Section-keyed content document.
//!
//! # Invariants
//! - Section replacement is wholesale and never adds or removes keys.
//! - Serialized form is a flat JSON object keyed by section name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full editable content for one page domain, keyed by section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDocument {
    sections: Map<String, Value>,
}

impl ContentDocument {
    /// Builds a document from `(section_key, value)` pairs.
    pub fn from_sections<K, I>(sections: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            sections: sections
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }

    /// Returns one section payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.sections.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sections.contains_key(key)
    }

    /// Returns section keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Replaces an existing section and returns the previous payload.
    ///
    /// Returns `None` and leaves the document untouched when `key` is not
    /// part of the document.
    pub fn replace_section(&mut self, key: &str, value: Value) -> Option<Value> {
        let slot = self.sections.get_mut(key)?;
        Some(std::mem::replace(slot, value))
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.sections
    }

    /// Serializes the whole document to its slot payload form.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.sections)
    }
}

impl From<Map<String, Value>> for ContentDocument {
    fn from(sections: Map<String, Value>) -> Self {
        Self { sections }
    }
}

#[cfg(test)]
mod tests {
    use super::ContentDocument;
    use serde_json::json;

    #[test]
    fn replace_section_keeps_key_set() {
        let mut doc = ContentDocument::from_sections([("hero", json!({"title": "a"}))]);
        let previous = doc.replace_section("hero", json!({"title": "b"}));
        assert_eq!(previous, Some(json!({"title": "a"})));
        assert_eq!(doc.get("hero"), Some(&json!({"title": "b"})));

        assert_eq!(doc.replace_section("jobs", json!([])), None);
        assert!(!doc.contains("jobs"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn serializes_as_flat_object() {
        let doc = ContentDocument::from_sections([("jobs", json!([])), ("hero", json!(null))]);
        let raw = doc.to_json_string().unwrap();
        assert_eq!(raw, r#"{"hero":null,"jobs":[]}"#);
    }
}
