//! Domain-bound document repository over one content slot.
//!
//! # Responsibility
//! - Decode a slot payload into a `ContentDocument` for one domain.
//! - Encode and write whole documents back to the slot.
//!
//! # Invariants
//! - Loaded documents carry exactly the domain's section keys.
//! - A payload that is not a JSON object is reported as corrupt, never
//!   rewritten by the repository.

use crate::model::document::ContentDocument;
use crate::model::domain::PageDomain;
use crate::repo::slot_repo::{RepoResult, SlotRepository};
use log::warn;
use serde_json::{Map, Value};

/// Result of reading a domain slot.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Slot present and decoded.
    Found(ContentDocument),
    /// Slot absent.
    Missing,
    /// Slot present but unusable; carries the decode failure.
    Corrupt(String),
}

/// Repository binding one page domain to its persistent slot.
pub struct ContentRepository<R: SlotRepository> {
    domain: PageDomain,
    slots: R,
}

impl<R: SlotRepository> ContentRepository<R> {
    pub fn new(domain: PageDomain, slots: R) -> Self {
        Self { domain, slots }
    }

    pub fn domain(&self) -> PageDomain {
        self.domain
    }

    pub fn slot_key(&self) -> &'static str {
        self.domain.slot_key()
    }

    /// Reads and decodes the domain slot.
    ///
    /// Storage failures are returned as errors; decode failures are
    /// reported as `LoadOutcome::Corrupt`.
    pub fn load(&self) -> RepoResult<LoadOutcome> {
        let Some(raw) = self.slots.read_slot(self.slot_key())? else {
            return Ok(LoadOutcome::Missing);
        };

        let parsed = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(err) => return Ok(LoadOutcome::Corrupt(err.to_string())),
        };

        match parsed {
            Value::Object(map) => Ok(LoadOutcome::Found(self.normalize(map))),
            other => Ok(LoadOutcome::Corrupt(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Serializes and writes the whole document. Returns bytes written.
    pub fn save(&self, document: &ContentDocument) -> RepoResult<usize> {
        let payload = document.to_json_string()?;
        self.slots.write_slot(self.slot_key(), &payload)?;
        Ok(payload.len())
    }

    /// Restricts a persisted object to the domain's keys, filling gaps from
    /// the compiled-in default.
    fn normalize(&self, mut persisted: Map<String, Value>) -> ContentDocument {
        let defaults = self.domain.default_document().into_map();

        let dropped: Vec<String> = persisted
            .keys()
            .filter(|key| !self.domain.has_section(key))
            .cloned()
            .collect();
        let mut filled = Vec::new();

        let mut sections = Map::new();
        for (key, default_value) in defaults {
            match persisted.remove(&key) {
                Some(value) => {
                    sections.insert(key, value);
                }
                None => {
                    filled.push(key.clone());
                    sections.insert(key, default_value);
                }
            }
        }

        if !dropped.is_empty() || !filled.is_empty() {
            warn!(
                "event=slot_normalize module=repo status=ok domain={} slot_key={} dropped_keys={} filled_keys={}",
                self.domain.as_str(),
                self.slot_key(),
                dropped.join(","),
                filled.join(",")
            );
        }

        ContentDocument::from(sections)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentRepository, LoadOutcome};
    use crate::model::domain::PageDomain;
    use crate::repo::slot_repo::{MemorySlotRepository, SlotRepository};
    use serde_json::json;

    #[test]
    fn missing_slot_is_reported() {
        let repo = ContentRepository::new(PageDomain::Faculty, MemorySlotRepository::new());
        assert_eq!(repo.load().unwrap(), LoadOutcome::Missing);
    }

    #[test]
    fn non_object_payload_is_corrupt() {
        let slots = MemorySlotRepository::new();
        slots.write_slot("facultyPageContent:v1", "[1,2]").unwrap();
        let repo = ContentRepository::new(PageDomain::Faculty, &slots);
        match repo.load().unwrap() {
            LoadOutcome::Corrupt(reason) => assert!(reason.contains("array")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn persisted_object_is_normalized_to_domain_keys() {
        let slots = MemorySlotRepository::new();
        slots
            .write_slot(
                "facultyPageContent:v1",
                &json!({ "hero": { "title": "Custom" }, "legacy": true }).to_string(),
            )
            .unwrap();
        let repo = ContentRepository::new(PageDomain::Faculty, &slots);

        let LoadOutcome::Found(doc) = repo.load().unwrap() else {
            panic!("slot should load");
        };
        assert_eq!(doc.get("hero"), Some(&json!({ "title": "Custom" })));
        assert!(!doc.contains("legacy"));
        assert_eq!(
            doc.get("faculty"),
            PageDomain::Faculty.default_document().get("faculty")
        );
    }
}
