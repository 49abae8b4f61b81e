//! Slot inventory and orphan cleanup.
//!
//! # Responsibility
//! - Classify stored slots against the known page domains.
//! - Delete slots orphaned by a slot key version bump.
//!
//! # Invariants
//! - Only slots of a known namespace with an older version are orphaned.
//! - Unrecognized and newer-version slots are never deleted.

use crate::model::domain::PageDomain;
use crate::model::slot_key::SlotKey;
use crate::repo::slot_repo::{RepoResult, SlotEntry, SlotRepository};
use log::info;

/// Classification of one stored slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Slot holds the domain's current schema generation.
    Current(PageDomain),
    /// Older schema generation of a known domain.
    Orphaned {
        domain: PageDomain,
        version: u32,
        current_version: u32,
    },
    /// Not owned by any known domain generation.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotReport {
    pub entry: SlotEntry,
    pub status: SlotStatus,
}

/// Maintenance use-cases over a slot repository.
pub struct SlotMaintenanceService<R: SlotRepository> {
    slots: R,
}

impl<R: SlotRepository> SlotMaintenanceService<R> {
    pub fn new(slots: R) -> Self {
        Self { slots }
    }

    /// Lists every stored slot with its classification.
    pub fn inventory(&self) -> RepoResult<Vec<SlotReport>> {
        Ok(self
            .slots
            .list_slots()?
            .into_iter()
            .map(|entry| {
                let status = classify_slot(&entry.slot_key);
                SlotReport { entry, status }
            })
            .collect())
    }

    /// Deletes orphaned slots and returns their keys.
    pub fn purge_orphans(&self) -> RepoResult<Vec<String>> {
        let mut purged = Vec::new();
        for report in self.inventory()? {
            if let SlotStatus::Orphaned { domain, version, .. } = report.status {
                if self.slots.delete_slot(&report.entry.slot_key)? {
                    info!(
                        "event=slot_purge module=maintenance status=ok domain={} slot_key={} version={}",
                        domain.as_str(),
                        report.entry.slot_key,
                        version
                    );
                    purged.push(report.entry.slot_key);
                }
            }
        }
        Ok(purged)
    }
}

/// Classifies a slot key against the known page domains.
pub fn classify_slot(slot_key: &str) -> SlotStatus {
    let Some(parsed) = SlotKey::parse(slot_key) else {
        return SlotStatus::Unrecognized;
    };
    let Some(domain) = PageDomain::from_slot_namespace(&parsed.namespace) else {
        return SlotStatus::Unrecognized;
    };

    let current_version = domain.slot_version();
    if parsed.version == current_version {
        SlotStatus::Current(domain)
    } else if parsed.version < current_version {
        SlotStatus::Orphaned {
            domain,
            version: parsed.version,
            current_version,
        }
    } else {
        SlotStatus::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_slot, SlotStatus};
    use crate::model::domain::PageDomain;

    #[test]
    fn classify_slot_distinguishes_generations() {
        assert_eq!(
            classify_slot("teamsPageContent:v2"),
            SlotStatus::Current(PageDomain::Teams)
        );
        assert_eq!(
            classify_slot("teamsPageContent:v1"),
            SlotStatus::Orphaned {
                domain: PageDomain::Teams,
                version: 1,
                current_version: 2,
            }
        );
        assert_eq!(classify_slot("teamsPageContent:v3"), SlotStatus::Unrecognized);
        assert_eq!(classify_slot("theme"), SlotStatus::Unrecognized);
    }
}
