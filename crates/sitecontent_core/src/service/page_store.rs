//! Page content store.
//!
//! # Responsibility
//! - Own one in-memory `ContentDocument` per page domain.
//! - Hydrate it from the domain slot, falling back to compiled-in defaults.
//! - Keep the slot synchronized with every mutation through `flush`.
//!
//! # Invariants
//! - State moves `Uninitialized -> Loading -> Ready` once per instance.
//! - Mutations validate section keys and payloads before touching memory.
//! - Storage failures never propagate as errors; they leave the store dirty
//!   and are reported through `PersistOutcome` and `last_persist_error()`.
//! - A corrupt slot is never overwritten during initialization.

use crate::model::document::ContentDocument;
use crate::model::domain::PageDomain;
use crate::model::sections::SectionError;
use crate::repo::content_repo::{ContentRepository, LoadOutcome};
use crate::repo::slot_repo::SlotRepository;
use log::{error, info, warn};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_MAX_PERSIST_ATTEMPTS: u32 = 2;

/// Store lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Loading,
    Ready,
}

/// Where the initial document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSource {
    /// Slot present and decoded.
    Persisted,
    /// Slot absent; default adopted and written.
    DefaultSeeded,
    /// Slot absent; default adopted but the seed write failed. The store
    /// stays dirty until a later `flush` succeeds.
    DefaultSeedDeferred,
    /// Slot present but unparseable; default adopted, slot left untouched.
    DefaultAfterCorruptSlot,
    /// Slot storage failed on read; default adopted, nothing written.
    DefaultAfterReadFailure,
}

/// Retry policy applied to every flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistPolicy {
    /// Total write attempts per flush, clamped to at least 1.
    pub max_attempts: u32,
}

impl Default for PersistPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_PERSIST_ATTEMPTS,
        }
    }
}

/// Result of writing the in-memory document to its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Persisted { bytes: usize, attempts: u32 },
    /// Every attempt failed; the in-memory edit is kept and marked unsaved.
    Deferred { error: String, attempts: u32 },
}

impl PersistOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted { .. })
    }
}

/// Caller contract violations rejected by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Section(SectionError),
    BatchUpdateUnsupported(PageDomain),
    NotInitialized(PageDomain),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Section(err) => write!(f, "{err}"),
            Self::BatchUpdateUnsupported(domain) => write!(
                f,
                "{} page does not support multi-section updates",
                domain.as_str()
            ),
            Self::NotInitialized(domain) => {
                write!(f, "{} page store is not initialized", domain.as_str())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Section(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SectionError> for StoreError {
    fn from(value: SectionError) -> Self {
        Self::Section(value)
    }
}

/// Editable content store for one page domain.
pub struct PageContentStore<R: SlotRepository> {
    repo: ContentRepository<R>,
    policy: PersistPolicy,
    state: StoreState,
    init_source: Option<InitSource>,
    data: ContentDocument,
    edit_mode: bool,
    dirty: bool,
    last_persist_error: Option<String>,
}

impl<R: SlotRepository> PageContentStore<R> {
    /// Creates an uninitialized store holding the domain default.
    pub fn new(domain: PageDomain, slots: R) -> Self {
        Self {
            repo: ContentRepository::new(domain, slots),
            policy: PersistPolicy::default(),
            state: StoreState::Uninitialized,
            init_source: None,
            data: domain.default_document(),
            edit_mode: false,
            dirty: false,
            last_persist_error: None,
        }
    }

    /// Creates and initializes a store in one step.
    pub fn open(domain: PageDomain, slots: R) -> Self {
        let mut store = Self::new(domain, slots);
        store.initialize();
        store
    }

    /// Replaces the flush retry policy.
    pub fn with_policy(mut self, policy: PersistPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Hydrates the document from the domain slot.
    ///
    /// Calling this again on a ready store is a no-op that returns the
    /// original source.
    pub fn initialize(&mut self) -> InitSource {
        if let Some(source) = self.init_source {
            return source;
        }

        let domain = self.domain();
        self.state = StoreState::Loading;

        let source = match self.repo.load() {
            Ok(LoadOutcome::Found(document)) => {
                self.data = document;
                InitSource::Persisted
            }
            Ok(LoadOutcome::Missing) => {
                self.data = domain.default_document();
                self.dirty = true;
                match self.flush() {
                    PersistOutcome::Persisted { .. } => InitSource::DefaultSeeded,
                    PersistOutcome::Deferred { error, attempts } => {
                        error!(
                            "event=store_init module=store status=error domain={} slot_key={} attempts={} error_code=slot_seed_failed error={}",
                            domain.as_str(),
                            domain.slot_key(),
                            attempts,
                            error
                        );
                        InitSource::DefaultSeedDeferred
                    }
                }
            }
            Ok(LoadOutcome::Corrupt(reason)) => {
                warn!(
                    "event=store_init module=store status=corrupt_slot domain={} slot_key={} error={}",
                    domain.as_str(),
                    domain.slot_key(),
                    reason
                );
                self.data = domain.default_document();
                InitSource::DefaultAfterCorruptSlot
            }
            Err(err) => {
                error!(
                    "event=store_init module=store status=error domain={} slot_key={} error_code=slot_read_failed error={}",
                    domain.as_str(),
                    domain.slot_key(),
                    err
                );
                self.data = domain.default_document();
                InitSource::DefaultAfterReadFailure
            }
        };

        info!(
            "event=store_init module=store status=ok domain={} source={:?} sections={}",
            domain.as_str(),
            source,
            self.data.len()
        );

        self.state = StoreState::Ready;
        self.init_source = Some(source);
        source
    }

    pub fn domain(&self) -> PageDomain {
        self.repo.domain()
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Whether callers may render edit affordances.
    pub fn is_loaded(&self) -> bool {
        self.state == StoreState::Ready
    }

    /// Source of the initial document, once initialized.
    pub fn init_source(&self) -> Option<InitSource> {
        self.init_source
    }

    /// Current document; the domain default until initialized.
    pub fn data(&self) -> &ContentDocument {
        &self.data
    }

    pub fn section(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
    }

    /// Whether memory holds edits the slot does not reflect.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Last flush failure, cleared by the next successful flush.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Replaces one section and persists the whole document.
    pub fn update_section(
        &mut self,
        key: &str,
        value: Value,
    ) -> Result<PersistOutcome, StoreError> {
        self.stage_section(key, value)?;
        info!(
            "event=section_update module=store status=ok domain={} section={}",
            self.domain().as_str(),
            key
        );
        Ok(self.flush())
    }

    /// Replaces one section in memory only; pair with `save_data` or `flush`.
    pub fn stage_section(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.ensure_ready()?;
        self.domain().validate_section(key, &value)?;
        self.data.replace_section(key, value);
        self.dirty = true;
        Ok(())
    }

    /// Replaces several sections in one pass, then persists once.
    ///
    /// Every entry is validated before any is applied.
    pub fn update_multiple(
        &mut self,
        sections: Map<String, Value>,
    ) -> Result<PersistOutcome, StoreError> {
        self.ensure_ready()?;
        let domain = self.domain();
        if !domain.supports_batch_update() {
            return Err(StoreError::BatchUpdateUnsupported(domain));
        }

        for (key, value) in &sections {
            domain.validate_section(key, value)?;
        }

        let keys: Vec<String> = sections.keys().cloned().collect();
        for (key, value) in sections {
            self.data.replace_section(&key, value);
        }
        self.dirty = true;

        info!(
            "event=batch_update module=store status=ok domain={} sections={}",
            domain.as_str(),
            keys.join(",")
        );
        Ok(self.flush())
    }

    /// Writes the current document to the slot, retrying per policy.
    pub fn flush(&mut self) -> PersistOutcome {
        let domain = self.domain();
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.repo.save(&self.data) {
                Ok(bytes) => {
                    self.dirty = false;
                    self.last_persist_error = None;
                    info!(
                        "event=slot_write module=store status=ok domain={} slot_key={} bytes={} attempt={}",
                        domain.as_str(),
                        domain.slot_key(),
                        bytes,
                        attempt
                    );
                    return PersistOutcome::Persisted {
                        bytes,
                        attempts: attempt,
                    };
                }
                Err(err) => {
                    warn!(
                        "event=slot_write module=store status=retry domain={} slot_key={} attempt={} error={}",
                        domain.as_str(),
                        domain.slot_key(),
                        attempt,
                        err
                    );
                    last_error = err.to_string();
                }
            }
        }

        error!(
            "event=slot_write module=store status=error domain={} slot_key={} attempts={} error_code=slot_write_failed error={}",
            domain.as_str(),
            domain.slot_key(),
            max_attempts,
            last_error
        );
        self.last_persist_error = Some(last_error.clone());
        PersistOutcome::Deferred {
            error: last_error,
            attempts: max_attempts,
        }
    }

    /// Explicit save action. Returns whether the slot write succeeded.
    pub fn save_data(&mut self) -> bool {
        if !self.is_loaded() {
            warn!(
                "event=slot_write module=store status=skipped domain={} reason=not_initialized",
                self.domain().as_str()
            );
            return false;
        }
        self.flush().is_persisted()
    }

    /// Discards overrides and persists the compiled-in default.
    pub fn reset_to_default(&mut self) -> Result<PersistOutcome, StoreError> {
        self.ensure_ready()?;
        let domain = self.domain();
        self.data = domain.default_document();
        self.dirty = true;
        info!(
            "event=store_reset module=store status=ok domain={}",
            domain.as_str()
        );
        Ok(self.flush())
    }

    fn ensure_ready(&self) -> Result<(), StoreError> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(StoreError::NotInitialized(self.domain()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PageContentStore, PersistPolicy, StoreError, StoreState};
    use crate::model::domain::PageDomain;
    use crate::repo::slot_repo::MemorySlotRepository;
    use serde_json::json;

    #[test]
    fn new_store_serves_defaults_before_initialization() {
        let store = PageContentStore::new(PageDomain::Teams, MemorySlotRepository::new());
        assert_eq!(store.state(), StoreState::Uninitialized);
        assert!(!store.is_loaded());
        assert_eq!(store.data(), &PageDomain::Teams.default_document());
    }

    #[test]
    fn mutations_require_initialization() {
        let mut store = PageContentStore::new(PageDomain::Teams, MemorySlotRepository::new());
        let err = store
            .update_section("hero", json!({ "title": "x" }))
            .unwrap_err();
        assert_eq!(err, StoreError::NotInitialized(PageDomain::Teams));
        assert!(!store.save_data());
    }

    #[test]
    fn zero_attempt_policy_still_writes_once() {
        let mut store = PageContentStore::new(PageDomain::Faculty, MemorySlotRepository::new())
            .with_policy(PersistPolicy { max_attempts: 0 });
        store.initialize();
        let outcome = store.flush();
        assert!(outcome.is_persisted());
    }

    #[test]
    fn edit_mode_is_a_plain_flag() {
        let mut store = PageContentStore::open(PageDomain::Faculty, MemorySlotRepository::new());
        assert!(!store.edit_mode());
        store.set_edit_mode(true);
        assert!(store.edit_mode());
        assert!(!store.has_unsaved_changes());
    }
}
