//! Core content logic for the institute site's editable pages.
//! This crate owns page content documents and their persistent slots.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::ContentDocument;
pub use model::domain::PageDomain;
pub use model::sections::{
    AchievementsSection, CareerSection, FacultySection, SectionError, TeamsSection,
};
pub use model::slot_key::SlotKey;
pub use repo::content_repo::{ContentRepository, LoadOutcome};
pub use repo::slot_repo::{
    MemorySlotRepository, RepoError, RepoResult, SlotEntry, SlotRepository, SqliteSlotRepository,
};
pub use service::page_store::{
    InitSource, PageContentStore, PersistOutcome, PersistPolicy, StoreError, StoreState,
};
pub use service::slot_maintenance::{
    classify_slot, SlotMaintenanceService, SlotReport, SlotStatus,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
