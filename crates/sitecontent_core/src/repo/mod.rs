//! Repository layer over persistent content slots.
//!
//! # Responsibility
//! - Define the raw key-value slot contract and its implementations.
//! - Bind a page domain to its slot and own document encoding.
//!
//! # Invariants
//! - Slot keys are non-empty and trimmed before persistence.
//! - Repository APIs return semantic errors (`InvalidSlotKey`,
//!   `QuotaExceeded`) in addition to DB transport errors.

pub mod content_repo;
pub mod slot_repo;
