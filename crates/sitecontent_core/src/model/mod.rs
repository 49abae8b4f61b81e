//! Content model for editable page domains.
//!
//! # Responsibility
//! - Define the document shape shared by every page domain.
//! - Bind each domain to its slot key, section keys and compiled-in defaults.
//!
//! # Invariants
//! - A `ContentDocument` carries exactly its domain's section keys.
//! - Section payloads are validated against a concrete schema before they
//!   replace stored content.

pub mod document;
pub mod domain;
pub mod sections;
pub mod slot_key;
