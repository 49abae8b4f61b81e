//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into page-level content APIs.
//! - Keep UI/FFI layers decoupled from slot storage details.

pub mod page_store;
pub mod slot_maintenance;
