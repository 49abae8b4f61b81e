//! Flutter-facing bridge over `sitecontent_core` page stores.

pub mod api;
