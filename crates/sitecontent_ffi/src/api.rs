//! FFI use-case API for page content editing.
//!
//! # Responsibility
//! - Expose page store operations to the UI shell via FRB.
//! - Flatten core results into simple envelopes with JSON payloads.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each call opens its own store; every mutation is persisted before the
//!   call returns, so no store state is kept between calls.

use log::warn;
use serde_json::{Map, Value};
use sitecontent_core::db::{open_db, resolve_db_path};
use sitecontent_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    PageContentStore, PageDomain, PersistOutcome, SlotMaintenanceService, SlotStatus,
    SqliteSlotRepository,
};

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Page content envelope returned by every page operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContentResponse {
    /// Whether the requested operation was accepted.
    pub ok: bool,
    /// Normalized domain name (`achievements|career|faculty|teams`).
    pub domain: String,
    /// Current document serialized as a JSON object; empty on failure.
    pub data_json: String,
    /// Whether the store finished initialization.
    pub is_loaded: bool,
    /// Whether the edit was kept in memory only because the slot write failed.
    pub unsaved: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl PageContentResponse {
    fn failure(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            domain: domain.into(),
            data_json: String::new(),
            is_loaded: false,
            unsaved: false,
            message: message.into(),
        }
    }
}

/// Stored slot metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSlotItem {
    pub slot_key: String,
    pub byte_len: u64,
    pub updated_at: i64,
    /// `current|orphaned|unrecognized`.
    pub status: String,
}

/// Slot maintenance envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSlotsResponse {
    pub ok: bool,
    pub items: Vec<ContentSlotItem>,
    pub message: String,
}

/// Loads one page document, seeding defaults on first use.
#[flutter_rust_bridge::frb(sync)]
pub fn page_content_load(domain: String) -> PageContentResponse {
    with_page_store(&domain, |_| Ok("Loaded.".to_string()))
}

/// Replaces one section with a JSON payload and persists the page.
#[flutter_rust_bridge::frb(sync)]
pub fn page_content_update_section(
    domain: String,
    section: String,
    value_json: String,
) -> PageContentResponse {
    let value = match serde_json::from_str::<Value>(&value_json) {
        Ok(value) => value,
        Err(err) => {
            return PageContentResponse::failure(
                domain.trim(),
                format!("page_content_update_section failed: invalid JSON: {err}"),
            );
        }
    };
    with_page_store(&domain, |store| {
        store
            .update_section(section.trim(), value)
            .map(|outcome| outcome_message("Section updated.", &outcome))
            .map_err(|err| err.to_string())
    })
}

/// Replaces several sections from one JSON object and persists once.
#[flutter_rust_bridge::frb(sync)]
pub fn page_content_update_multiple(domain: String, sections_json: String) -> PageContentResponse {
    let sections = match serde_json::from_str::<Map<String, Value>>(&sections_json) {
        Ok(sections) => sections,
        Err(err) => {
            return PageContentResponse::failure(
                domain.trim(),
                format!("page_content_update_multiple failed: expected JSON object: {err}"),
            );
        }
    };
    with_page_store(&domain, |store| {
        store
            .update_multiple(sections)
            .map(|outcome| outcome_message("Sections updated.", &outcome))
            .map_err(|err| err.to_string())
    })
}

/// Re-writes the stored page document. Returns whether the write succeeded.
#[flutter_rust_bridge::frb(sync)]
pub fn page_content_save(domain: String) -> bool {
    let response = with_page_store(&domain, |store| {
        if store.save_data() {
            Ok("Saved.".to_string())
        } else {
            Err(store
                .last_persist_error()
                .unwrap_or("save failed")
                .to_string())
        }
    });
    response.ok
}

/// Restores compiled-in defaults for one page and persists them.
#[flutter_rust_bridge::frb(sync)]
pub fn page_content_reset(domain: String) -> PageContentResponse {
    with_page_store(&domain, |store| {
        store
            .reset_to_default()
            .map(|outcome| outcome_message("Reset to defaults.", &outcome))
            .map_err(|err| err.to_string())
    })
}

/// Lists stored slots with their classification.
#[flutter_rust_bridge::frb(sync)]
pub fn content_slots_list() -> ContentSlotsResponse {
    let result = with_maintenance(|service| service.inventory().map_err(|err| err.to_string()));
    match result {
        Ok(reports) => {
            let items: Vec<ContentSlotItem> = reports
                .into_iter()
                .map(|report| ContentSlotItem {
                    slot_key: report.entry.slot_key,
                    byte_len: report.entry.byte_len as u64,
                    updated_at: report.entry.updated_at,
                    status: slot_status_label(report.status).to_string(),
                })
                .collect();
            let message = format!("Found {} slot(s).", items.len());
            ContentSlotsResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => ContentSlotsResponse {
            ok: false,
            items: Vec::new(),
            message: format!("content_slots_list failed: {err}"),
        },
    }
}

/// Deletes slots left behind by slot key version bumps.
#[flutter_rust_bridge::frb(sync)]
pub fn content_slots_purge_orphans() -> ContentSlotsResponse {
    let result = with_maintenance(|service| service.purge_orphans().map_err(|err| err.to_string()));
    match result {
        Ok(purged) => ContentSlotsResponse {
            ok: true,
            message: format!("Purged {} slot(s).", purged.len()),
            items: purged
                .into_iter()
                .map(|slot_key| ContentSlotItem {
                    slot_key,
                    byte_len: 0,
                    updated_at: 0,
                    status: "orphaned".to_string(),
                })
                .collect(),
        },
        Err(err) => ContentSlotsResponse {
            ok: false,
            items: Vec::new(),
            message: format!("content_slots_purge_orphans failed: {err}"),
        },
    }
}

fn with_page_store(
    domain: &str,
    f: impl FnOnce(&mut PageContentStore<SqliteSlotRepository<'_>>) -> Result<String, String>,
) -> PageContentResponse {
    let Some(page) = PageDomain::parse(domain) else {
        return PageContentResponse::failure(
            domain.trim(),
            format!("unknown page domain `{}`", domain.trim()),
        );
    };

    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            return PageContentResponse::failure(
                page.as_str(),
                format!("content DB open failed: {err}"),
            );
        }
    };
    let slots = match SqliteSlotRepository::try_new(&conn) {
        Ok(slots) => slots,
        Err(err) => {
            return PageContentResponse::failure(
                page.as_str(),
                format!("content repo init failed: {err}"),
            );
        }
    };

    let mut store = PageContentStore::open(page, slots);
    let (ok, message) = match f(&mut store) {
        Ok(message) => (true, message),
        Err(message) => (false, message),
    };

    let data_json = match store.data().to_json_string() {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                "event=ffi_response module=ffi status=error domain={} error={}",
                page.as_str(),
                err
            );
            String::new()
        }
    };

    PageContentResponse {
        ok,
        domain: page.as_str().to_string(),
        data_json,
        is_loaded: store.is_loaded(),
        unsaved: store.has_unsaved_changes(),
        message,
    }
}

fn with_maintenance<T>(
    f: impl FnOnce(&SlotMaintenanceService<SqliteSlotRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("content DB open failed: {err}"))?;
    let slots = SqliteSlotRepository::try_new(&conn)
        .map_err(|err| format!("content repo init failed: {err}"))?;
    f(&SlotMaintenanceService::new(slots))
}

fn outcome_message(success: &str, outcome: &PersistOutcome) -> String {
    match outcome {
        PersistOutcome::Persisted { .. } => success.to_string(),
        PersistOutcome::Deferred { error, .. } => {
            format!("{success} Not saved to storage: {error}")
        }
    }
}

fn slot_status_label(status: SlotStatus) -> &'static str {
    match status {
        SlotStatus::Current(_) => "current",
        SlotStatus::Orphaned { .. } => "orphaned",
        SlotStatus::Unrecognized => "unrecognized",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        content_slots_list, core_version, init_logging, page_content_load, page_content_reset,
        page_content_save, page_content_update_multiple, page_content_update_section, ping,
    };
    use serde_json::Value;

    fn parse_data(raw: &str) -> Value {
        serde_json::from_str(raw).expect("data_json should be a JSON object")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_log_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn load_returns_all_sections() {
        let response = page_content_load(" Faculty ".to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.domain, "faculty");
        assert!(response.is_loaded);
        let data = parse_data(&response.data_json);
        for key in ["hero", "filters", "faculty"] {
            assert!(data.get(key).is_some(), "missing section {key}");
        }
        assert!(page_content_save("faculty".to_string()));
    }

    #[test]
    fn update_section_persists_across_calls() {
        let response = page_content_update_section(
            "teams".to_string(),
            "hero".to_string(),
            r#"{"title":"Meet The Team"}"#.to_string(),
        );
        assert!(response.ok, "{}", response.message);

        let reloaded = page_content_load("teams".to_string());
        assert_eq!(
            parse_data(&reloaded.data_json)["hero"]["title"],
            "Meet The Team"
        );
    }

    #[test]
    fn update_section_rejects_unknown_section_and_bad_json() {
        let unknown = page_content_update_section(
            "career".to_string(),
            "quizzes".to_string(),
            "[]".to_string(),
        );
        assert!(!unknown.ok);
        assert!(unknown.message.contains("unknown section"));

        let bad_json = page_content_update_section(
            "career".to_string(),
            "hero".to_string(),
            "{".to_string(),
        );
        assert!(!bad_json.ok);
        assert!(bad_json.message.contains("invalid JSON"));
    }

    #[test]
    fn update_multiple_is_limited_to_career() {
        let career = page_content_update_multiple(
            "career".to_string(),
            r#"{"jobs":[{"id":1,"title":"Analyst"}]}"#.to_string(),
        );
        assert!(career.ok, "{}", career.message);
        assert_eq!(parse_data(&career.data_json)["jobs"][0]["title"], "Analyst");

        let faculty =
            page_content_update_multiple("faculty".to_string(), r#"{"hero":{"title":"x"}}"#.to_string());
        assert!(!faculty.ok);
    }

    #[test]
    fn reset_restores_defaults() {
        let edited = page_content_update_section(
            "achievements".to_string(),
            "stats".to_string(),
            "[]".to_string(),
        );
        assert!(edited.ok, "{}", edited.message);

        let reset = page_content_reset("achievements".to_string());
        assert!(reset.ok, "{}", reset.message);
        assert!(!parse_data(&reset.data_json)["stats"]
            .as_array()
            .expect("stats should be a list")
            .is_empty());
    }

    #[test]
    fn unknown_domain_is_rejected() {
        let response = page_content_load("blog".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("unknown page domain"));
        assert!(!page_content_save("blog".to_string()));
    }

    #[test]
    fn slot_listing_succeeds() {
        let _ = page_content_load("faculty".to_string());
        let response = content_slots_list();
        assert!(response.ok, "{}", response.message);
        assert!(response
            .items
            .iter()
            .any(|item| item.slot_key == "facultyPageContent:v1" && item.status == "current"));
    }
}
