//! Process-wide slot database location.
//!
//! # Invariants
//! - Resolved once per process; later environment changes are ignored.
//! - Blank `SITECONTENT_DB_PATH` values fall back to the temp directory.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable overriding the slot database path.
pub const DB_PATH_ENV: &str = "SITECONTENT_DB_PATH";
/// File name used under the temp directory when no override is set.
pub const DB_FILE_NAME: &str = "sitecontent.sqlite3";

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Returns the slot database path shared by FFI and CLI callers.
pub fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| db_path_from(std::env::var(DB_PATH_ENV).ok().as_deref()))
        .clone()
}

fn db_path_from(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => PathBuf::from(trimmed),
        _ => std::env::temp_dir().join(DB_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::{db_path_from, resolve_db_path, DB_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn override_is_trimmed() {
        assert_eq!(
            db_path_from(Some("  /srv/site/content.db ")),
            PathBuf::from("/srv/site/content.db")
        );
    }

    #[test]
    fn blank_or_missing_override_uses_temp_dir() {
        let fallback = std::env::temp_dir().join(DB_FILE_NAME);
        assert_eq!(db_path_from(None), fallback);
        assert_eq!(db_path_from(Some("   ")), fallback);
    }

    #[test]
    fn resolution_is_stable_within_process() {
        assert_eq!(resolve_db_path(), resolve_db_path());
    }
}
