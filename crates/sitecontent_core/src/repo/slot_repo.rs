//! Slot repository contracts, SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Store one serialized payload per slot key.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `write_slot` is an upsert that refreshes `updated_at`.
//! - Slot listings are sorted by key.

use crate::db::DbError;
use rusqlite::{params, Connection};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot persistence and document encoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidSlotKey(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Payload would exceed the store's byte quota.
    QuotaExceeded {
        slot_key: String,
        needed: usize,
        available: usize,
    },
    /// Backing store is disabled or unreachable.
    Unavailable(String),
    Serialization(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidSlotKey(key) => write!(f, "invalid slot key: `{key}`"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::QuotaExceeded {
                slot_key,
                needed,
                available,
            } => write!(
                f,
                "quota exceeded writing `{slot_key}`: needed {needed} bytes, {available} available"
            ),
            Self::Unavailable(reason) => write!(f, "slot storage unavailable: {reason}"),
            Self::Serialization(err) => write!(f, "content serialization failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Metadata for one stored slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEntry {
    pub slot_key: String,
    /// Payload size in bytes.
    pub byte_len: usize,
    /// Last write time in epoch milliseconds.
    pub updated_at: i64,
}

/// Persistent key-value slot contract.
pub trait SlotRepository {
    /// Returns the raw payload, or `None` when the slot is absent.
    fn read_slot(&self, slot_key: &str) -> RepoResult<Option<String>>;
    /// Creates or replaces the slot payload.
    fn write_slot(&self, slot_key: &str, payload: &str) -> RepoResult<()>;
    /// Removes the slot. Returns whether a slot existed.
    fn delete_slot(&self, slot_key: &str) -> RepoResult<bool>;
    /// Lists stored slots sorted by key.
    fn list_slots(&self) -> RepoResult<Vec<SlotEntry>>;
}

impl<T: SlotRepository + ?Sized> SlotRepository for &T {
    fn read_slot(&self, slot_key: &str) -> RepoResult<Option<String>> {
        (**self).read_slot(slot_key)
    }

    fn write_slot(&self, slot_key: &str, payload: &str) -> RepoResult<()> {
        (**self).write_slot(slot_key, payload)
    }

    fn delete_slot(&self, slot_key: &str) -> RepoResult<bool> {
        (**self).delete_slot(slot_key)
    }

    fn list_slots(&self) -> RepoResult<Vec<SlotEntry>> {
        (**self).list_slots()
    }
}

/// Validates and trims one slot key.
pub fn normalize_slot_key(slot_key: &str) -> RepoResult<&str> {
    let trimmed = slot_key.trim();
    if trimmed.is_empty() {
        return Err(RepoError::InvalidSlotKey(slot_key.to_string()));
    }
    Ok(trimmed)
}

/// SQLite-backed slot repository.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_slot_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, slot_key: &str) -> RepoResult<Option<String>> {
        let slot_key = normalize_slot_key(slot_key)?;
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM content_slots WHERE slot_key = ?1;")?;
        let mut rows = stmt.query([slot_key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get("payload")?));
        }
        Ok(None)
    }

    fn write_slot(&self, slot_key: &str, payload: &str) -> RepoResult<()> {
        let slot_key = normalize_slot_key(slot_key)?;
        self.conn.execute(
            "INSERT INTO content_slots (slot_key, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(slot_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![slot_key, payload],
        )?;
        Ok(())
    }

    fn delete_slot(&self, slot_key: &str) -> RepoResult<bool> {
        let slot_key = normalize_slot_key(slot_key)?;
        let changed = self
            .conn
            .execute("DELETE FROM content_slots WHERE slot_key = ?1;", [slot_key])?;
        Ok(changed > 0)
    }

    fn list_slots(&self) -> RepoResult<Vec<SlotEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT slot_key, length(CAST(payload AS BLOB)) AS byte_len, updated_at
             FROM content_slots
             ORDER BY slot_key ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let byte_len: i64 = row.get("byte_len")?;
            entries.push(SlotEntry {
                slot_key: row.get("slot_key")?,
                byte_len: usize::try_from(byte_len).unwrap_or_default(),
                updated_at: row.get("updated_at")?,
            });
        }
        Ok(entries)
    }
}

/// In-process slot repository.
///
/// Mirrors a browser-local store: optional byte quota across all slots and
/// a switch that makes every call fail as if storage were disabled.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    slots: RefCell<BTreeMap<String, (String, i64)>>,
    quota_bytes: Option<usize>,
    disabled: Cell<bool>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits total payload bytes across all slots.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Enables or disables the backing store.
    pub fn set_available(&self, available: bool) {
        self.disabled.set(!available);
    }

    fn ensure_available(&self) -> RepoResult<()> {
        if self.disabled.get() {
            return Err(RepoError::Unavailable("storage disabled".to_string()));
        }
        Ok(())
    }
}

impl SlotRepository for MemorySlotRepository {
    fn read_slot(&self, slot_key: &str) -> RepoResult<Option<String>> {
        self.ensure_available()?;
        let slot_key = normalize_slot_key(slot_key)?;
        Ok(self
            .slots
            .borrow()
            .get(slot_key)
            .map(|(payload, _)| payload.clone()))
    }

    fn write_slot(&self, slot_key: &str, payload: &str) -> RepoResult<()> {
        self.ensure_available()?;
        let slot_key = normalize_slot_key(slot_key)?;
        let mut slots = self.slots.borrow_mut();

        if let Some(quota) = self.quota_bytes {
            let used_elsewhere: usize = slots
                .iter()
                .filter(|(key, _)| key.as_str() != slot_key)
                .map(|(_, (existing, _))| existing.len())
                .sum();
            let available = quota.saturating_sub(used_elsewhere);
            if payload.len() > available {
                return Err(RepoError::QuotaExceeded {
                    slot_key: slot_key.to_string(),
                    needed: payload.len(),
                    available,
                });
            }
        }

        slots.insert(slot_key.to_string(), (payload.to_string(), now_epoch_ms()));
        Ok(())
    }

    fn delete_slot(&self, slot_key: &str) -> RepoResult<bool> {
        self.ensure_available()?;
        let slot_key = normalize_slot_key(slot_key)?;
        Ok(self.slots.borrow_mut().remove(slot_key).is_some())
    }

    fn list_slots(&self) -> RepoResult<Vec<SlotEntry>> {
        self.ensure_available()?;
        Ok(self
            .slots
            .borrow()
            .iter()
            .map(|(key, (payload, updated_at))| SlotEntry {
                slot_key: key.clone(),
                byte_len: payload.len(),
                updated_at: *updated_at,
            })
            .collect())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

fn ensure_slot_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "content_slots")? {
        return Err(RepoError::MissingRequiredTable("content_slots"));
    }

    for column in ["slot_key", "payload", "updated_at"] {
        if !table_has_column(conn, "content_slots", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "content_slots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
