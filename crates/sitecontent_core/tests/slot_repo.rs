use rusqlite::Connection;
use sitecontent_core::db::{open_db, open_db_in_memory};
use sitecontent_core::{RepoError, SlotRepository, SqliteSlotRepository};

#[test]
fn write_then_read_returns_payload() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert_eq!(repo.read_slot("careerPageContent:v1").unwrap(), None);
    repo.write_slot("careerPageContent:v1", r#"{"jobs":[]}"#)
        .unwrap();
    assert_eq!(
        repo.read_slot("careerPageContent:v1").unwrap().as_deref(),
        Some(r#"{"jobs":[]}"#)
    );
}

#[test]
fn write_replaces_existing_payload() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    repo.write_slot("teamsPageContent:v2", "{}").unwrap();
    repo.write_slot("teamsPageContent:v2", r#"{"hero":null}"#)
        .unwrap();

    let entries = repo.list_slots().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].byte_len, r#"{"hero":null}"#.len());
    assert!(entries[0].updated_at > 0);
}

#[test]
fn list_slots_is_sorted_and_delete_reports_presence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    repo.write_slot("teamsPageContent:v2", "{}").unwrap();
    repo.write_slot("careerPageContent:v1", "{}").unwrap();

    let keys: Vec<String> = repo
        .list_slots()
        .unwrap()
        .into_iter()
        .map(|entry| entry.slot_key)
        .collect();
    assert_eq!(keys, vec!["careerPageContent:v1", "teamsPageContent:v2"]);

    assert!(repo.delete_slot("careerPageContent:v1").unwrap());
    assert!(!repo.delete_slot("careerPageContent:v1").unwrap());
}

#[test]
fn slot_keys_are_trimmed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    repo.write_slot("  facultyPageContent:v1 ", "{}").unwrap();
    assert!(repo.read_slot("facultyPageContent:v1").unwrap().is_some());

    let err = repo.write_slot("", "{}").unwrap_err();
    assert!(matches!(err, RepoError::InvalidSlotKey(_)));
}

#[test]
fn slots_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSlotRepository::try_new(&conn).unwrap();
        repo.write_slot("achievementsPageContent:v1", r#"{"stats":[]}"#)
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    assert_eq!(
        repo.read_slot("achievementsPageContent:v1")
            .unwrap()
            .as_deref(),
        Some(r#"{"stats":[]}"#)
    );
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteSlotRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("content_slots")));
}
