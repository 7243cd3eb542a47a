use rusqlite::{params, Connection};
use stickywall_core::db::migrations::latest_version;
use stickywall_core::db::{open_db, open_db_in_memory, DbError};
use stickywall_core::{BoardStorage, NoteDraft, NoteService, SqliteBoardStorage, SqliteNoteRepository};

#[test]
fn fresh_database_has_both_stores() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), latest_version());
    for table in ["notes", "local_storage"] {
        assert!(has_table(&conn, table), "missing table {table}");
    }
}

#[test]
fn notes_written_before_the_board_table_existed_survive_the_upgrade() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sticky_wall.sqlite3");

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(include_str!("../src/db/migrations/0001_notes.sql"))
            .unwrap();
        conn.execute_batch("PRAGMA user_version = 1;").unwrap();
        conn.execute(
            "INSERT INTO notes (id, author, content, color, created_at, updated_at)
             VALUES (?1, NULL, 'kept', NULL, 5, 5);",
            params!["7d1c5a5e-4c1b-4c55-9a9e-2f9a4b5a1d10"],
        )
        .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn), latest_version());
    assert!(has_table(&conn, "local_storage"));

    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let notes = service.list_notes().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "kept");
}

#[test]
fn server_notes_and_board_items_can_share_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());
        service.create_note(NoteDraft::with_content("server")).unwrap();
    }
    {
        let mut storage = SqliteBoardStorage::open(&path).unwrap();
        storage.set_item("notes", "[]").unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn), latest_version());
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    assert_eq!(service.list_notes().unwrap().len(), 1);
    let storage = SqliteBoardStorage::from_connection(conn);
    assert_eq!(storage.get_item("notes").unwrap().as_deref(), Some("[]"));
}

#[test]
fn file_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn notes_table_rejects_empty_content_at_the_schema_level() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO notes (id, content, created_at, updated_at) VALUES ('x', '', 0, 0);",
        [],
    );
    assert!(result.is_err());
}

fn user_version(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

fn has_table(conn: &Connection, table_name: &str) -> bool {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        [table_name],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        == 1
}
