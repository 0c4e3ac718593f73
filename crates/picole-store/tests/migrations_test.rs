// Integration tests for schema bootstrap
// Covers migration idempotency and the drop-and-recreate reset

use picole_store::migrations::{apply_migrations, applied_migrations, reset_schema, DOMAIN_TABLES};
use picole_store::repo::SaborRepo;
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    picole_store::db::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_creates_every_domain_table() {
    // Given: An empty database
    let mut conn = setup_test_db();

    // When: Migrations are applied
    apply_migrations(&mut conn).unwrap();

    // Then: Every domain table plus schema_version exists
    let tables = get_table_names(&conn);
    for table in DOMAIN_TABLES {
        assert!(tables.iter().any(|t| t == table), "missing table {}", table);
    }
    assert!(tables.iter().any(|t| t == "schema_version"));
    assert_eq!(DOMAIN_TABLES.len(), 14);
}

#[test]
fn test_apply_migrations_twice_is_noop() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();
    SaborRepo::insert(&conn, "uva").unwrap();

    apply_migrations(&mut conn).unwrap();

    assert_eq!(applied_migrations(&conn).unwrap().len(), 1);
    assert_eq!(SaborRepo::select_all(&conn).unwrap().len(), 1, "data must survive");
}

#[test]
fn test_reset_schema_drops_all_rows() {
    // Given: A database with data
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();
    SaborRepo::insert(&conn, "uva").unwrap();

    // When: The schema is reset
    reset_schema(&mut conn).unwrap();

    // Then: Tables exist again but are empty, and ids restart
    assert!(SaborRepo::select_all(&conn).unwrap().is_empty());
    let sabor = SaborRepo::insert(&conn, "manga").unwrap();
    assert_eq!(sabor.id, 1);
    assert_eq!(applied_migrations(&conn).unwrap().len(), 1);
}

#[test]
fn test_reset_schema_on_empty_database() {
    let mut conn = setup_test_db();
    reset_schema(&mut conn).unwrap();
    assert_eq!(get_table_names(&conn).iter().filter(|t| t.as_str() != "sqlite_sequence").count(), 15);
}
