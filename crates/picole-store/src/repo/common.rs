//! Shared repository plumbing: operation logging, timestamps, row queries,
//! transactions and delete translation

use std::time::Instant;

use chrono::{DateTime, Timelike, Utc};
use picole_core::errors::PicoleError;
use picole_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Params, Row};

use crate::dependents::tables_referencing;
use crate::errors::{classify_constraint, from_rusqlite, ConstraintViolation, Result};

/// Run one repository operation between start and end log events
pub(crate) fn logged<T>(
    op: &str,
    table: &'static str,
    record_id: Option<i64>,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    log_op_start!(op, table = table, record_id = record_id);
    let start = Instant::now();

    let result = f();
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms, table = table);
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = duration_ms, table = table);
        }
    }

    result
}

/// Current time truncated to the stored millisecond precision
pub(crate) fn now() -> DateTime<Utc> {
    let ts = Utc::now();
    ts.with_nanosecond(ts.timestamp_subsec_millis() * 1_000_000)
        .unwrap_or(ts)
}

/// Read a millisecond timestamp column
///
/// A value outside chrono's range fails the row mapping.
pub(crate) fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ms: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(ms).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp {} ms is out of range", ms).into(),
        )
    })
}

pub(crate) fn to_millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

/// Fetch at most one row
pub(crate) fn query_one<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Option<T>>
where
    P: Params,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
{
    conn.prepare_cached(sql)
        .map_err(from_rusqlite)?
        .query_row(params, map)
        .optional()
        .map_err(from_rusqlite)
}

/// Fetch every matching row
pub(crate) fn query_all<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare_cached(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(params, map)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

/// Run `f` atomically
///
/// Opens a transaction unless the caller already holds one, in which case
/// `f` joins it and the caller decides when to commit.
pub(crate) fn in_transaction<T>(
    conn: &Connection,
    f: impl FnOnce(&Connection) -> Result<T>,
) -> Result<T> {
    if !conn.is_autocommit() {
        return f(conn);
    }
    let tx = conn.unchecked_transaction().map_err(from_rusqlite)?;
    let value = f(&tx)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(value)
}

pub(crate) fn not_found(entity: &'static str, id: i64) -> PicoleError {
    PicoleError::NotFound { entity, id }
}

/// Delete one row by id, translating a foreign-key refusal into
/// `StillReferenced` with the tables that point at `table`
pub(crate) fn delete_row(conn: &Connection, entity: &'static str, table: &'static str, id: i64) -> Result<()> {
    conn.execute(&format!("DELETE FROM {} WHERE id = ?1", table), [id])
        .map(|_| ())
        .map_err(|err| match classify_constraint(&err) {
            Some(ConstraintViolation::ForeignKey) => {
                still_referenced(entity, id, &err, tables_referencing(conn, table))
            }
            Some(_) => PicoleError::Integrity {
                entity,
                message: err.to_string(),
            },
            None => from_rusqlite(err),
        })
}

/// Error for a delete refused by a foreign key
///
/// Falls back to `Integrity` when the referencing tables could not be read.
fn still_referenced(
    entity: &'static str,
    id: i64,
    err: &rusqlite::Error,
    dependents: Result<Vec<String>>,
) -> PicoleError {
    match dependents {
        Ok(tables) => PicoleError::StillReferenced { entity, id, tables },
        Err(lookup) => PicoleError::Integrity {
            entity,
            message: format!("{}; dependent tables unknown: {}", err, lookup),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_survives_millisecond_round_trip() {
        let conn = Connection::open_in_memory().unwrap();
        let ts = now();
        let back = conn
            .query_row("SELECT ?1", [to_millis(ts)], |row| timestamp_at(row, 0))
            .unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_out_of_range_timestamp_fails_row_mapping() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .query_row("SELECT ?1", [i64::MAX], |row| timestamp_at(row, 0))
            .unwrap_err();
        assert!(matches!(
            err,
            rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, _)
        ));
    }

    #[test]
    fn test_delete_refused_lists_referencing_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id INTEGER PRIMARY KEY);
             CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id INTEGER REFERENCES parent(id));
             INSERT INTO parent (id) VALUES (1);
             INSERT INTO child (id, parent_id) VALUES (1, 1);",
        )
        .unwrap();

        let err = delete_row(&conn, "Parent", "parent", 1).unwrap_err();
        assert_eq!(
            err,
            PicoleError::StillReferenced {
                entity: "Parent",
                id: 1,
                tables: vec!["child".to_string()]
            }
        );
    }

    #[test]
    fn test_failed_dependents_lookup_is_integrity_not_empty_list() {
        let fk = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            Some("FOREIGN KEY constraint failed".to_string()),
        );
        let lookup = Err(PicoleError::Persistence {
            op: "sqlite".to_string(),
            message: "no such table: sqlite_master".to_string(),
        });

        let err = still_referenced("Sabor", 4, &fk, lookup);

        match err {
            PicoleError::Integrity { entity, message } => {
                assert_eq!(entity, "Sabor");
                assert!(message.contains("FOREIGN KEY constraint failed"), "{}", message);
                assert!(message.contains("no such table"), "{}", message);
            }
            other => panic!("expected Integrity, got {:?}", other),
        }
    }

    #[test]
    fn test_in_transaction_joins_open_transaction() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (x INTEGER)").unwrap();

        let tx = conn.unchecked_transaction().unwrap();
        in_transaction(&tx, |c| {
            c.execute("INSERT INTO t (x) VALUES (1)", [])
                .map_err(from_rusqlite)?;
            Ok(())
        })
        .unwrap();
        drop(tx);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0, "outer rollback discards the joined work");
    }
}
