//! Repository for the single-column lookup tables
//!
//! Sabor, TipoPicole, TipoEmbalagem and Ingrediente differ only in table
//! name, so one generic repository serves them all.

use std::marker::PhantomData;

use picole_core::model::NamedLookup;
use picole_core::rules::validation::{normalize_required, require_id, NOME_MAX_LEN};
use rusqlite::{Connection, Row};

use super::common::{
    delete_row, in_transaction, logged, not_found, now, query_all, query_one, timestamp_at,
    to_millis,
};
use crate::errors::{translate_write, Result};

/// SQLite repository for a [`NamedLookup`] table
pub struct LookupRepo<T>(PhantomData<T>);

impl<T: NamedLookup> LookupRepo<T> {
    /// Insert a row with a trimmed, uppercased `nome`
    ///
    /// # Errors
    /// `MissingValue` for a blank name, `Duplicate` if the name is taken.
    pub fn insert(conn: &Connection, nome: &str) -> Result<T> {
        logged(&op::<T>("insert"), T::TABLE, None, || {
            let nome = normalize_required(T::ENTITY, "nome", nome, NOME_MAX_LEN)?;
            let ts = now();

            conn.execute(
                &format!(
                    "INSERT INTO {} (nome, data_criacao, data_atualizacao) VALUES (?1, ?2, ?2)",
                    T::TABLE
                ),
                rusqlite::params![nome, to_millis(ts)],
            )
            .map_err(|e| translate_write(T::ENTITY, e, &[("nome", nome.as_str())], &[]))?;

            Ok(T::from_parts(conn.last_insert_rowid(), nome, ts, ts))
        })
    }

    /// All rows ordered by id
    pub fn select_all(conn: &Connection) -> Result<Vec<T>> {
        logged(&op::<T>("select_all"), T::TABLE, None, || {
            query_all(
                conn,
                &format!("{} ORDER BY id", select_sql::<T>()),
                [],
                read_row::<T>,
            )
        })
    }

    /// # Errors
    /// `MissingValue` / `InvalidArgument` for a non-positive id.
    pub fn select_by_id(conn: &Connection, id: i64) -> Result<Option<T>> {
        logged(&op::<T>("select_by_id"), T::TABLE, Some(id), || {
            require_id(T::ENTITY, "id", id)?;
            fetch::<T>(conn, id)
        })
    }

    /// Exact match on the normalized name
    ///
    /// # Errors
    /// `MissingValue` for a blank name.
    pub fn select_by_nome(conn: &Connection, nome: &str) -> Result<Option<T>> {
        logged(&op::<T>("select_by_nome"), T::TABLE, None, || {
            let nome = normalize_required(T::ENTITY, "nome", nome, NOME_MAX_LEN)?;
            query_one(
                conn,
                &format!("{} WHERE nome = ?1", select_sql::<T>()),
                [nome],
                read_row::<T>,
            )
        })
    }

    /// Rename a row
    ///
    /// # Errors
    /// `NotFound` if the id is absent, `Duplicate` if the new name is taken.
    pub fn update(conn: &Connection, id: i64, nome: &str) -> Result<T> {
        logged(&op::<T>("update"), T::TABLE, Some(id), || {
            require_id(T::ENTITY, "id", id)?;
            let nome = normalize_required(T::ENTITY, "nome", nome, NOME_MAX_LEN)?;

            in_transaction(conn, |conn| {
                let existing = fetch::<T>(conn, id)?.ok_or_else(|| not_found(T::ENTITY, id))?;
                let updated = T::from_parts(id, nome, existing.data_criacao(), now());

                conn.execute(
                    &format!(
                        "UPDATE {} SET nome = ?1, data_atualizacao = ?2 WHERE id = ?3",
                        T::TABLE
                    ),
                    rusqlite::params![updated.nome(), to_millis(updated.data_atualizacao()), id],
                )
                .map_err(|e| translate_write(T::ENTITY, e, &[("nome", updated.nome())], &[]))?;

                Ok(updated)
            })
        })
    }

    /// Delete a row and return it
    ///
    /// # Errors
    /// `NotFound` if absent, `StillReferenced` while another table points at it.
    pub fn delete(conn: &Connection, id: i64) -> Result<T> {
        logged(&op::<T>("delete"), T::TABLE, Some(id), || {
            require_id(T::ENTITY, "id", id)?;
            in_transaction(conn, |conn| {
                let existing = fetch::<T>(conn, id)?.ok_or_else(|| not_found(T::ENTITY, id))?;
                delete_row(conn, T::ENTITY, T::TABLE, id)?;
                Ok(existing)
            })
        })
    }
}

fn op<T: NamedLookup>(action: &str) -> String {
    format!("{}_{}", T::TABLE, action)
}

fn select_sql<T: NamedLookup>() -> String {
    format!(
        "SELECT id, nome, data_criacao, data_atualizacao FROM {}",
        T::TABLE
    )
}

fn fetch<T: NamedLookup>(conn: &Connection, id: i64) -> Result<Option<T>> {
    query_one(
        conn,
        &format!("{} WHERE id = ?1", select_sql::<T>()),
        [id],
        read_row::<T>,
    )
}

fn read_row<T: NamedLookup>(row: &Row<'_>) -> rusqlite::Result<T> {
    Ok(T::from_parts(
        row.get(0)?,
        row.get(1)?,
        timestamp_at(row, 2)?,
        timestamp_at(row, 3)?,
    ))
}
