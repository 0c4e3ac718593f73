//! Repository for the many-to-many join tables
//!
//! Each join row stores two foreign keys and a unique `"{left}-{right}"`
//! key, recomputed whenever either side changes.

use std::marker::PhantomData;

use picole_core::model::{
    AditivoNutritivoPicole, Association, ConservantePicole, IngredientePicole, LoteNotaFiscal,
};
use picole_core::rules::validation::{optional_id, require_id};
use rusqlite::{Connection, Row};

use super::common::{
    delete_row, in_transaction, logged, not_found, now, query_all, query_one, timestamp_at,
    to_millis,
};
use crate::errors::{translate_write, Result};

/// SQLite repository for an [`Association`] table
pub struct AssociationRepo<T>(PhantomData<T>);

impl<T: Association> AssociationRepo<T> {
    /// Link two rows
    ///
    /// # Errors
    /// `MissingForeignKey` if either side does not exist, `Duplicate` if the
    /// pair is already linked.
    pub fn insert(conn: &Connection, left: i64, right: i64) -> Result<T> {
        logged(&op::<T>("insert"), T::TABLE, None, || {
            let left = require_id(T::ENTITY, T::LEFT_COLUMN, left)?;
            let right = require_id(T::ENTITY, T::RIGHT_COLUMN, right)?;
            let key = T::natural_key(left, right);
            let ts = now();

            conn.execute(
                &format!(
                    "INSERT INTO {} ({}, {}, {}, data_criacao, data_atualizacao)
                     VALUES (?1, ?2, ?3, ?4, ?4)",
                    T::TABLE,
                    T::LEFT_COLUMN,
                    T::RIGHT_COLUMN,
                    T::KEY_COLUMN
                ),
                rusqlite::params![left, right, key, to_millis(ts)],
            )
            .map_err(|e| write_error::<T>(e, left, right, &key))?;

            Ok(T::from_parts(conn.last_insert_rowid(), left, right, key, ts, ts))
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

    /// Rows whose first key column equals `left`
    pub fn select_by_left(conn: &Connection, left: i64) -> Result<Vec<T>> {
        logged(&op::<T>("select_by_left"), T::TABLE, None, || {
            select_by_column::<T>(conn, T::LEFT_COLUMN, left)
        })
    }

    /// Rows whose second key column equals `right`
    pub fn select_by_right(conn: &Connection, right: i64) -> Result<Vec<T>> {
        logged(&op::<T>("select_by_right"), T::TABLE, None, || {
            select_by_column::<T>(conn, T::RIGHT_COLUMN, right)
        })
    }

    /// Repoint one or both sides of a link; `None` keeps the current value
    ///
    /// # Errors
    /// `NotFound` if the id is absent, `MissingForeignKey` / `Duplicate` as
    /// for insert.
    pub fn update(conn: &Connection, id: i64, left: Option<i64>, right: Option<i64>) -> Result<T> {
        logged(&op::<T>("update"), T::TABLE, Some(id), || {
            require_id(T::ENTITY, "id", id)?;
            let left = optional_id(T::ENTITY, T::LEFT_COLUMN, left)?;
            let right = optional_id(T::ENTITY, T::RIGHT_COLUMN, right)?;

            in_transaction(conn, |conn| {
                let existing = fetch::<T>(conn, id)?.ok_or_else(|| not_found(T::ENTITY, id))?;
                let left = left.unwrap_or_else(|| existing.left());
                let right = right.unwrap_or_else(|| existing.right());
                let key = T::natural_key(left, right);
                let ts = now();

                conn.execute(
                    &format!(
                        "UPDATE {} SET {} = ?1, {} = ?2, {} = ?3, data_atualizacao = ?4 WHERE id = ?5",
                        T::TABLE,
                        T::LEFT_COLUMN,
                        T::RIGHT_COLUMN,
                        T::KEY_COLUMN
                    ),
                    rusqlite::params![left, right, key, to_millis(ts), id],
                )
                .map_err(|e| write_error::<T>(e, left, right, &key))?;

                Ok(T::from_parts(id, left, right, key, existing.data_criacao(), ts))
            })
        })
    }

    /// Unlink and return the removed row
    ///
    /// # Errors
    /// `NotFound` if the id is absent.
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

impl AssociationRepo<LoteNotaFiscal> {
    pub fn select_by_lote(conn: &Connection, lote_fk: i64) -> Result<Vec<LoteNotaFiscal>> {
        Self::select_by_left(conn, lote_fk)
    }

    pub fn select_by_nota_fiscal(conn: &Connection, nota_fiscal_fk: i64) -> Result<Vec<LoteNotaFiscal>> {
        Self::select_by_right(conn, nota_fiscal_fk)
    }
}

impl AssociationRepo<IngredientePicole> {
    pub fn select_by_ingrediente(conn: &Connection, ingrediente_fk: i64) -> Result<Vec<IngredientePicole>> {
        Self::select_by_left(conn, ingrediente_fk)
    }

    pub fn select_by_picole(conn: &Connection, picole_fk: i64) -> Result<Vec<IngredientePicole>> {
        Self::select_by_right(conn, picole_fk)
    }
}

impl AssociationRepo<ConservantePicole> {
    pub fn select_by_conservante(conn: &Connection, conservante_fk: i64) -> Result<Vec<ConservantePicole>> {
        Self::select_by_left(conn, conservante_fk)
    }

    pub fn select_by_picole(conn: &Connection, picole_fk: i64) -> Result<Vec<ConservantePicole>> {
        Self::select_by_right(conn, picole_fk)
    }
}

impl AssociationRepo<AditivoNutritivoPicole> {
    pub fn select_by_picole(conn: &Connection, picole_fk: i64) -> Result<Vec<AditivoNutritivoPicole>> {
        Self::select_by_left(conn, picole_fk)
    }

    pub fn select_by_aditivo_nutritivo(
        conn: &Connection,
        aditivo_nutritivo_fk: i64,
    ) -> Result<Vec<AditivoNutritivoPicole>> {
        Self::select_by_right(conn, aditivo_nutritivo_fk)
    }
}

fn op<T: Association>(action: &str) -> String {
    format!("{}_{}", T::TABLE, action)
}

fn select_sql<T: Association>() -> String {
    format!(
        "SELECT id, {}, {}, {}, data_criacao, data_atualizacao FROM {}",
        T::LEFT_COLUMN,
        T::RIGHT_COLUMN,
        T::KEY_COLUMN,
        T::TABLE
    )
}

fn fetch<T: Association>(conn: &Connection, id: i64) -> Result<Option<T>> {
    query_one(
        conn,
        &format!("{} WHERE id = ?1", select_sql::<T>()),
        [id],
        read_row::<T>,
    )
}

fn select_by_column<T: Association>(conn: &Connection, column: &'static str, value: i64) -> Result<Vec<T>> {
    let value = require_id(T::ENTITY, column, value)?;
    query_all(
        conn,
        &format!("{} WHERE {} = ?1 ORDER BY id", select_sql::<T>(), column),
        [value],
        read_row::<T>,
    )
}

fn write_error<T: Association>(err: rusqlite::Error, left: i64, right: i64, key: &str) -> picole_core::PicoleError {
    translate_write(
        T::ENTITY,
        err,
        &[(T::KEY_COLUMN, key)],
        &[(T::LEFT_COLUMN, left), (T::RIGHT_COLUMN, right)],
    )
}

fn read_row<T: Association>(row: &Row<'_>) -> rusqlite::Result<T> {
    Ok(T::from_parts(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        timestamp_at(row, 4)?,
        timestamp_at(row, 5)?,
    ))
}
