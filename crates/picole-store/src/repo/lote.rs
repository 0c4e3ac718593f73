use picole_core::model::{Lote, Record};
use picole_core::rules::validation::{optional_id, positive_quantity, require_id};
use rusqlite::{Connection, Row};

use super::common::{
    delete_row, in_transaction, logged, not_found, now, query_all, query_one, timestamp_at,
    to_millis,
};
use crate::errors::{translate_write, Result};

const ENTITY: &str = Lote::ENTITY;
const TABLE: &str = Lote::TABLE;
const SELECT: &str = "SELECT id, picole_fk, quantidade, data_criacao, data_atualizacao FROM lote";

/// SQLite repository for production batches
pub struct LoteRepo;

impl LoteRepo {
    /// # Errors
    /// `InvalidArgument` for a non-positive quantity, `MissingForeignKey`
    /// if the picolé does not exist.
    pub fn insert(conn: &Connection, picole_fk: i64, quantidade: i64) -> Result<Lote> {
        logged("lote_insert", TABLE, None, || {
            let picole_fk = require_id(ENTITY, "picole_fk", picole_fk)?;
            let quantidade = positive_quantity(ENTITY, "quantidade", quantidade)?;
            let ts = now();

            conn.execute(
                "INSERT INTO lote (picole_fk, quantidade, data_criacao, data_atualizacao)
                 VALUES (?1, ?2, ?3, ?3)",
                rusqlite::params![picole_fk, quantidade, to_millis(ts)],
            )
            .map_err(|e| translate_write(ENTITY, e, &[], &[("picole_fk", picole_fk)]))?;

            Ok(Lote {
                id: conn.last_insert_rowid(),
                picole_fk,
                quantidade,
                data_criacao: ts,
                data_atualizacao: ts,
            })
        })
    }

    pub fn select_all(conn: &Connection) -> Result<Vec<Lote>> {
        logged("lote_select_all", TABLE, None, || {
            query_all(conn, &format!("{} ORDER BY id", SELECT), [], read_row)
        })
    }

    pub fn select_by_id(conn: &Connection, id: i64) -> Result<Option<Lote>> {
        logged("lote_select_by_id", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            fetch(conn, id)
        })
    }

    pub fn select_by_picole(conn: &Connection, picole_fk: i64) -> Result<Vec<Lote>> {
        logged("lote_select_by_picole", TABLE, None, || {
            let picole_fk = require_id(ENTITY, "picole_fk", picole_fk)?;
            query_all(
                conn,
                &format!("{} WHERE picole_fk = ?1 ORDER BY id", SELECT),
                [picole_fk],
                read_row,
            )
        })
    }

    /// Partial update; `None` keeps the current value
    ///
    /// A supplied quantity is checked before the row is looked up, so a
    /// zero quantity fails the same way whether or not the id exists.
    ///
    /// # Errors
    /// `InvalidArgument` for a non-positive quantity, `NotFound` if the id
    /// is absent, `MissingForeignKey` if the new picolé does not exist.
    pub fn update(conn: &Connection, id: i64, picole_fk: Option<i64>, quantidade: Option<i64>) -> Result<Lote> {
        logged("lote_update", TABLE, Some(id), || {
            let quantidade = quantidade
                .map(|q| positive_quantity(ENTITY, "quantidade", q))
                .transpose()?;
            require_id(ENTITY, "id", id)?;
            let picole_fk = optional_id(ENTITY, "picole_fk", picole_fk)?;

            in_transaction(conn, |conn| {
                let mut lote = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                if let Some(picole_fk) = picole_fk {
                    lote.picole_fk = picole_fk;
                }
                if let Some(quantidade) = quantidade {
                    lote.quantidade = quantidade;
                }
                lote.data_atualizacao = now();

                conn.execute(
                    "UPDATE lote SET picole_fk = ?1, quantidade = ?2, data_atualizacao = ?3 WHERE id = ?4",
                    rusqlite::params![lote.picole_fk, lote.quantidade, to_millis(lote.data_atualizacao), id],
                )
                .map_err(|e| translate_write(ENTITY, e, &[], &[("picole_fk", lote.picole_fk)]))?;

                Ok(lote)
            })
        })
    }

    /// # Errors
    /// `NotFound` if absent, `StillReferenced` while an invoice lists it.
    pub fn delete(conn: &Connection, id: i64) -> Result<Lote> {
        logged("lote_delete", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            in_transaction(conn, |conn| {
                let existing = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                delete_row(conn, ENTITY, TABLE, id)?;
                Ok(existing)
            })
        })
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Lote>> {
    query_one(conn, &format!("{} WHERE id = ?1", SELECT), [id], read_row)
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<Lote> {
    Ok(Lote {
        id: row.get(0)?,
        picole_fk: row.get(1)?,
        quantidade: row.get(2)?,
        data_criacao: timestamp_at(row, 3)?,
        data_atualizacao: timestamp_at(row, 4)?,
    })
}
