use picole_core::model::{Picole, Record};
use picole_core::rules::natural_key::picole_key;
use picole_core::rules::validation::{money, optional_id, optional_money, require_id};
use picole_core::PicoleError;
use rusqlite::{Connection, Row};

use super::common::{
    delete_row, in_transaction, logged, not_found, now, query_all, query_one, timestamp_at,
    to_millis,
};
use crate::errors::{translate_write, Result};

const ENTITY: &str = Picole::ENTITY;
const TABLE: &str = Picole::TABLE;
const KEY_COLUMN: &str = "sabor_tipo_picole_tipo_embalagem";
const SELECT: &str = "SELECT id, preco, sabor_fk, tipo_embalagem_fk, tipo_picole_fk,
                             sabor_tipo_picole_tipo_embalagem, data_criacao, data_atualizacao
                      FROM picole";

/// Fields of a picolé update; `None` keeps the current value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PicoleChanges {
    pub preco: Option<f64>,
    pub sabor_fk: Option<i64>,
    pub tipo_embalagem_fk: Option<i64>,
    pub tipo_picole_fk: Option<i64>,
}

/// SQLite repository for picolés
///
/// The flavor/kind/packaging combination is unique; the composite key is
/// rebuilt on every write.
pub struct PicoleRepo;

impl PicoleRepo {
    /// # Errors
    /// `InvalidArgument` for a negative or non-finite price or bad id,
    /// `MissingForeignKey` if a referenced row is absent, `Duplicate` if the
    /// combination already exists.
    pub fn insert(
        conn: &Connection,
        preco: f64,
        sabor_fk: i64,
        tipo_embalagem_fk: i64,
        tipo_picole_fk: i64,
    ) -> Result<Picole> {
        logged("picole_insert", TABLE, None, || {
            let preco = money(ENTITY, "preco", preco)?;
            let sabor_fk = require_id(ENTITY, "sabor_fk", sabor_fk)?;
            let tipo_embalagem_fk = require_id(ENTITY, "tipo_embalagem_fk", tipo_embalagem_fk)?;
            let tipo_picole_fk = require_id(ENTITY, "tipo_picole_fk", tipo_picole_fk)?;
            let ts = now();

            let mut picole = Picole {
                id: 0,
                preco,
                sabor_fk,
                tipo_embalagem_fk,
                tipo_picole_fk,
                sabor_tipo_picole_tipo_embalagem: picole_key(sabor_fk, tipo_picole_fk, tipo_embalagem_fk),
                data_criacao: ts,
                data_atualizacao: ts,
            };

            conn.execute(
                "INSERT INTO picole (preco, sabor_fk, tipo_embalagem_fk, tipo_picole_fk,
                                     sabor_tipo_picole_tipo_embalagem, data_criacao, data_atualizacao)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                rusqlite::params![
                    picole.preco,
                    picole.sabor_fk,
                    picole.tipo_embalagem_fk,
                    picole.tipo_picole_fk,
                    picole.sabor_tipo_picole_tipo_embalagem,
                    to_millis(ts)
                ],
            )
            .map_err(|e| write_error(e, &picole))?;

            picole.id = conn.last_insert_rowid();
            Ok(picole)
        })
    }

    pub fn select_all(conn: &Connection) -> Result<Vec<Picole>> {
        logged("picole_select_all", TABLE, None, || {
            query_all(conn, &format!("{} ORDER BY id", SELECT), [], read_row)
        })
    }

    pub fn select_by_id(conn: &Connection, id: i64) -> Result<Option<Picole>> {
        logged("picole_select_by_id", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            fetch(conn, id)
        })
    }

    pub fn select_by_sabor(conn: &Connection, sabor_fk: i64) -> Result<Vec<Picole>> {
        logged("picole_select_by_sabor", TABLE, None, || {
            select_by_column(conn, "sabor_fk", sabor_fk)
        })
    }

    pub fn select_by_tipo_embalagem(conn: &Connection, tipo_embalagem_fk: i64) -> Result<Vec<Picole>> {
        logged("picole_select_by_tipo_embalagem", TABLE, None, || {
            select_by_column(conn, "tipo_embalagem_fk", tipo_embalagem_fk)
        })
    }

    pub fn select_by_tipo_picole(conn: &Connection, tipo_picole_fk: i64) -> Result<Vec<Picole>> {
        logged("picole_select_by_tipo_picole", TABLE, None, || {
            select_by_column(conn, "tipo_picole_fk", tipo_picole_fk)
        })
    }

    /// # Errors
    /// `NotFound` if the id is absent, otherwise as for insert.
    pub fn update(conn: &Connection, id: i64, changes: PicoleChanges) -> Result<Picole> {
        logged("picole_update", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            let preco = optional_money(ENTITY, "preco", changes.preco)?;
            let sabor_fk = optional_id(ENTITY, "sabor_fk", changes.sabor_fk)?;
            let tipo_embalagem_fk = optional_id(ENTITY, "tipo_embalagem_fk", changes.tipo_embalagem_fk)?;
            let tipo_picole_fk = optional_id(ENTITY, "tipo_picole_fk", changes.tipo_picole_fk)?;

            in_transaction(conn, |conn| {
                let mut picole = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                if let Some(preco) = preco {
                    picole.preco = preco;
                }
                if let Some(sabor_fk) = sabor_fk {
                    picole.sabor_fk = sabor_fk;
                }
                if let Some(tipo_embalagem_fk) = tipo_embalagem_fk {
                    picole.tipo_embalagem_fk = tipo_embalagem_fk;
                }
                if let Some(tipo_picole_fk) = tipo_picole_fk {
                    picole.tipo_picole_fk = tipo_picole_fk;
                }
                picole.refresh_composite_key();
                picole.data_atualizacao = now();

                conn.execute(
                    "UPDATE picole
                     SET preco = ?1, sabor_fk = ?2, tipo_embalagem_fk = ?3, tipo_picole_fk = ?4,
                         sabor_tipo_picole_tipo_embalagem = ?5, data_atualizacao = ?6
                     WHERE id = ?7",
                    rusqlite::params![
                        picole.preco,
                        picole.sabor_fk,
                        picole.tipo_embalagem_fk,
                        picole.tipo_picole_fk,
                        picole.sabor_tipo_picole_tipo_embalagem,
                        to_millis(picole.data_atualizacao),
                        id
                    ],
                )
                .map_err(|e| write_error(e, &picole))?;

                Ok(picole)
            })
        })
    }

    /// # Errors
    /// `NotFound` if absent, `StillReferenced` while batches or join rows
    /// point at it.
    pub fn delete(conn: &Connection, id: i64) -> Result<Picole> {
        logged("picole_delete", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            in_transaction(conn, |conn| {
                let existing = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                delete_row(conn, ENTITY, TABLE, id)?;
                Ok(existing)
            })
        })
    }
}

fn write_error(err: rusqlite::Error, picole: &Picole) -> PicoleError {
    translate_write(
        ENTITY,
        err,
        &[(KEY_COLUMN, picole.sabor_tipo_picole_tipo_embalagem.as_str())],
        &[
            ("sabor_fk", picole.sabor_fk),
            ("tipo_embalagem_fk", picole.tipo_embalagem_fk),
            ("tipo_picole_fk", picole.tipo_picole_fk),
        ],
    )
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Picole>> {
    query_one(conn, &format!("{} WHERE id = ?1", SELECT), [id], read_row)
}

fn select_by_column(conn: &Connection, column: &'static str, value: i64) -> Result<Vec<Picole>> {
    let value = require_id(ENTITY, column, value)?;
    query_all(
        conn,
        &format!("{} WHERE {} = ?1 ORDER BY id", SELECT, column),
        [value],
        read_row,
    )
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<Picole> {
    Ok(Picole {
        id: row.get(0)?,
        preco: row.get(1)?,
        sabor_fk: row.get(2)?,
        tipo_embalagem_fk: row.get(3)?,
        tipo_picole_fk: row.get(4)?,
        sabor_tipo_picole_tipo_embalagem: row.get(5)?,
        data_criacao: timestamp_at(row, 6)?,
        data_atualizacao: timestamp_at(row, 7)?,
    })
}
