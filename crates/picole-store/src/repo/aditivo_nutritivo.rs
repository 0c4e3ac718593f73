use picole_core::model::{AditivoNutritivo, Record};
use picole_core::rules::validation::{normalize_optional, normalize_required, require_id, NOME_MAX_LEN};
use rusqlite::{Connection, Row};

use super::common::{
    delete_row, in_transaction, logged, not_found, now, query_all, query_one, timestamp_at,
    to_millis,
};
use crate::errors::{translate_write, Result};

const ENTITY: &str = AditivoNutritivo::ENTITY;
const TABLE: &str = AditivoNutritivo::TABLE;
const SELECT: &str =
    "SELECT id, nome, formula_quimica, data_criacao, data_atualizacao FROM aditivo_nutritivo";

/// SQLite repository for nutritive additives
///
/// Both `nome` and `formula_quimica` are natural keys; a collision reports
/// whichever column SQLite names.
pub struct AditivoNutritivoRepo;

impl AditivoNutritivoRepo {
    /// # Errors
    /// `MissingValue` for a blank field, `Duplicate` naming `nome` or
    /// `formula_quimica` on a collision.
    pub fn insert(conn: &Connection, nome: &str, formula_quimica: &str) -> Result<AditivoNutritivo> {
        logged("aditivo_nutritivo_insert", TABLE, None, || {
            let nome = normalize_required(ENTITY, "nome", nome, NOME_MAX_LEN)?;
            let formula_quimica =
                normalize_required(ENTITY, "formula_quimica", formula_quimica, NOME_MAX_LEN)?;
            let ts = now();

            conn.execute(
                "INSERT INTO aditivo_nutritivo (nome, formula_quimica, data_criacao, data_atualizacao)
                 VALUES (?1, ?2, ?3, ?3)",
                rusqlite::params![nome, formula_quimica, to_millis(ts)],
            )
            .map_err(|e| {
                translate_write(
                    ENTITY,
                    e,
                    &[("nome", nome.as_str()), ("formula_quimica", formula_quimica.as_str())],
                    &[],
                )
            })?;

            Ok(AditivoNutritivo {
                id: conn.last_insert_rowid(),
                nome,
                formula_quimica,
                data_criacao: ts,
                data_atualizacao: ts,
            })
        })
    }

    pub fn select_all(conn: &Connection) -> Result<Vec<AditivoNutritivo>> {
        logged("aditivo_nutritivo_select_all", TABLE, None, || {
            query_all(conn, &format!("{} ORDER BY id", SELECT), [], read_row)
        })
    }

    pub fn select_by_id(conn: &Connection, id: i64) -> Result<Option<AditivoNutritivo>> {
        logged("aditivo_nutritivo_select_by_id", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            fetch(conn, id)
        })
    }

    pub fn select_by_nome(conn: &Connection, nome: &str) -> Result<Option<AditivoNutritivo>> {
        logged("aditivo_nutritivo_select_by_nome", TABLE, None, || {
            let nome = normalize_required(ENTITY, "nome", nome, NOME_MAX_LEN)?;
            query_one(conn, &format!("{} WHERE nome = ?1", SELECT), [nome], read_row)
        })
    }

    pub fn select_by_formula_quimica(
        conn: &Connection,
        formula_quimica: &str,
    ) -> Result<Option<AditivoNutritivo>> {
        logged("aditivo_nutritivo_select_by_formula_quimica", TABLE, None, || {
            let formula_quimica =
                normalize_required(ENTITY, "formula_quimica", formula_quimica, NOME_MAX_LEN)?;
            query_one(
                conn,
                &format!("{} WHERE formula_quimica = ?1", SELECT),
                [formula_quimica],
                read_row,
            )
        })
    }

    /// Partial update; `None` or blank keeps the current value
    ///
    /// # Errors
    /// `NotFound` if the id is absent, `Duplicate` on a natural-key collision.
    pub fn update(
        conn: &Connection,
        id: i64,
        nome: Option<&str>,
        formula_quimica: Option<&str>,
    ) -> Result<AditivoNutritivo> {
        logged("aditivo_nutritivo_update", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            let nome = normalize_optional(ENTITY, "nome", nome, NOME_MAX_LEN)?;
            let formula_quimica =
                normalize_optional(ENTITY, "formula_quimica", formula_quimica, NOME_MAX_LEN)?;

            in_transaction(conn, |conn| {
                let mut row = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                if let Some(nome) = nome {
                    row.nome = nome;
                }
                if let Some(formula_quimica) = formula_quimica {
                    row.formula_quimica = formula_quimica;
                }
                row.data_atualizacao = now();

                conn.execute(
                    "UPDATE aditivo_nutritivo
                     SET nome = ?1, formula_quimica = ?2, data_atualizacao = ?3
                     WHERE id = ?4",
                    rusqlite::params![
                        row.nome,
                        row.formula_quimica,
                        to_millis(row.data_atualizacao),
                        id
                    ],
                )
                .map_err(|e| {
                    translate_write(
                        ENTITY,
                        e,
                        &[
                            ("nome", row.nome.as_str()),
                            ("formula_quimica", row.formula_quimica.as_str()),
                        ],
                        &[],
                    )
                })?;

                Ok(row)
            })
        })
    }

    /// # Errors
    /// `NotFound` if absent, `StillReferenced` while a picolé uses it.
    pub fn delete(conn: &Connection, id: i64) -> Result<AditivoNutritivo> {
        logged("aditivo_nutritivo_delete", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            in_transaction(conn, |conn| {
                let existing = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                delete_row(conn, ENTITY, TABLE, id)?;
                Ok(existing)
            })
        })
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<AditivoNutritivo>> {
    query_one(conn, &format!("{} WHERE id = ?1", SELECT), [id], read_row)
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<AditivoNutritivo> {
    Ok(AditivoNutritivo {
        id: row.get(0)?,
        nome: row.get(1)?,
        formula_quimica: row.get(2)?,
        data_criacao: timestamp_at(row, 3)?,
        data_atualizacao: timestamp_at(row, 4)?,
    })
}
