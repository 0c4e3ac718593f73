use picole_core::model::{Record, Revendedor};
use picole_core::rules::validation::{
    normalize, normalize_cnpj, normalize_optional, normalize_required, require_id,
    REVENDEDOR_TEXT_MAX_LEN,
};
use rusqlite::{Connection, Row};

use super::common::{
    delete_row, in_transaction, logged, not_found, now, query_all, query_one, timestamp_at,
    to_millis,
};
use crate::errors::{translate_write, Result};

const ENTITY: &str = Revendedor::ENTITY;
const TABLE: &str = Revendedor::TABLE;
const SELECT: &str = "SELECT id, nome, cnpj, razao_social, contato, data_criacao, data_atualizacao
                      FROM revendedor";

/// Fields of a reseller update; `None` or blank keeps the current value
#[derive(Debug, Clone, Copy, Default)]
pub struct RevendedorChanges<'a> {
    pub nome: Option<&'a str>,
    pub cnpj: Option<&'a str>,
    pub razao_social: Option<&'a str>,
    pub contato: Option<&'a str>,
}

/// SQLite repository for resellers
pub struct RevendedorRepo;

impl RevendedorRepo {
    /// # Errors
    /// `MissingValue` for a blank field, `InvalidArgument` for a CNPJ that
    /// is not 14 characters, `Duplicate` if the CNPJ is taken.
    pub fn insert(
        conn: &Connection,
        nome: &str,
        cnpj: &str,
        razao_social: &str,
        contato: &str,
    ) -> Result<Revendedor> {
        logged("revendedor_insert", TABLE, None, || {
            let nome = normalize_required(ENTITY, "nome", nome, REVENDEDOR_TEXT_MAX_LEN)?;
            let cnpj = normalize_cnpj(ENTITY, cnpj)?;
            let razao_social =
                normalize_required(ENTITY, "razao_social", razao_social, REVENDEDOR_TEXT_MAX_LEN)?;
            let contato = normalize_required(ENTITY, "contato", contato, REVENDEDOR_TEXT_MAX_LEN)?;
            let ts = now();

            conn.execute(
                "INSERT INTO revendedor (nome, cnpj, razao_social, contato, data_criacao, data_atualizacao)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                rusqlite::params![nome, cnpj, razao_social, contato, to_millis(ts)],
            )
            .map_err(|e| translate_write(ENTITY, e, &[("cnpj", cnpj.as_str())], &[]))?;

            Ok(Revendedor {
                id: conn.last_insert_rowid(),
                nome,
                cnpj,
                razao_social,
                contato,
                data_criacao: ts,
                data_atualizacao: ts,
            })
        })
    }

    pub fn select_all(conn: &Connection) -> Result<Vec<Revendedor>> {
        logged("revendedor_select_all", TABLE, None, || {
            query_all(conn, &format!("{} ORDER BY id", SELECT), [], read_row)
        })
    }

    pub fn select_by_id(conn: &Connection, id: i64) -> Result<Option<Revendedor>> {
        logged("revendedor_select_by_id", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            fetch(conn, id)
        })
    }

    /// # Errors
    /// `MissingValue` / `InvalidArgument` for a malformed CNPJ.
    pub fn select_by_cnpj(conn: &Connection, cnpj: &str) -> Result<Option<Revendedor>> {
        logged("revendedor_select_by_cnpj", TABLE, None, || {
            let cnpj = normalize_cnpj(ENTITY, cnpj)?;
            query_one(conn, &format!("{} WHERE cnpj = ?1", SELECT), [cnpj], read_row)
        })
    }

    /// Every reseller with exactly this name; names are not unique
    pub fn select_by_nome(conn: &Connection, nome: &str) -> Result<Vec<Revendedor>> {
        logged("revendedor_select_by_nome", TABLE, None, || {
            let nome = normalize_required(ENTITY, "nome", nome, REVENDEDOR_TEXT_MAX_LEN)?;
            query_all(
                conn,
                &format!("{} WHERE nome = ?1 ORDER BY id", SELECT),
                [nome],
                read_row,
            )
        })
    }

    pub fn select_by_razao_social(conn: &Connection, razao_social: &str) -> Result<Vec<Revendedor>> {
        logged("revendedor_select_by_razao_social", TABLE, None, || {
            let razao_social =
                normalize_required(ENTITY, "razao_social", razao_social, REVENDEDOR_TEXT_MAX_LEN)?;
            query_all(
                conn,
                &format!("{} WHERE razao_social = ?1 ORDER BY id", SELECT),
                [razao_social],
                read_row,
            )
        })
    }

    /// # Errors
    /// `NotFound` if the id is absent, `InvalidArgument` for a malformed
    /// CNPJ, `Duplicate` if the new CNPJ is taken.
    pub fn update(conn: &Connection, id: i64, changes: RevendedorChanges<'_>) -> Result<Revendedor> {
        logged("revendedor_update", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            let nome = normalize_optional(ENTITY, "nome", changes.nome, REVENDEDOR_TEXT_MAX_LEN)?;
            let cnpj = changes
                .cnpj
                .filter(|c| !normalize(c).is_empty())
                .map(|c| normalize_cnpj(ENTITY, c))
                .transpose()?;
            let razao_social = normalize_optional(
                ENTITY,
                "razao_social",
                changes.razao_social,
                REVENDEDOR_TEXT_MAX_LEN,
            )?;
            let contato =
                normalize_optional(ENTITY, "contato", changes.contato, REVENDEDOR_TEXT_MAX_LEN)?;

            in_transaction(conn, |conn| {
                let mut row = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                if let Some(nome) = nome {
                    row.nome = nome;
                }
                if let Some(cnpj) = cnpj {
                    row.cnpj = cnpj;
                }
                if let Some(razao_social) = razao_social {
                    row.razao_social = razao_social;
                }
                if let Some(contato) = contato {
                    row.contato = contato;
                }
                row.data_atualizacao = now();

                conn.execute(
                    "UPDATE revendedor
                     SET nome = ?1, cnpj = ?2, razao_social = ?3, contato = ?4, data_atualizacao = ?5
                     WHERE id = ?6",
                    rusqlite::params![
                        row.nome,
                        row.cnpj,
                        row.razao_social,
                        row.contato,
                        to_millis(row.data_atualizacao),
                        id
                    ],
                )
                .map_err(|e| translate_write(ENTITY, e, &[("cnpj", row.cnpj.as_str())], &[]))?;

                Ok(row)
            })
        })
    }

    /// # Errors
    /// `NotFound` if absent, `StillReferenced` while invoices point at it.
    pub fn delete(conn: &Connection, id: i64) -> Result<Revendedor> {
        logged("revendedor_delete", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            in_transaction(conn, |conn| {
                let existing = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                delete_row(conn, ENTITY, TABLE, id)?;
                Ok(existing)
            })
        })
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Revendedor>> {
    query_one(conn, &format!("{} WHERE id = ?1", SELECT), [id], read_row)
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<Revendedor> {
    Ok(Revendedor {
        id: row.get(0)?,
        nome: row.get(1)?,
        cnpj: row.get(2)?,
        razao_social: row.get(3)?,
        contato: row.get(4)?,
        data_criacao: timestamp_at(row, 5)?,
        data_atualizacao: timestamp_at(row, 6)?,
    })
}
