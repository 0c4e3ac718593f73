use picole_core::model::{Conservante, Record};
use picole_core::rules::validation::{normalize_optional, normalize_required, require_id, NOME_MAX_LEN};
use rusqlite::{Connection, Row};

use super::common::{
    delete_row, in_transaction, logged, not_found, now, query_all, query_one, timestamp_at,
    to_millis,
};
use crate::errors::{translate_write, Result};

const ENTITY: &str = Conservante::ENTITY;
const TABLE: &str = Conservante::TABLE;
const SELECT: &str = "SELECT id, nome, descricao, data_criacao, data_atualizacao FROM conservante";

/// SQLite repository for preservatives
pub struct ConservanteRepo;

impl ConservanteRepo {
    /// # Errors
    /// `MissingValue` for a blank field, `Duplicate` if `nome` is taken.
    pub fn insert(conn: &Connection, nome: &str, descricao: &str) -> Result<Conservante> {
        logged("conservante_insert", TABLE, None, || {
            let nome = normalize_required(ENTITY, "nome", nome, NOME_MAX_LEN)?;
            let descricao = normalize_required(ENTITY, "descricao", descricao, NOME_MAX_LEN)?;
            let ts = now();

            conn.execute(
                "INSERT INTO conservante (nome, descricao, data_criacao, data_atualizacao)
                 VALUES (?1, ?2, ?3, ?3)",
                rusqlite::params![nome, descricao, to_millis(ts)],
            )
            .map_err(|e| translate_write(ENTITY, e, &[("nome", nome.as_str())], &[]))?;

            Ok(Conservante {
                id: conn.last_insert_rowid(),
                nome,
                descricao,
                data_criacao: ts,
                data_atualizacao: ts,
            })
        })
    }

    pub fn select_all(conn: &Connection) -> Result<Vec<Conservante>> {
        logged("conservante_select_all", TABLE, None, || {
            query_all(conn, &format!("{} ORDER BY id", SELECT), [], read_row)
        })
    }

    pub fn select_by_id(conn: &Connection, id: i64) -> Result<Option<Conservante>> {
        logged("conservante_select_by_id", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            fetch(conn, id)
        })
    }

    pub fn select_by_nome(conn: &Connection, nome: &str) -> Result<Option<Conservante>> {
        logged("conservante_select_by_nome", TABLE, None, || {
            let nome = normalize_required(ENTITY, "nome", nome, NOME_MAX_LEN)?;
            query_one(conn, &format!("{} WHERE nome = ?1", SELECT), [nome], read_row)
        })
    }

    /// Partial update; `None` or blank keeps the current value
    ///
    /// # Errors
    /// `NotFound` if the id is absent, `Duplicate` if the new `nome` is taken.
    pub fn update(
        conn: &Connection,
        id: i64,
        nome: Option<&str>,
        descricao: Option<&str>,
    ) -> Result<Conservante> {
        logged("conservante_update", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            let nome = normalize_optional(ENTITY, "nome", nome, NOME_MAX_LEN)?;
            let descricao = normalize_optional(ENTITY, "descricao", descricao, NOME_MAX_LEN)?;

            in_transaction(conn, |conn| {
                let mut row = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                if let Some(nome) = nome {
                    row.nome = nome;
                }
                if let Some(descricao) = descricao {
                    row.descricao = descricao;
                }
                row.data_atualizacao = now();

                conn.execute(
                    "UPDATE conservante SET nome = ?1, descricao = ?2, data_atualizacao = ?3 WHERE id = ?4",
                    rusqlite::params![row.nome, row.descricao, to_millis(row.data_atualizacao), id],
                )
                .map_err(|e| translate_write(ENTITY, e, &[("nome", row.nome.as_str())], &[]))?;

                Ok(row)
            })
        })
    }

    /// # Errors
    /// `NotFound` if absent, `StillReferenced` while a picolé uses it.
    pub fn delete(conn: &Connection, id: i64) -> Result<Conservante> {
        logged("conservante_delete", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            in_transaction(conn, |conn| {
                let existing = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                delete_row(conn, ENTITY, TABLE, id)?;
                Ok(existing)
            })
        })
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Conservante>> {
    query_one(conn, &format!("{} WHERE id = ?1", SELECT), [id], read_row)
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<Conservante> {
    Ok(Conservante {
        id: row.get(0)?,
        nome: row.get(1)?,
        descricao: row.get(2)?,
        data_criacao: timestamp_at(row, 3)?,
        data_atualizacao: timestamp_at(row, 4)?,
    })
}
