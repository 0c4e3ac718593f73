use picole_core::model::{NotaFiscal, Record};
use picole_core::rules::validation::{
    money, normalize_optional, normalize_required, optional_id, optional_money, require_id,
    NOTA_DESCRICAO_MAX_LEN, NUMERO_SERIE_MAX_LEN,
};
use rusqlite::{Connection, Row};

use super::common::{
    delete_row, in_transaction, logged, not_found, now, query_all, query_one, timestamp_at,
    to_millis,
};
use crate::errors::{translate_write, Result};

const ENTITY: &str = NotaFiscal::ENTITY;
const TABLE: &str = NotaFiscal::TABLE;
const SELECT: &str = "SELECT id, valor, numero_serie, descricao, revendedor_fk, data_criacao, data_atualizacao
                      FROM nota_fiscal";

/// Fields of an invoice update; `None` or blank keeps the current value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NotaFiscalChanges<'a> {
    pub valor: Option<f64>,
    pub numero_serie: Option<&'a str>,
    pub descricao: Option<&'a str>,
    pub revendedor_fk: Option<i64>,
}

/// SQLite repository for invoices
pub struct NotaFiscalRepo;

impl NotaFiscalRepo {
    /// # Errors
    /// `InvalidArgument` for a bad amount or id, `MissingValue` for blank
    /// text, `Duplicate` if the serial number is taken, `MissingForeignKey`
    /// if the reseller does not exist.
    pub fn insert(
        conn: &Connection,
        valor: f64,
        numero_serie: &str,
        descricao: &str,
        revendedor_fk: i64,
    ) -> Result<NotaFiscal> {
        logged("nota_fiscal_insert", TABLE, None, || {
            let valor = money(ENTITY, "valor", valor)?;
            let numero_serie =
                normalize_required(ENTITY, "numero_serie", numero_serie, NUMERO_SERIE_MAX_LEN)?;
            let descricao = normalize_required(ENTITY, "descricao", descricao, NOTA_DESCRICAO_MAX_LEN)?;
            let revendedor_fk = require_id(ENTITY, "revendedor_fk", revendedor_fk)?;
            let ts = now();

            conn.execute(
                "INSERT INTO nota_fiscal (valor, numero_serie, descricao, revendedor_fk,
                                          data_criacao, data_atualizacao)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                rusqlite::params![valor, numero_serie, descricao, revendedor_fk, to_millis(ts)],
            )
            .map_err(|e| {
                translate_write(
                    ENTITY,
                    e,
                    &[("numero_serie", numero_serie.as_str())],
                    &[("revendedor_fk", revendedor_fk)],
                )
            })?;

            Ok(NotaFiscal {
                id: conn.last_insert_rowid(),
                valor,
                numero_serie,
                descricao,
                revendedor_fk,
                data_criacao: ts,
                data_atualizacao: ts,
            })
        })
    }

    pub fn select_all(conn: &Connection) -> Result<Vec<NotaFiscal>> {
        logged("nota_fiscal_select_all", TABLE, None, || {
            query_all(conn, &format!("{} ORDER BY id", SELECT), [], read_row)
        })
    }

    pub fn select_by_id(conn: &Connection, id: i64) -> Result<Option<NotaFiscal>> {
        logged("nota_fiscal_select_by_id", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            fetch(conn, id)
        })
    }

    pub fn select_by_numero_serie(conn: &Connection, numero_serie: &str) -> Result<Option<NotaFiscal>> {
        logged("nota_fiscal_select_by_numero_serie", TABLE, None, || {
            let numero_serie =
                normalize_required(ENTITY, "numero_serie", numero_serie, NUMERO_SERIE_MAX_LEN)?;
            query_one(
                conn,
                &format!("{} WHERE numero_serie = ?1", SELECT),
                [numero_serie],
                read_row,
            )
        })
    }

    pub fn select_by_revendedor(conn: &Connection, revendedor_fk: i64) -> Result<Vec<NotaFiscal>> {
        logged("nota_fiscal_select_by_revendedor", TABLE, None, || {
            let revendedor_fk = require_id(ENTITY, "revendedor_fk", revendedor_fk)?;
            query_all(
                conn,
                &format!("{} WHERE revendedor_fk = ?1 ORDER BY id", SELECT),
                [revendedor_fk],
                read_row,
            )
        })
    }

    /// # Errors
    /// `NotFound` if the id is absent, otherwise as for insert.
    pub fn update(conn: &Connection, id: i64, changes: NotaFiscalChanges<'_>) -> Result<NotaFiscal> {
        logged("nota_fiscal_update", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            let valor = optional_money(ENTITY, "valor", changes.valor)?;
            let numero_serie = normalize_optional(
                ENTITY,
                "numero_serie",
                changes.numero_serie,
                NUMERO_SERIE_MAX_LEN,
            )?;
            let descricao =
                normalize_optional(ENTITY, "descricao", changes.descricao, NOTA_DESCRICAO_MAX_LEN)?;
            let revendedor_fk = optional_id(ENTITY, "revendedor_fk", changes.revendedor_fk)?;

            in_transaction(conn, |conn| {
                let mut nota = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                if let Some(valor) = valor {
                    nota.valor = valor;
                }
                if let Some(numero_serie) = numero_serie {
                    nota.numero_serie = numero_serie;
                }
                if let Some(descricao) = descricao {
                    nota.descricao = descricao;
                }
                if let Some(revendedor_fk) = revendedor_fk {
                    nota.revendedor_fk = revendedor_fk;
                }
                nota.data_atualizacao = now();

                conn.execute(
                    "UPDATE nota_fiscal
                     SET valor = ?1, numero_serie = ?2, descricao = ?3, revendedor_fk = ?4,
                         data_atualizacao = ?5
                     WHERE id = ?6",
                    rusqlite::params![
                        nota.valor,
                        nota.numero_serie,
                        nota.descricao,
                        nota.revendedor_fk,
                        to_millis(nota.data_atualizacao),
                        id
                    ],
                )
                .map_err(|e| {
                    translate_write(
                        ENTITY,
                        e,
                        &[("numero_serie", nota.numero_serie.as_str())],
                        &[("revendedor_fk", nota.revendedor_fk)],
                    )
                })?;

                Ok(nota)
            })
        })
    }

    /// # Errors
    /// `NotFound` if absent, `StillReferenced` while a batch link points at it.
    pub fn delete(conn: &Connection, id: i64) -> Result<NotaFiscal> {
        logged("nota_fiscal_delete", TABLE, Some(id), || {
            require_id(ENTITY, "id", id)?;
            in_transaction(conn, |conn| {
                let existing = fetch(conn, id)?.ok_or_else(|| not_found(ENTITY, id))?;
                delete_row(conn, ENTITY, TABLE, id)?;
                Ok(existing)
            })
        })
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<NotaFiscal>> {
    query_one(conn, &format!("{} WHERE id = ?1", SELECT), [id], read_row)
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<NotaFiscal> {
    Ok(NotaFiscal {
        id: row.get(0)?,
        valor: row.get(1)?,
        numero_serie: row.get(2)?,
        descricao: row.get(3)?,
        revendedor_fk: row.get(4)?,
        data_criacao: timestamp_at(row, 5)?,
        data_atualizacao: timestamp_at(row, 6)?,
    })
}
