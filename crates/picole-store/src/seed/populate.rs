//! Seed orchestration
//!
//! Parents are seeded before children so every generated foreign key
//! points at a row created in the same run. Natural-key collisions are
//! retried with fresh values; anything else aborts the whole seed.

use std::time::Instant;

use picole_core::model::{
    AditivoNutritivoPicole, Association, ConservantePicole, IngredientePicole, LoteNotaFiscal,
    NamedLookup,
};
use picole_core::rules::validation::{NOME_MAX_LEN, NOTA_DESCRICAO_MAX_LEN, REVENDEDOR_TEXT_MAX_LEN};
use picole_core::{log_op_end, log_op_error, log_op_start, Ingrediente, PicoleError, Sabor, TipoEmbalagem, TipoPicole};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::Connection;

use super::generate;
use super::{SeedOptions, SeedReport};
use crate::errors::{from_rusqlite, Result};
use crate::repo::{
    AditivoNutritivoRepo, AssociationRepo, ConservanteRepo, LookupRepo, LoteRepo, NotaFiscalRepo,
    PicoleRepo, RevendedorRepo,
};

/// Attempts allowed per requested row before giving up on a table
const ATTEMPTS_PER_ROW: usize = 20;

/// Populate every table with `rows_per_table` generated rows
///
/// Runs in one transaction: either every table is seeded or nothing is.
/// Tables whose parents ended up empty are left empty.
///
/// # Errors
/// Any repository error other than a natural-key collision.
pub fn populate(conn: &mut Connection, options: &SeedOptions) -> Result<SeedReport> {
    log_op_start!("seed_populate", row_count = options.rows_per_table as u64);
    let start = Instant::now();

    let result = populate_impl(conn, options).map_err(|e| {
        log_op_error!("seed_populate", e.clone(), duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!(
        "seed_populate",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = result.total() as u64
    );
    Ok(result)
}

fn populate_impl(conn: &mut Connection, options: &SeedOptions) -> Result<SeedReport> {
    let mut rng = match options.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let n = options.rows_per_table;
    let mut report = SeedReport::default();

    let tx = conn.transaction().map_err(from_rusqlite)?;

    let sabores = seed_lookup::<Sabor, _>(&tx, &mut rng, n, &mut report)?;
    let tipos_picole = seed_lookup::<TipoPicole, _>(&tx, &mut rng, n, &mut report)?;
    let tipos_embalagem = seed_lookup::<TipoEmbalagem, _>(&tx, &mut rng, n, &mut report)?;
    let ingredientes = seed_lookup::<Ingrediente, _>(&tx, &mut rng, n, &mut report)?;

    let conservantes = seed_rows(&tx, n, "conservante", &mut report, |conn| {
        let nome = generate::word(&mut rng, 4, 20);
        let descricao = generate::phrase(&mut rng, NOME_MAX_LEN);
        ConservanteRepo::insert(conn, &nome, &descricao).map(|c| c.id)
    })?;

    let aditivos = seed_rows(&tx, n, "aditivo_nutritivo", &mut report, |conn| {
        let nome = generate::word(&mut rng, 4, 20);
        let formula = generate::word(&mut rng, 3, 12);
        AditivoNutritivoRepo::insert(conn, &nome, &formula).map(|a| a.id)
    })?;

    let revendedores = seed_rows(&tx, n, "revendedor", &mut report, |conn| {
        let nome = generate::phrase(&mut rng, REVENDEDOR_TEXT_MAX_LEN);
        let cnpj = generate::cnpj(&mut rng);
        let razao_social = generate::phrase(&mut rng, REVENDEDOR_TEXT_MAX_LEN);
        let contato = generate::word(&mut rng, 6, 20);
        RevendedorRepo::insert(conn, &nome, &cnpj, &razao_social, &contato).map(|r| r.id)
    })?;

    let picoles = if sabores.is_empty() || tipos_picole.is_empty() || tipos_embalagem.is_empty() {
        report.record("picole", 0);
        Vec::new()
    } else {
        seed_rows(&tx, n, "picole", &mut report, |conn| {
            let preco = generate::money(&mut rng, 20.0);
            let sabor = pick(&mut rng, &sabores)?;
            let embalagem = pick(&mut rng, &tipos_embalagem)?;
            let tipo = pick(&mut rng, &tipos_picole)?;
            PicoleRepo::insert(conn, preco, sabor, embalagem, tipo).map(|p| p.id)
        })?
    };

    let lotes = if picoles.is_empty() {
        report.record("lote", 0);
        Vec::new()
    } else {
        seed_rows(&tx, n, "lote", &mut report, |conn| {
            let picole = pick(&mut rng, &picoles)?;
            let quantidade = rng.gen_range(1..=1000);
            LoteRepo::insert(conn, picole, quantidade).map(|l| l.id)
        })?
    };

    let notas = if revendedores.is_empty() {
        report.record("nota_fiscal", 0);
        Vec::new()
    } else {
        seed_rows(&tx, n, "nota_fiscal", &mut report, |conn| {
            let valor = generate::money(&mut rng, 1000.0);
            let numero_serie = generate::word(&mut rng, 8, 20);
            let descricao = generate::phrase(&mut rng, NOTA_DESCRICAO_MAX_LEN);
            let revendedor = pick(&mut rng, &revendedores)?;
            NotaFiscalRepo::insert(conn, valor, &numero_serie, &descricao, revendedor).map(|nf| nf.id)
        })?
    };

    seed_links::<LoteNotaFiscal, _>(&tx, &mut rng, n, &lotes, &notas, &mut report)?;
    seed_links::<IngredientePicole, _>(&tx, &mut rng, n, &ingredientes, &picoles, &mut report)?;
    seed_links::<ConservantePicole, _>(&tx, &mut rng, n, &conservantes, &picoles, &mut report)?;
    seed_links::<AditivoNutritivoPicole, _>(&tx, &mut rng, n, &picoles, &aditivos, &mut report)?;

    tx.commit().map_err(from_rusqlite)?;
    Ok(report)
}

fn seed_lookup<T: NamedLookup, R: Rng>(
    conn: &Connection,
    rng: &mut R,
    n: usize,
    report: &mut SeedReport,
) -> Result<Vec<i64>> {
    seed_rows(conn, n, T::TABLE, report, |conn| {
        let nome = generate::word(&mut *rng, 4, 20);
        LookupRepo::<T>::insert(conn, &nome).map(|row| row.id())
    })
}

fn seed_links<T: Association, R: Rng>(
    conn: &Connection,
    rng: &mut R,
    n: usize,
    left: &[i64],
    right: &[i64],
    report: &mut SeedReport,
) -> Result<()> {
    if left.is_empty() || right.is_empty() {
        report.record(T::TABLE, 0);
        return Ok(());
    }
    // never ask for more distinct pairs than exist
    let wanted = n.min(left.len().saturating_mul(right.len()));
    seed_rows(conn, wanted, T::TABLE, report, |conn| {
        let l = pick(&mut *rng, left)?;
        let r = pick(&mut *rng, right)?;
        AssociationRepo::<T>::insert(conn, l, r).map(|row| row.id())
    })?;
    Ok(())
}

/// Call `insert` until `n` rows exist, skipping natural-key collisions
fn seed_rows<F>(
    conn: &Connection,
    n: usize,
    table: &str,
    report: &mut SeedReport,
    mut insert: F,
) -> Result<Vec<i64>>
where
    F: FnMut(&Connection) -> Result<i64>,
{
    let mut ids = Vec::with_capacity(n);
    let mut attempts = 0;
    while ids.len() < n && attempts < n.saturating_mul(ATTEMPTS_PER_ROW) {
        attempts += 1;
        match insert(conn) {
            Ok(id) => ids.push(id),
            Err(PicoleError::Duplicate { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
    if ids.len() < n {
        tracing::warn!(table, created = ids.len(), requested = n, "seeding stopped early");
    }
    report.record(table, ids.len());
    Ok(ids)
}

fn pick<R: Rng>(rng: &mut R, ids: &[i64]) -> Result<i64> {
    generate::pick(rng, ids).ok_or_else(|| PicoleError::Persistence {
        op: "seed_populate".to_string(),
        message: "no parent rows to reference".to_string(),
    })
}
