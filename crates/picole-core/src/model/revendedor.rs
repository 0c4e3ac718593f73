use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

/// Reseller identified by its CNPJ
///
/// `nome` and `razao_social` are not unique; only `cnpj` is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revendedor {
    pub id: i64,
    pub nome: String,
    /// Brazilian company registry number, exactly 14 characters
    pub cnpj: String,
    pub razao_social: String,
    pub contato: String,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

impl Record for Revendedor {
    const TABLE: &'static str = "revendedor";
    const ENTITY: &'static str = "Revendedor";

    fn id(&self) -> i64 {
        self.id
    }
}
