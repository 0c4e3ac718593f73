use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

/// Invoice issued to a reseller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotaFiscal {
    pub id: i64,
    /// Total amount, rounded to two decimals
    pub valor: f64,
    pub numero_serie: String,
    pub descricao: String,
    pub revendedor_fk: i64,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

impl Record for NotaFiscal {
    const TABLE: &'static str = "nota_fiscal";
    const ENTITY: &'static str = "NotaFiscal";

    fn id(&self) -> i64 {
        self.id
    }
}
