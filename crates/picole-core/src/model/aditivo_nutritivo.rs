use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

/// Nutritive additive
///
/// Both `nome` and `formula_quimica` are unique on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AditivoNutritivo {
    pub id: i64,
    pub nome: String,
    pub formula_quimica: String,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

impl Record for AditivoNutritivo {
    const TABLE: &'static str = "aditivo_nutritivo";
    const ENTITY: &'static str = "AditivoNutritivo";

    fn id(&self) -> i64 {
        self.id
    }
}
