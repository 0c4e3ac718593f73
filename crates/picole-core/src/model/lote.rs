use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

/// Production batch of a picolé
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lote {
    pub id: i64,
    pub picole_fk: i64,
    /// Number of units produced; always greater than zero
    pub quantidade: i64,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

impl Record for Lote {
    const TABLE: &'static str = "lote";
    const ENTITY: &'static str = "Lote";

    fn id(&self) -> i64 {
        self.id
    }
}
