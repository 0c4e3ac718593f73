use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

/// Preservative with a unique name and a short description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conservante {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

impl Record for Conservante {
    const TABLE: &'static str = "conservante";
    const ENTITY: &'static str = "Conservante";

    fn id(&self) -> i64 {
        self.id
    }
}
