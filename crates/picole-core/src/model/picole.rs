use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::rules::natural_key;

/// A picolé product: one flavor in one kind and one packaging, with a price
///
/// The combination of flavor, kind and packaging is unique and is stored
/// as the synthesized `sabor_tipo_picole_tipo_embalagem` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picole {
    pub id: i64,

    /// Price, rounded to two decimals
    pub preco: f64,

    pub sabor_fk: i64,
    pub tipo_embalagem_fk: i64,
    pub tipo_picole_fk: i64,

    /// `"{sabor_fk}_{tipo_picole_fk}_{tipo_embalagem_fk}"`
    pub sabor_tipo_picole_tipo_embalagem: String,

    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

impl Picole {
    /// Composite key for the current foreign keys
    pub fn composite_key(&self) -> String {
        natural_key::picole_key(self.sabor_fk, self.tipo_picole_fk, self.tipo_embalagem_fk)
    }

    /// Recompute the stored composite key after a foreign key changed
    pub fn refresh_composite_key(&mut self) {
        self.sabor_tipo_picole_tipo_embalagem = self.composite_key();
    }
}

impl Record for Picole {
    const TABLE: &'static str = "picole";
    const ENTITY: &'static str = "Picole";

    fn id(&self) -> i64 {
        self.id
    }
}
