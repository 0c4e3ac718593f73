use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::rules::natural_key;

/// A many-to-many join row between two tables
///
/// Every join table has two foreign-key columns and a unique text column
/// holding `"{left}-{right}"`, which keeps the same pair from being stored
/// twice. Left and right follow the column order of the key, not the order
/// of the table name.
pub trait Association: Record + Sized {
    /// Foreign-key column forming the first half of the key
    const LEFT_COLUMN: &'static str;
    /// Table referenced by `LEFT_COLUMN`
    const LEFT_TABLE: &'static str;
    /// Foreign-key column forming the second half of the key
    const RIGHT_COLUMN: &'static str;
    /// Table referenced by `RIGHT_COLUMN`
    const RIGHT_TABLE: &'static str;
    /// Unique synthesized key column
    const KEY_COLUMN: &'static str;

    fn from_parts(
        id: i64,
        left: i64,
        right: i64,
        key: String,
        data_criacao: DateTime<Utc>,
        data_atualizacao: DateTime<Utc>,
    ) -> Self;

    fn left(&self) -> i64;

    fn right(&self) -> i64;

    fn key(&self) -> &str;

    fn data_criacao(&self) -> DateTime<Utc>;

    fn data_atualizacao(&self) -> DateTime<Utc>;

    /// Synthesized key for a pair of foreign keys
    fn natural_key(left: i64, right: i64) -> String {
        natural_key::pair_key(left, right)
    }
}

macro_rules! association {
    (
        $(#[$meta:meta])*
        $name:ident,
        table = $table:literal,
        left = $left:ident -> $left_table:literal,
        right = $right:ident -> $right_table:literal,
        key = $key:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub id: i64,
            pub $left: i64,
            pub $right: i64,
            pub $key: String,
            pub data_criacao: DateTime<Utc>,
            pub data_atualizacao: DateTime<Utc>,
        }

        impl Record for $name {
            const TABLE: &'static str = $table;
            const ENTITY: &'static str = stringify!($name);

            fn id(&self) -> i64 {
                self.id
            }
        }

        impl Association for $name {
            const LEFT_COLUMN: &'static str = stringify!($left);
            const LEFT_TABLE: &'static str = $left_table;
            const RIGHT_COLUMN: &'static str = stringify!($right);
            const RIGHT_TABLE: &'static str = $right_table;
            const KEY_COLUMN: &'static str = stringify!($key);

            fn from_parts(
                id: i64,
                left: i64,
                right: i64,
                key: String,
                data_criacao: DateTime<Utc>,
                data_atualizacao: DateTime<Utc>,
            ) -> Self {
                Self {
                    id,
                    $left: left,
                    $right: right,
                    $key: key,
                    data_criacao,
                    data_atualizacao,
                }
            }

            fn left(&self) -> i64 {
                self.$left
            }

            fn right(&self) -> i64 {
                self.$right
            }

            fn key(&self) -> &str {
                &self.$key
            }

            fn data_criacao(&self) -> DateTime<Utc> {
                self.data_criacao
            }

            fn data_atualizacao(&self) -> DateTime<Utc> {
                self.data_atualizacao
            }
        }
    };
}

association!(
    /// Batch shipped under an invoice
    LoteNotaFiscal,
    table = "lote_nota_fiscal",
    left = lote_fk -> "lote",
    right = nota_fiscal_fk -> "nota_fiscal",
    key = lote_nota_fiscal
);

association!(
    /// Ingredient used in a picolé
    IngredientePicole,
    table = "ingrediente_picole",
    left = ingrediente_fk -> "ingrediente",
    right = picole_fk -> "picole",
    key = ingrediente_picole
);

association!(
    /// Preservative used in a picolé
    ConservantePicole,
    table = "conservante_picole",
    left = conservante_fk -> "conservante",
    right = picole_fk -> "picole",
    key = conservante_picole
);

association!(
    /// Nutritive additive used in a picolé
    ///
    /// Unlike the other join tables the picolé comes first in the key.
    AditivoNutritivoPicole,
    table = "aditivo_nutritivo_picole",
    left = picole_fk -> "picole",
    right = aditivo_nutritivo_fk -> "aditivo_nutritivo",
    key = picole_aditivo_nutritivo
);
