use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

/// An independent lookup table holding a single unique `nome`
///
/// Sabor, TipoPicole, TipoEmbalagem and Ingrediente share this shape, so one
/// generic repository serves all four.
pub trait NamedLookup: Record + Sized {
    /// Build a value from its stored columns
    fn from_parts(
        id: i64,
        nome: String,
        data_criacao: DateTime<Utc>,
        data_atualizacao: DateTime<Utc>,
    ) -> Self;

    fn nome(&self) -> &str;

    fn data_criacao(&self) -> DateTime<Utc>;

    fn data_atualizacao(&self) -> DateTime<Utc>;
}

macro_rules! named_lookup {
    ($(#[$meta:meta])* $name:ident, table = $table:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub id: i64,
            pub nome: String,
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

        impl NamedLookup for $name {
            fn from_parts(
                id: i64,
                nome: String,
                data_criacao: DateTime<Utc>,
                data_atualizacao: DateTime<Utc>,
            ) -> Self {
                Self {
                    id,
                    nome,
                    data_criacao,
                    data_atualizacao,
                }
            }

            fn nome(&self) -> &str {
                &self.nome
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

named_lookup!(
    /// Flavor of a picolé
    Sabor,
    table = "sabor"
);

named_lookup!(
    /// Kind of picolé (e.g. water-based, cream-based)
    TipoPicole,
    table = "tipo_picole"
);

named_lookup!(
    /// Packaging type
    TipoEmbalagem,
    table = "tipo_embalagem"
);

named_lookup!(Ingrediente, table = "ingrediente");
