pub mod aditivo_nutritivo;
pub mod association;
pub mod conservante;
pub mod lookup;
pub mod lote;
pub mod nota_fiscal;
pub mod picole;
pub mod revendedor;

pub use aditivo_nutritivo::AditivoNutritivo;
pub use association::{
    AditivoNutritivoPicole, Association, ConservantePicole, IngredientePicole, LoteNotaFiscal,
};
pub use conservante::Conservante;
pub use lookup::{Ingrediente, NamedLookup, Sabor, TipoEmbalagem, TipoPicole};
pub use lote::Lote;
pub use nota_fiscal::NotaFiscal;
pub use picole::Picole;
pub use revendedor::Revendedor;

/// A persisted row of one table
///
/// `TABLE` is the SQL table name; `ENTITY` is the name used in error
/// messages and log fields.
pub trait Record {
    const TABLE: &'static str;
    const ENTITY: &'static str;

    /// Surrogate primary key
    fn id(&self) -> i64;
}
