//! Repository layer
//!
//! One repository per table. Every operation takes a borrowed connection,
//! validates and normalizes its arguments before any I/O, and reports
//! failures through the `PicoleError` taxonomy.

pub mod aditivo_nutritivo;
pub mod association;
mod common;
pub mod conservante;
pub mod lookup;
pub mod lote;
pub mod nota_fiscal;
pub mod picole;
pub mod revendedor;

use picole_core::model::{
    AditivoNutritivoPicole, ConservantePicole, Ingrediente, IngredientePicole, LoteNotaFiscal,
    Sabor, TipoEmbalagem, TipoPicole,
};

pub use aditivo_nutritivo::AditivoNutritivoRepo;
pub use association::AssociationRepo;
pub use conservante::ConservanteRepo;
pub use lookup::LookupRepo;
pub use lote::LoteRepo;
pub use nota_fiscal::{NotaFiscalChanges, NotaFiscalRepo};
pub use picole::{PicoleChanges, PicoleRepo};
pub use revendedor::{RevendedorChanges, RevendedorRepo};

pub type SaborRepo = LookupRepo<Sabor>;
pub type TipoPicoleRepo = LookupRepo<TipoPicole>;
pub type TipoEmbalagemRepo = LookupRepo<TipoEmbalagem>;
pub type IngredienteRepo = LookupRepo<Ingrediente>;

pub type LoteNotaFiscalRepo = AssociationRepo<LoteNotaFiscal>;
pub type IngredientePicoleRepo = AssociationRepo<IngredientePicole>;
pub type ConservantePicoleRepo = AssociationRepo<ConservantePicole>;
pub type AditivoNutritivoPicoleRepo = AssociationRepo<AditivoNutritivoPicole>;
