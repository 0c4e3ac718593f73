//! Picole Core - domain model and rules for the picolé data layer
//!
//! This crate provides the storage-independent half of the system:
//! - Entity models for every table (lookups, products, batches, invoices, joins)
//! - Validation and normalization rules (trim/uppercase, money, quantities, CNPJ)
//! - Natural-key synthesis for composite uniqueness columns
//! - The error taxonomy (`PicoleError`) and the canonical error facility (`ExError`)
//! - The structured logging facility (`init`, `log_op_*` macros, test capture)

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Macros resolve schema constants through this path
#[doc(hidden)]
pub use picole_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, PicoleError, Result};
pub use model::{
    AditivoNutritivo, AditivoNutritivoPicole, Association, Conservante, ConservantePicole,
    Ingrediente, IngredientePicole, Lote, LoteNotaFiscal, NamedLookup, NotaFiscal, Picole,
    Record, Revendedor, Sabor, TipoEmbalagem, TipoPicole,
};
