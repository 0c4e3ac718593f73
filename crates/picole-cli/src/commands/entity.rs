//! Generic read and delete commands over every table
//!
//! Usage:
//!   picole list <ENTITY>
//!   picole show <ENTITY> <ID>
//!   picole delete <ENTITY> <ID>

use clap::{Args, ValueEnum};
use picole_core::model::Record;
use picole_core::{
    AditivoNutritivo, AditivoNutritivoPicole, Conservante, ConservantePicole, Ingrediente,
    IngredientePicole, Lote, LoteNotaFiscal, NotaFiscal, Picole, PicoleError, Revendedor, Sabor,
    TipoEmbalagem, TipoPicole,
};
use picole_store::repo::{
    AditivoNutritivoPicoleRepo, AditivoNutritivoRepo, ConservantePicoleRepo, ConservanteRepo,
    IngredientePicoleRepo, IngredienteRepo, LoteNotaFiscalRepo, LoteRepo, NotaFiscalRepo,
    PicoleRepo, RevendedorRepo, SaborRepo, TipoEmbalagemRepo, TipoPicoleRepo,
};
use serde_json::Value;

use super::{open, print_json, to_json};

/// Every table the CLI can address, named as in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Entity {
    Sabor,
    TipoPicole,
    TipoEmbalagem,
    Ingrediente,
    Conservante,
    AditivoNutritivo,
    Revendedor,
    Picole,
    Lote,
    NotaFiscal,
    LoteNotaFiscal,
    IngredientePicole,
    ConservantePicole,
    AditivoNutritivoPicole,
}

// Binds `$repo` to the repository and `$model` to the record type of the
// selected entity, then evaluates `$body`.
macro_rules! with_repo {
    ($entity:expr, $repo:ident, $model:ident => $body:expr) => {
        match $entity {
            Entity::Sabor => { type $repo = SaborRepo; type $model = Sabor; $body }
            Entity::TipoPicole => { type $repo = TipoPicoleRepo; type $model = TipoPicole; $body }
            Entity::TipoEmbalagem => { type $repo = TipoEmbalagemRepo; type $model = TipoEmbalagem; $body }
            Entity::Ingrediente => { type $repo = IngredienteRepo; type $model = Ingrediente; $body }
            Entity::Conservante => { type $repo = ConservanteRepo; type $model = Conservante; $body }
            Entity::AditivoNutritivo => {
                type $repo = AditivoNutritivoRepo;
                type $model = AditivoNutritivo;
                $body
            }
            Entity::Revendedor => { type $repo = RevendedorRepo; type $model = Revendedor; $body }
            Entity::Picole => { type $repo = PicoleRepo; type $model = Picole; $body }
            Entity::Lote => { type $repo = LoteRepo; type $model = Lote; $body }
            Entity::NotaFiscal => { type $repo = NotaFiscalRepo; type $model = NotaFiscal; $body }
            Entity::LoteNotaFiscal => {
                type $repo = LoteNotaFiscalRepo;
                type $model = LoteNotaFiscal;
                $body
            }
            Entity::IngredientePicole => {
                type $repo = IngredientePicoleRepo;
                type $model = IngredientePicole;
                $body
            }
            Entity::ConservantePicole => {
                type $repo = ConservantePicoleRepo;
                type $model = ConservantePicole;
                $body
            }
            Entity::AditivoNutritivoPicole => {
                type $repo = AditivoNutritivoPicoleRepo;
                type $model = AditivoNutritivoPicole;
                $body
            }
        }
    };
}

impl Entity {
    /// SQL table name
    pub fn table(self) -> &'static str {
        with_repo!(self, _R, M => <M as Record>::TABLE)
    }

    /// Name used in error messages
    pub fn entity_name(self) -> &'static str {
        with_repo!(self, _R, M => <M as Record>::ENTITY)
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    pub entity: Entity,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub entity: Entity,
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub entity: Entity,
    pub id: i64,
}

pub fn execute_list(db: Option<&str>, args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open(db)?;
    let rows: Value = with_repo!(args.entity, R, _M => to_json(R::select_all(&conn)?)?);
    print_json(&rows)
}

pub fn execute_show(db: Option<&str>, args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open(db)?;
    let row: Option<Value> = with_repo!(args.entity, R, _M => {
        R::select_by_id(&conn, args.id)?.map(to_json).transpose()?
    });
    match row {
        Some(row) => print_json(&row),
        None => Err(PicoleError::NotFound {
            entity: args.entity.entity_name(),
            id: args.id,
        }
        .into()),
    }
}

pub fn execute_delete(db: Option<&str>, args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open(db)?;
    let deleted: Value = with_repo!(args.entity, R, _M => to_json(R::delete(&conn, args.id)?)?);
    print_json(&deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_names_match_tables() {
        for entity in Entity::value_variants() {
            let name = entity
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default();
            assert_eq!(name, entity.table());
        }
    }

    #[test]
    fn test_entity_names() {
        assert_eq!(Entity::NotaFiscal.entity_name(), "NotaFiscal");
        assert_eq!(Entity::AditivoNutritivoPicole.table(), "aditivo_nutritivo_picole");
    }
}
