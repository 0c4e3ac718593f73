//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time using include_str!

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Domain tables in creation order; every table only references tables
/// listed before it
pub const DOMAIN_TABLES: &[&str] = &[
    "sabor",
    "tipo_picole",
    "tipo_embalagem",
    "ingrediente",
    "conservante",
    "aditivo_nutritivo",
    "revendedor",
    "picole",
    "lote",
    "nota_fiscal",
    "lote_nota_fiscal",
    "ingrediente_picole",
    "conservante_picole",
    "aditivo_nutritivo_picole",
];

/// Get all embedded migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_initial_schema",
        sql: include_str!("../../migrations/001_initial_schema.sql"),
    }]
}
