//! Dependent-table discovery
//!
//! Answers "which tables hold a foreign key to this one?" from the live
//! schema, so the answer stays right when tables are added.

use rusqlite::Connection;

use crate::errors::{from_rusqlite, Result};

/// Tables whose foreign keys reference `table`, sorted and de-duplicated
///
/// Unknown tables yield an empty list.
pub fn tables_referencing(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT DISTINCT m.name
             FROM sqlite_master AS m
             JOIN pragma_foreign_key_list(m.name) AS fk
             WHERE m.type = 'table' AND fk.\"table\" = ?1 COLLATE NOCASE
             ORDER BY m.name",
        )
        .map_err(from_rusqlite)?;

    let tables = stmt
        .query_map([table], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;

    fn setup_test_db() -> Connection {
        let mut conn = crate::db::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_picole_dependents() {
        let conn = setup_test_db();
        assert_eq!(
            tables_referencing(&conn, "picole").unwrap(),
            vec![
                "aditivo_nutritivo_picole",
                "conservante_picole",
                "ingrediente_picole",
                "lote",
            ]
        );
    }

    #[test]
    fn test_sabor_dependents() {
        let conn = setup_test_db();
        assert_eq!(tables_referencing(&conn, "sabor").unwrap(), vec!["picole"]);
    }

    #[test]
    fn test_leaf_and_unknown_tables_have_none() {
        let conn = setup_test_db();
        assert!(tables_referencing(&conn, "lote_nota_fiscal").unwrap().is_empty());
        assert!(tables_referencing(&conn, "no_such_table").unwrap().is_empty());
    }
}
