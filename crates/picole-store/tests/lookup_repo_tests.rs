// Integration tests for the single-name lookup repositories

use picole_core::errors::PicoleError;
use picole_store::repo::{IngredienteRepo, PicoleRepo, SaborRepo, TipoEmbalagemRepo, TipoPicoleRepo};
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    let mut conn = picole_store::db::open_in_memory().unwrap();
    picole_store::migrations::apply_migrations(&mut conn).unwrap();
    conn
}

#[test]
fn test_insert_normalizes_nome() {
    let conn = setup_test_db();

    let sabor = SaborRepo::insert(&conn, " morango ").unwrap();

    assert_eq!(sabor.nome, "MORANGO");
    assert!(sabor.id > 0);
    let stored = SaborRepo::select_by_id(&conn, sabor.id).unwrap().unwrap();
    assert_eq!(stored, sabor);
}

#[test]
fn test_duplicate_nome_after_normalization() {
    let conn = setup_test_db();
    TipoEmbalagemRepo::insert(&conn, "Palito").unwrap();

    let err = TipoEmbalagemRepo::insert(&conn, "  palito").unwrap_err();

    assert_eq!(
        err,
        PicoleError::Duplicate {
            entity: "TipoEmbalagem",
            field: "nome",
            value: "PALITO".to_string()
        }
    );
}

#[test]
fn test_blank_nome_is_missing_value() {
    let conn = setup_test_db();
    let err = IngredienteRepo::insert(&conn, "   ").unwrap_err();
    assert!(matches!(err, PicoleError::MissingValue { field: "nome", .. }));
    assert!(IngredienteRepo::select_all(&conn).unwrap().is_empty());
}

#[test]
fn test_select_by_nome_normalizes_argument() {
    let conn = setup_test_db();
    let inserted = TipoPicoleRepo::insert(&conn, "ao leite").unwrap();

    let found = TipoPicoleRepo::select_by_nome(&conn, " Ao Leite ").unwrap();

    assert_eq!(found, Some(inserted));
    assert_eq!(TipoPicoleRepo::select_by_nome(&conn, "agua").unwrap(), None);
}

#[test]
fn test_malformed_lookup_arguments_are_errors() {
    let conn = setup_test_db();
    assert!(matches!(
        SaborRepo::select_by_id(&conn, 0),
        Err(PicoleError::MissingValue { .. })
    ));
    assert!(matches!(
        SaborRepo::select_by_id(&conn, -3),
        Err(PicoleError::InvalidArgument { .. })
    ));
    assert!(matches!(
        SaborRepo::select_by_nome(&conn, ""),
        Err(PicoleError::MissingValue { .. })
    ));
    assert_eq!(SaborRepo::select_by_id(&conn, 42).unwrap(), None);
}

#[test]
fn test_update_renames_and_refreshes_timestamp() {
    let conn = setup_test_db();
    let sabor = SaborRepo::insert(&conn, "uva").unwrap();

    let updated = SaborRepo::update(&conn, sabor.id, "uva verde").unwrap();

    assert_eq!(updated.nome, "UVA VERDE");
    assert_eq!(updated.data_criacao, sabor.data_criacao);
    assert!(updated.data_atualizacao >= sabor.data_atualizacao);
    assert_eq!(SaborRepo::select_by_id(&conn, sabor.id).unwrap(), Some(updated));
}

#[test]
fn test_update_missing_row_is_not_found() {
    let conn = setup_test_db();
    let err = SaborRepo::update(&conn, 99, "uva").unwrap_err();
    assert_eq!(err, PicoleError::NotFound { entity: "Sabor", id: 99 });
}

#[test]
fn test_update_into_existing_name_is_duplicate() {
    let conn = setup_test_db();
    SaborRepo::insert(&conn, "uva").unwrap();
    let manga = SaborRepo::insert(&conn, "manga").unwrap();

    let err = SaborRepo::update(&conn, manga.id, "UVA").unwrap_err();

    assert!(matches!(err, PicoleError::Duplicate { field: "nome", .. }));
    assert_eq!(SaborRepo::select_by_id(&conn, manga.id).unwrap().unwrap().nome, "MANGA");
}

#[test]
fn test_delete_unreferenced_returns_record() {
    let conn = setup_test_db();
    let sabor = SaborRepo::insert(&conn, "limao").unwrap();

    let deleted = SaborRepo::delete(&conn, sabor.id).unwrap();

    assert_eq!(deleted, sabor);
    assert_eq!(SaborRepo::select_by_id(&conn, sabor.id).unwrap(), None);
}

#[test]
fn test_delete_referenced_sabor_is_still_referenced() {
    // Given: A sabor used by a picolé
    let conn = setup_test_db();
    let sabor = SaborRepo::insert(&conn, "morango").unwrap();
    let tipo = TipoPicoleRepo::insert(&conn, "agua").unwrap();
    let embalagem = TipoEmbalagemRepo::insert(&conn, "palito").unwrap();
    PicoleRepo::insert(&conn, 3.5, sabor.id, embalagem.id, tipo.id).unwrap();

    // When: The sabor is deleted
    let err = SaborRepo::delete(&conn, sabor.id).unwrap_err();

    // Then: The delete is refused, naming the referencing table, and the row survives
    assert_eq!(
        err,
        PicoleError::StillReferenced {
            entity: "Sabor",
            id: sabor.id,
            tables: vec!["picole".to_string()]
        }
    );
    assert!(SaborRepo::select_by_id(&conn, sabor.id).unwrap().is_some());
}

#[test]
fn test_delete_missing_row_is_not_found() {
    let conn = setup_test_db();
    assert_eq!(
        SaborRepo::delete(&conn, 5).unwrap_err(),
        PicoleError::NotFound { entity: "Sabor", id: 5 }
    );
}

#[test]
fn test_out_of_range_timestamp_is_reported_not_replaced() {
    let conn = setup_test_db();
    conn.execute(
        "INSERT INTO sabor (id, nome, data_criacao, data_atualizacao) VALUES (7, 'CAJU', ?1, 0)",
        [i64::MAX],
    )
    .unwrap();

    let err = SaborRepo::select_by_id(&conn, 7).unwrap_err();

    assert!(matches!(err, PicoleError::Persistence { .. }), "got {:?}", err);
    assert!(err.to_string().contains("out of range"), "got {}", err);
}
