#![allow(clippy::unwrap_used, clippy::expect_used)]

use picole_core::errors::PicoleError;
use picole_core::rules::validation::{
    money, normalize_optional, normalize_required, NOME_MAX_LEN,
};
use proptest::prelude::*;

#[test]
fn test_morango_is_stored_uppercase() {
    assert_eq!(
        normalize_required("Sabor", "nome", " morango ", NOME_MAX_LEN).unwrap(),
        "MORANGO"
    );
}

#[test]
fn test_missing_value_names_entity_and_field() {
    let err = normalize_required("Conservante", "descricao", "\t\n", NOME_MAX_LEN).unwrap_err();
    assert_eq!(err.to_string(), "descricao of Conservante not provided");
}

proptest! {
    #[test]
    fn normalization_is_idempotent(s in "[a-zA-Z ]{1,40}") {
        if let Ok(once) = normalize_required("Sabor", "nome", &s, NOME_MAX_LEN) {
            let twice = normalize_required("Sabor", "nome", &once, NOME_MAX_LEN).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalized_text_has_no_outer_whitespace(s in "\\PC{0,40}") {
        match normalize_required("Sabor", "nome", &s, 200) {
            Ok(v) => {
                prop_assert_eq!(v.trim(), v.as_str());
                prop_assert!(!v.is_empty());
            }
            Err(e) => {
                let expected = matches!(
                    e,
                    PicoleError::MissingValue { .. } | PicoleError::InvalidArgument { .. }
                );
                prop_assert!(expected, "unexpected error {:?}", e);
            }
        }
    }

    #[test]
    fn blank_optional_is_unchanged(ws in "[ \\t]{0,10}") {
        prop_assert_eq!(normalize_optional("Sabor", "nome", Some(&ws), NOME_MAX_LEN).unwrap(), None);
    }

    #[test]
    fn money_has_at_most_two_decimals(cents in 0u32..10_000_000u32, extra in 0.0f64..0.0049) {
        let value = f64::from(cents) / 100.0 + extra;
        let rounded = money("Picole", "preco", value).unwrap();
        prop_assert!((rounded * 100.0 - (rounded * 100.0).round()).abs() < 1e-6);
        prop_assert!((rounded - f64::from(cents) / 100.0).abs() < 0.006);
    }

    #[test]
    fn money_is_never_infinite(value in 0.0f64..f64::MAX) {
        if let Ok(rounded) = money("NotaFiscal", "valor", value) {
            prop_assert!(rounded.is_finite());
        }
    }
}
