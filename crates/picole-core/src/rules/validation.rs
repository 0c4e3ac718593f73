//! Argument validation and normalization
//!
//! Every repository operation funnels its inputs through these helpers
//! before touching the database. Text is trimmed and uppercased; ids must be
//! positive; money is rounded to two decimals.

use crate::errors::{PicoleError, Result};

/// Maximum length of `nome` in the lookup tables and of short descriptions
pub const NOME_MAX_LEN: usize = 45;

/// Maximum length of reseller text columns
pub const REVENDEDOR_TEXT_MAX_LEN: usize = 100;

/// Exact length of a CNPJ
pub const CNPJ_LEN: usize = 14;

/// Maximum length of `nota_fiscal.numero_serie`
pub const NUMERO_SERIE_MAX_LEN: usize = 45;

/// Maximum length of `nota_fiscal.descricao`
pub const NOTA_DESCRICAO_MAX_LEN: usize = 200;

/// Trim and uppercase a text value
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalize a required text field
///
/// # Errors
/// `MissingValue` if the value is blank after trimming, `InvalidArgument` if
/// it is longer than `max_len` characters.
pub fn normalize_required(
    entity: &'static str,
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<String> {
    let normalized = normalize(value);
    if normalized.is_empty() {
        return Err(PicoleError::MissingValue { entity, field });
    }
    check_len(entity, field, &normalized, max_len)?;
    Ok(normalized)
}

/// Normalize an optional text field used by partial updates
///
/// `None` and blank strings both mean "leave unchanged" and yield `Ok(None)`.
///
/// # Errors
/// `InvalidArgument` if the normalized value is longer than `max_len`.
pub fn normalize_optional(
    entity: &'static str,
    field: &'static str,
    value: Option<&str>,
    max_len: usize,
) -> Result<Option<String>> {
    match value.map(normalize) {
        Some(v) if !v.is_empty() => {
            check_len(entity, field, &v, max_len)?;
            Ok(Some(v))
        }
        _ => Ok(None),
    }
}

fn check_len(entity: &'static str, field: &'static str, value: &str, max_len: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(PicoleError::InvalidArgument {
            entity,
            field,
            reason: format!("length {} exceeds maximum of {}", len, max_len),
        });
    }
    Ok(())
}

/// Normalize a CNPJ: trimmed, uppercased, exactly 14 characters
///
/// # Errors
/// `MissingValue` if blank, `InvalidArgument` on any other length.
pub fn normalize_cnpj(entity: &'static str, value: &str) -> Result<String> {
    let normalized = normalize(value);
    if normalized.is_empty() {
        return Err(PicoleError::MissingValue {
            entity,
            field: "cnpj",
        });
    }
    let len = normalized.chars().count();
    if len != CNPJ_LEN {
        return Err(PicoleError::InvalidArgument {
            entity,
            field: "cnpj",
            reason: format!("must have exactly {} characters, got {}", CNPJ_LEN, len),
        });
    }
    Ok(normalized)
}

/// Validate a required row id or foreign key
///
/// # Errors
/// `MissingValue` for zero (an id that was never supplied), `InvalidArgument`
/// for negative values.
pub fn require_id(entity: &'static str, field: &'static str, id: i64) -> Result<i64> {
    match id {
        0 => Err(PicoleError::MissingValue { entity, field }),
        n if n < 0 => Err(PicoleError::InvalidArgument {
            entity,
            field,
            reason: format!("must be a positive integer, got {}", n),
        }),
        n => Ok(n),
    }
}

/// Validate an optional foreign key of a partial update
///
/// # Errors
/// Same as [`require_id`] when a value is supplied.
pub fn optional_id(entity: &'static str, field: &'static str, id: Option<i64>) -> Result<Option<i64>> {
    id.map(|v| require_id(entity, field, v)).transpose()
}

/// Validate a monetary amount and round it to two decimals
///
/// # Errors
/// `InvalidArgument` for NaN, infinities and negative amounts.
pub fn money(entity: &'static str, field: &'static str, value: f64) -> Result<f64> {
    let rounded = (value * 100.0).round() / 100.0;
    // huge amounts overflow to infinity while scaling
    if !value.is_finite() || !rounded.is_finite() || value < 0.0 {
        return Err(PicoleError::InvalidArgument {
            entity,
            field,
            reason: format!("must be a finite, non-negative amount, got {}", value),
        });
    }
    Ok(rounded)
}

/// Optional variant of [`money`] for partial updates
///
/// # Errors
/// Same as [`money`] when a value is supplied.
pub fn optional_money(entity: &'static str, field: &'static str, value: Option<f64>) -> Result<Option<f64>> {
    value.map(|v| money(entity, field, v)).transpose()
}

/// Validate a strictly positive quantity
///
/// # Errors
/// `InvalidArgument` when the quantity is zero or negative.
pub fn positive_quantity(entity: &'static str, field: &'static str, value: i64) -> Result<i64> {
    if value <= 0 {
        return Err(PicoleError::InvalidArgument {
            entity,
            field,
            reason: format!("must be greater than zero, got {}", value),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_required_trims_and_uppercases() {
        let v = normalize_required("Sabor", "nome", "  morango ", NOME_MAX_LEN).unwrap();
        assert_eq!(v, "MORANGO");
    }

    #[test]
    fn test_normalize_required_blank_is_missing() {
        let err = normalize_required("Sabor", "nome", "   ", NOME_MAX_LEN).unwrap_err();
        assert_eq!(
            err,
            PicoleError::MissingValue {
                entity: "Sabor",
                field: "nome"
            }
        );
    }

    #[test]
    fn test_normalize_required_rejects_long_text() {
        let long = "a".repeat(NOME_MAX_LEN + 1);
        let err = normalize_required("Sabor", "nome", &long, NOME_MAX_LEN).unwrap_err();
        assert!(matches!(err, PicoleError::InvalidArgument { field: "nome", .. }));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let accented = "ç".repeat(NOME_MAX_LEN);
        assert!(normalize_required("Sabor", "nome", &accented, NOME_MAX_LEN).is_ok());
    }

    #[test]
    fn test_normalize_optional_blank_means_unchanged() {
        assert_eq!(normalize_optional("Sabor", "nome", None, 10).unwrap(), None);
        assert_eq!(normalize_optional("Sabor", "nome", Some("  "), 10).unwrap(), None);
        assert_eq!(
            normalize_optional("Sabor", "nome", Some(" uva"), 10).unwrap(),
            Some("UVA".to_string())
        );
    }

    #[test]
    fn test_cnpj_length_is_exact() {
        assert_eq!(
            normalize_cnpj("Revendedor", " 12345678000199 ").unwrap(),
            "12345678000199"
        );
        assert!(matches!(
            normalize_cnpj("Revendedor", "123"),
            Err(PicoleError::InvalidArgument { field: "cnpj", .. })
        ));
        assert!(matches!(
            normalize_cnpj("Revendedor", ""),
            Err(PicoleError::MissingValue { field: "cnpj", .. })
        ));
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id("Lote", "id", 7).unwrap(), 7);
        assert!(matches!(
            require_id("Lote", "id", 0),
            Err(PicoleError::MissingValue { .. })
        ));
        assert!(matches!(
            require_id("Lote", "id", -1),
            Err(PicoleError::InvalidArgument { .. })
        ));
        assert_eq!(optional_id("Lote", "picole_fk", None).unwrap(), None);
    }

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money("Picole", "preco", 2.499).unwrap(), 2.5);
        assert_eq!(money("Picole", "preco", 0.0).unwrap(), 0.0);
        assert!(money("Picole", "preco", f64::NAN).is_err());
        assert!(money("Picole", "preco", -1.0).is_err());
    }

    #[test]
    fn test_money_rejects_amounts_that_overflow_when_rounded() {
        for value in [1e307, f64::MAX, f64::INFINITY] {
            assert!(matches!(
                money("Picole", "preco", value),
                Err(PicoleError::InvalidArgument { field: "preco", .. })
            ));
        }
        assert!(matches!(
            optional_money("NotaFiscal", "valor", Some(1e307)),
            Err(PicoleError::InvalidArgument { field: "valor", .. })
        ));
        assert_eq!(money("Picole", "preco", 1e300).map(f64::is_finite), Ok(true));
    }

    #[test]
    fn test_positive_quantity() {
        assert_eq!(positive_quantity("Lote", "quantidade", 10).unwrap(), 10);
        assert!(positive_quantity("Lote", "quantidade", 0).is_err());
        assert!(positive_quantity("Lote", "quantidade", -5).is_err());
    }
}
