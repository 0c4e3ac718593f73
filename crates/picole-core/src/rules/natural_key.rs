//! Synthesized composite keys
//!
//! Dependent and join tables carry a unique text column built from their
//! foreign keys. The column is the uniqueness constraint the storage engine
//! enforces, so the format here is part of the persisted contract.

/// Key of a `picole` row: `"{sabor}_{tipo_picole}_{tipo_embalagem}"`
pub fn picole_key(sabor_fk: i64, tipo_picole_fk: i64, tipo_embalagem_fk: i64) -> String {
    format!("{}_{}_{}", sabor_fk, tipo_picole_fk, tipo_embalagem_fk)
}

/// Key of a join row: `"{left}-{right}"`, in the table's column order
pub fn pair_key(left: i64, right: i64) -> String {
    format!("{}-{}", left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picole_key_orders_sabor_tipo_picole_tipo_embalagem() {
        // tipo_picole comes before tipo_embalagem even though the columns are declared the other way
        assert_eq!(picole_key(1, 2, 3), "1_2_3");
    }

    #[test]
    fn test_pair_key_is_order_sensitive() {
        assert_eq!(pair_key(4, 9), "4-9");
        assert_ne!(pair_key(4, 9), pair_key(9, 4));
    }
}
