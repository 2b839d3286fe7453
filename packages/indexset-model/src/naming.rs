/// Derive the canonical physical index name from a prefix and a logical
/// suffix.
///
/// The derivation is the single source of truth for physical naming: it is
/// recomputed wherever a name is needed, never cached. The result is
/// `"{prefix}_{suffix}"` with every `-` replaced by `_`, lowercased.
pub fn derive_index_name(prefix: impl std::fmt::Display, suffix: &str) -> String {
    format!("{}_{}", prefix, suffix)
        .replace('-', "_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_derive_basic() {
        assert_eq!(derive_index_name(3, "coll1"), "3_coll1");
        assert_eq!(derive_index_name(77, "C123-Prov"), "77_c123_prov");
    }

    #[test]
    fn test_derive_lowercases_prefix_too() {
        assert_eq!(derive_index_name("Set-A", "Granules"), "set_a_granules");
    }

    proptest! {
        #[test]
        fn prop_derive_is_lowercase_and_dash_free(prefix in 1i64..1_000_000, suffix in "[A-Za-z0-9-]{1,24}") {
            let name = derive_index_name(prefix, &suffix);
            prop_assert!(!name.contains('-'));
            prop_assert_eq!(name.clone(), name.to_lowercase());
        }

        #[test]
        fn prop_derive_is_deterministic(prefix in 1i64..1_000_000, suffix in "[A-Za-z0-9-]{1,24}") {
            prop_assert_eq!(
                derive_index_name(prefix, &suffix),
                derive_index_name(prefix, &suffix)
            );
        }
    }
}
