// 🔤 Code Normalization - Canonical catalog keys from messy point codes
//
// Problem solved:
// - "li4", "LI4 ", " Li4" → "LI4"
// - "Auricular Shenmen", "ear shenmen" → "AURICULAR_SHENMEN"
// - "LR3" (alternate liver notation) → "LV3"
//
// Normalization is mechanical (trim, upper-case, spaces to underscores);
// everything point-specific lives in the alias table, so new spellings are
// one line of data, not a new code path.

/// Alias table: canonicalized spelling → catalog key.
///
/// Left side must already be in canonical form (upper-case, underscores),
/// since it is matched after the mechanical pass.
static CODE_ALIASES: &[(&str, &str)] = &[
    ("EAR_SHENMEN", "AURICULAR_SHENMEN"),
    ("LR3", "LV3"),
];

/// Reduce a raw point code to its canonical catalog key.
pub fn canonical_key(raw: &str) -> String {
    let key = raw.trim().to_uppercase().replace(' ', "_");
    for (alias, target) in CODE_ALIASES {
        if key == *alias {
            return (*target).to_string();
        }
    }
    key
}

/// The alias table, for docs and diagnostics.
pub fn aliases() -> &'static [(&'static str, &'static str)] {
    CODE_ALIASES
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AcupointCatalog;

    #[test]
    fn test_mechanical_normalization() {
        assert_eq!(canonical_key("li4"), "LI4");
        assert_eq!(canonical_key("  GB20  "), "GB20");
        assert_eq!(canonical_key("Auricular Shenmen"), "AURICULAR_SHENMEN");
        assert_eq!(canonical_key("EX-HN3"), "EX-HN3");
    }

    #[test]
    fn test_alias_resolution() {
        assert_eq!(canonical_key("ear shenmen"), "AURICULAR_SHENMEN");
        assert_eq!(canonical_key("Ear_Shenmen"), "AURICULAR_SHENMEN");
        assert_eq!(canonical_key("lr3"), "LV3");
        assert_eq!(canonical_key("LR3"), "LV3");
    }

    #[test]
    fn test_non_aliased_codes_pass_through() {
        assert_eq!(canonical_key("XX99"), "XX99");
        assert_eq!(canonical_key(""), "");
    }

    #[test]
    fn test_every_alias_targets_a_catalog_record() {
        let catalog = AcupointCatalog::new();
        for (alias, target) in aliases() {
            assert!(
                catalog.lookup(target).is_some(),
                "alias {} points at unknown key {}",
                alias,
                target
            );
        }
    }
}
