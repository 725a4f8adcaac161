//! Property tests for identifier sanitizing.

use objgen_core::Identifier;
use proptest::prelude::*;

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(name in ".*") {
        let once = Identifier::sanitize(&name);
        let twice = Identifier::sanitize(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sanitize_yields_c_identifier(name in ".*") {
        let id = Identifier::sanitize(&name);
        prop_assert!(is_c_identifier(id.as_str()), "not an identifier: {:?}", id);
        prop_assert!(!id.as_str().starts_with('_'));
        prop_assert!(!id.as_str().ends_with('_'));
        prop_assert!(!id.as_str().contains("__"));
    }

    #[test]
    fn case_variants_stay_identifiers(name in "[ -~]{0,40}") {
        let id = Identifier::sanitize(&name);
        prop_assert!(is_c_identifier(&id.to_upper_snake()));
        prop_assert!(is_c_identifier(&id.to_lower_snake()));
        prop_assert_eq!(id.to_upper_snake().to_lowercase(), id.to_lower_snake());
    }

    #[test]
    fn alphanumeric_names_keep_their_letters(name in "[A-Za-z][A-Za-z0-9]{0,20}") {
        let sanitized = Identifier::sanitize(&name);
        prop_assert_eq!(sanitized.as_str(), name.as_str());
    }
}
