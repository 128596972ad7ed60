//! Property tests for the text and pair primitives.

use proptest::prelude::*;

use medguard_core::pipeline::{normalize, ComponentExtractor, InteractionCatalog};

proptest! {
    #[test]
    fn normalize_is_idempotent(text in ".*") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_alphabet(text in ".*") {
        let normalized = normalize(&text);
        prop_assert!(normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' || c == '+'));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }

    #[test]
    fn extracted_components_are_clean(text in "[A-Za-z0-9 ()+.]{0,40}") {
        let components = ComponentExtractor::new().extract(Some(text.as_str()));

        let mut sorted = components.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(&sorted, &components);

        for component in &components {
            prop_assert!(!component.is_empty());
            prop_assert!(!component.contains('+'));
            prop_assert_eq!(component.trim(), component.as_str());
        }
    }

    #[test]
    fn catalog_lookup_is_symmetric(
        pairs in prop::collection::vec(("[a-c]{1,2}", "[a-c]{1,2}"), 0..8),
        a in "[a-c]{1,2}",
        b in "[a-c]{1,2}",
    ) {
        let catalog = InteractionCatalog::build(pairs.iter().map(|(x, y)| (x.as_str(), y.as_str())));

        prop_assert_eq!(catalog.contains(&a, &b), catalog.contains(&b, &a));
        for (x, y) in &pairs {
            prop_assert!(catalog.contains(x, y));
            prop_assert!(catalog.contains(y, x));
        }
    }
}
