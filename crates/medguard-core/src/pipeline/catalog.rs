//! Known-interaction catalog.

use std::collections::BTreeMap;

use crate::models::InteractionPair;

use super::normalizer::normalize;

/// Options applied while building the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Drop pairs whose two sides normalize to the same ingredient.
    pub exclude_self_pairs: bool,
}

/// Set of unordered ingredient pairs known to interact.
///
/// Membership is symmetric: `contains(a, b) == contains(b, a)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionCatalog {
    options: CatalogOptions,
    /// Pair → description of the first source row naming it
    pairs: BTreeMap<InteractionPair, Option<String>>,
}

impl InteractionCatalog {
    /// Create an empty catalog.
    pub fn new(options: CatalogOptions) -> Self {
        Self {
            options,
            pairs: BTreeMap::new(),
        }
    }

    /// Build a catalog from raw `(drug1, drug2)` pairs with default options.
    pub fn build<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        Self::build_with_options(pairs, CatalogOptions::default())
    }

    /// Build a catalog from raw `(drug1, drug2)` pairs.
    pub fn build_with_options<I, A, B>(pairs: I, options: CatalogOptions) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut catalog = Self::new(options);
        for (a, b) in pairs {
            catalog.insert(a.as_ref(), b.as_ref(), None);
        }
        catalog
    }

    /// Normalize and insert a pair. Returns whether a new pair was added.
    ///
    /// Pairs with an empty side are skipped, as are self-pairs when
    /// [`CatalogOptions::exclude_self_pairs`] is set.
    pub fn insert(&mut self, a: &str, b: &str, description: Option<&str>) -> bool {
        let Some(pair) = self.canonical_pair(a, b) else {
            return false;
        };
        if self.options.exclude_self_pairs && pair.is_self_pair() {
            return false;
        }
        if self.pairs.contains_key(&pair) {
            return false;
        }
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        self.pairs.insert(pair, description);
        true
    }

    /// Whether `a` and `b` are a known interacting pair, in either order.
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.canonical_pair(a, b)
            .is_some_and(|pair| self.pairs.contains_key(&pair))
    }

    /// The stored pair for `a` and `b`, if known.
    pub fn find(&self, a: &str, b: &str) -> Option<&InteractionPair> {
        let pair = self.canonical_pair(a, b)?;
        self.pairs.get_key_value(&pair).map(|(k, _)| k)
    }

    /// Source description for a known pair.
    pub fn description(&self, a: &str, b: &str) -> Option<&str> {
        self.entry(a, b).and_then(|(_, description)| description)
    }

    /// The stored pair for `a` and `b` together with its description.
    pub fn entry(&self, a: &str, b: &str) -> Option<(&InteractionPair, Option<&str>)> {
        let pair = self.canonical_pair(a, b)?;
        self.pairs
            .get_key_value(&pair)
            .map(|(k, description)| (k, description.as_deref()))
    }

    /// All pairs in canonical order.
    pub fn pairs(&self) -> impl Iterator<Item = &InteractionPair> {
        self.pairs.keys()
    }

    pub fn options(&self) -> CatalogOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn canonical_pair(&self, a: &str, b: &str) -> Option<InteractionPair> {
        let (a, b) = (normalize(a), normalize(b));
        if a.is_empty() || b.is_empty() {
            return None;
        }
        Some(InteractionPair::new(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_symmetric() {
        let catalog = InteractionCatalog::build([("Warfarin", "Aspirin")]);

        assert!(catalog.contains("aspirin", "warfarin"));
        assert!(catalog.contains("warfarin", "aspirin"));
        assert!(catalog.contains("ASPIRIN", "Warfarin "));
        assert!(!catalog.contains("aspirin", "ibuprofen"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let catalog = InteractionCatalog::build([
            ("aspirin", "warfarin"),
            ("warfarin", "aspirin"),
            ("Aspirin", "Warfarin"),
        ]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_empty_side_is_skipped() {
        let mut catalog = InteractionCatalog::default();

        assert!(!catalog.insert("aspirin", "", None));
        assert!(!catalog.insert("(*)", "warfarin", None));
        assert!(catalog.is_empty());
        assert!(!catalog.contains("aspirin", ""));
    }

    #[test]
    fn test_self_pairs_kept_by_default() {
        let catalog = InteractionCatalog::build([("digoxin", "Digoxin")]);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("digoxin", "digoxin"));
    }

    #[test]
    fn test_self_pairs_excluded_on_request() {
        let catalog = InteractionCatalog::build_with_options(
            [("digoxin", "Digoxin"), ("digoxin", "amiodarone")],
            CatalogOptions {
                exclude_self_pairs: true,
            },
        );

        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains("digoxin", "digoxin"));
        assert!(catalog.contains("amiodarone", "digoxin"));
    }

    #[test]
    fn test_first_description_wins() {
        let mut catalog = InteractionCatalog::default();
        catalog.insert("aspirin", "warfarin", Some("Increased bleeding risk"));
        catalog.insert("warfarin", "aspirin", Some("Other text"));

        assert_eq!(
            catalog.description("warfarin", "aspirin"),
            Some("Increased bleeding risk")
        );
        assert_eq!(catalog.find("warfarin", "aspirin").unwrap().first(), "aspirin");
    }

    #[test]
    fn test_pairs_iterate_in_canonical_order() {
        let catalog = InteractionCatalog::build([("b", "c"), ("b", "a")]);
        let pairs: Vec<String> = catalog.pairs().map(|p| p.warning()).collect();

        assert_eq!(pairs, vec!["a interacts with b", "b interacts with c"]);
    }
}
