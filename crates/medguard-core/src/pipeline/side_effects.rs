//! Ingredient → side-effect index.

use std::collections::{BTreeMap, BTreeSet};

use super::normalizer::normalize;

static NO_EFFECTS: BTreeSet<String> = BTreeSet::new();

/// Known side effects per normalized ingredient.
///
/// Rows for the same ingredient accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideEffectIndex {
    effects: BTreeMap<String, BTreeSet<String>>,
}

impl SideEffectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from raw `(ingredient, side_effect)` rows.
    pub fn build<I, A, B>(rows: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut index = Self::new();
        for (ingredient, effect) in rows {
            index.insert(ingredient.as_ref(), effect.as_ref());
        }
        index
    }

    /// Normalize and record one side effect. Empty values are skipped.
    pub fn insert(&mut self, ingredient: &str, effect: &str) -> bool {
        let (ingredient, effect) = (normalize(ingredient), normalize(effect));
        if ingredient.is_empty() || effect.is_empty() {
            return false;
        }
        self.effects.entry(ingredient).or_default().insert(effect)
    }

    /// Side effects of an ingredient; empty when unknown.
    pub fn lookup(&self, ingredient: &str) -> &BTreeSet<String> {
        self.effects.get(ingredient).unwrap_or(&NO_EFFECTS)
    }

    /// Number of indexed ingredients.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
