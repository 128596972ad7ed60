//! Component extraction from composition strings.
//!
//! "Paracetamol (500mg) + Caffeine (30mg)" → ["caffeine", "paracetamol"]
//!
//! Dosage amounts (a number followed by a unit) and dosage-form words are
//! removed from each `+`-separated piece. Per-volume doses such as
//! "125mg/5ml" are split on the slash so both amounts are removed.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalizer::normalize;

const DEFAULT_UNITS: &[&str] = &["mg", "ml", "mcg"];
const DEFAULT_FORMS: &[&str] = &["tablet", "capsule", "syrup"];

static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    dosage_pattern(DEFAULT_UNITS, DEFAULT_FORMS).expect("default dosage pattern is valid")
});

/// Builds the removal pattern; form words also match their plural.
fn dosage_pattern<S: AsRef<str>>(units: &[S], forms: &[S]) -> Result<Regex, regex::Error> {
    let alternation = |words: &[S]| {
        words
            .iter()
            .map(|w| regex::escape(w.as_ref()))
            .collect::<Vec<_>>()
            .join("|")
    };
    Regex::new(&format!(
        r"\b\d+\s*(?:{})\b|\b(?:{})s?\b",
        alternation(units),
        alternation(forms)
    ))
}

/// Splits compositions into sorted, deduplicated ingredient names.
#[derive(Debug, Clone)]
pub struct ComponentExtractor {
    units: Vec<String>,
    forms: Vec<String>,
    pattern: Regex,
}

impl Default for ComponentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentExtractor {
    /// Create an extractor with the default unit and form vocabularies.
    pub fn new() -> Self {
        Self {
            units: DEFAULT_UNITS.iter().map(|s| s.to_string()).collect(),
            forms: DEFAULT_FORMS.iter().map(|s| s.to_string()).collect(),
            pattern: DEFAULT_PATTERN.clone(),
        }
    }

    /// Extract the components of one composition field.
    pub fn extract(&self, composition: Option<&str>) -> Vec<String> {
        self.extract_all([composition])
    }

    /// Extract the union of components over several composition fields.
    pub fn extract_all<'a, I>(&self, compositions: I) -> Vec<String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut components = BTreeSet::new();
        for composition in compositions.into_iter().flatten() {
            self.collect_into(composition, &mut components);
        }
        components.into_iter().collect()
    }

    fn collect_into(&self, composition: &str, out: &mut BTreeSet<String>) {
        // The normalizer drops '/', which would fuse "125mg/5ml" into one token.
        let normalized = normalize(&composition.replace('/', " "));
        for piece in normalized.split('+') {
            let stripped = self.pattern.replace_all(piece, " ");
            let component = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
            if !component.is_empty() {
                out.insert(component);
            }
        }
    }

    /// Add a dosage unit (e.g. "gm", "iu").
    pub fn add_unit(&mut self, unit: &str) -> Result<(), regex::Error> {
        self.units.push(unit.to_lowercase());
        self.rebuild()
    }

    /// Add a dosage-form word (e.g. "injection", "drops").
    pub fn add_form(&mut self, form: &str) -> Result<(), regex::Error> {
        self.forms.push(form.to_lowercase());
        self.rebuild()
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn forms(&self) -> &[String] {
        &self.forms
    }

    fn rebuild(&mut self) -> Result<(), regex::Error> {
        self.pattern = dosage_pattern(&self.units, &self.forms)?;
        Ok(())
    }
}
