//! Declarative header reconciliation.
//!
//! Headers are matched against an ordered rule list per source kind. The first
//! rule that matches a header decides its canonical field; a header matching no
//! rule is ignored. After matching, every required field must be bound or the
//! table is rejected.

use std::collections::BTreeMap;
use std::fmt;

use super::{SourceError, SourceResult};

/// The three source tables consumed by the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Catalog,
    Interactions,
    SideEffects,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Catalog => "catalog",
            SourceKind::Interactions => "interactions",
            SourceKind::SideEffects => "side effects",
        };
        f.write_str(name)
    }
}

/// Canonical fields a source header can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Manufacturer,
    Composition,
    Drug1,
    Drug2,
    Description,
    Ingredient,
    SideEffect,
}

impl Field {
    /// Fields that bind every matching header rather than only the first.
    pub fn is_multi_column(&self) -> bool {
        matches!(self, Field::Composition)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Manufacturer => "manufacturer_name",
            Field::Composition => "composition",
            Field::Drug1 => "drug1",
            Field::Drug2 => "drug2",
            Field::Description => "interaction_description",
            Field::Ingredient => "drug_name",
            Field::SideEffect => "side_effect",
        };
        f.write_str(name)
    }
}

/// How a rule matches a cleaned (lower-cased, trimmed) header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPattern {
    Contains(&'static str),
    Exact(&'static str),
}

impl HeaderPattern {
    pub fn matches(&self, header: &str) -> bool {
        match self {
            HeaderPattern::Contains(needle) => header.contains(needle),
            HeaderPattern::Exact(name) => header == *name,
        }
    }
}

/// One `(pattern → field)` entry of a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRule {
    pub pattern: HeaderPattern,
    pub field: Field,
}

const fn rule(pattern: HeaderPattern, field: Field) -> ColumnRule {
    ColumnRule { pattern, field }
}

/// Catalog rules: `name`, `manufacturer_name`, `short_composition1`, ...
pub const CATALOG_RULES: &[ColumnRule] = &[
    rule(HeaderPattern::Exact("name"), Field::Name),
    rule(HeaderPattern::Contains("manufacturer"), Field::Manufacturer),
    rule(HeaderPattern::Contains("composition"), Field::Composition),
];

/// Interaction rules: `drug 1` / `drug_a`, `drug 2` / `drug_b`, `*interaction*`.
pub const INTERACTION_RULES: &[ColumnRule] = &[
    rule(HeaderPattern::Contains("drug 1"), Field::Drug1),
    rule(HeaderPattern::Contains("drug_a"), Field::Drug1),
    rule(HeaderPattern::Contains("drug 2"), Field::Drug2),
    rule(HeaderPattern::Contains("drug_b"), Field::Drug2),
    rule(HeaderPattern::Contains("interaction"), Field::Description),
];

/// Side-effect rules: `drug_name` (or a bare `name`), `side_effects` / `adverse*`.
pub const SIDE_EFFECT_RULES: &[ColumnRule] = &[
    rule(HeaderPattern::Contains("drug_name"), Field::Ingredient),
    rule(HeaderPattern::Exact("name"), Field::Ingredient),
    rule(HeaderPattern::Contains("side_effects"), Field::SideEffect),
    rule(HeaderPattern::Contains("adverse"), Field::SideEffect),
];

impl SourceKind {
    /// Ordered rule table for this source.
    pub fn rules(&self) -> &'static [ColumnRule] {
        match self {
            SourceKind::Catalog => CATALOG_RULES,
            SourceKind::Interactions => INTERACTION_RULES,
            SourceKind::SideEffects => SIDE_EFFECT_RULES,
        }
    }

    /// Fields that must be bound after reconciliation.
    pub fn required_fields(&self) -> &'static [Field] {
        match self {
            SourceKind::Catalog => &[Field::Name, Field::Composition],
            SourceKind::Interactions => &[Field::Drug1, Field::Drug2],
            SourceKind::SideEffects => &[Field::Ingredient, Field::SideEffect],
        }
    }
}

/// Canonical field → column indices, produced once per table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: BTreeMap<Field, Vec<usize>>,
}

impl ColumnMapping {
    /// Match `headers` against `rules` without validating required fields.
    pub fn from_rules(headers: &[String], rules: &[ColumnRule]) -> Self {
        let mut columns: BTreeMap<Field, Vec<usize>> = BTreeMap::new();

        for (index, header) in headers.iter().enumerate() {
            let Some(rule) = rules.iter().find(|r| r.pattern.matches(header)) else {
                continue;
            };
            let bound = columns.entry(rule.field).or_default();
            if bound.is_empty() || rule.field.is_multi_column() {
                bound.push(index);
            }
        }

        Self { columns }
    }

    /// Match and validate `headers` for a source kind.
    pub fn reconcile(kind: SourceKind, headers: &[String]) -> SourceResult<Self> {
        let mapping = Self::from_rules(headers, kind.rules());

        for &field in kind.required_fields() {
            if !mapping.has(field) {
                return Err(SourceError::MissingRequiredColumn { kind, field });
            }
        }

        Ok(mapping)
    }

    /// Whether at least one column is bound to `field`.
    pub fn has(&self, field: Field) -> bool {
        self.columns.get(&field).is_some_and(|c| !c.is_empty())
    }

    /// First column bound to `field`.
    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).and_then(|c| c.first().copied())
    }

    /// All columns bound to `field`, in header order.
    pub fn columns(&self, field: Field) -> &[usize] {
        self.columns.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }
}
