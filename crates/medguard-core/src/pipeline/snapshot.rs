//! Read-only reference data for one build run.

use log::{info, warn};

use crate::sources::{Field, SourceKind, SourceTable};

use super::{BuildResult, CatalogOptions, InteractionCatalog, SideEffectIndex};

/// Interaction catalog and side-effect index, built once and then only read.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    catalog: InteractionCatalog,
    side_effects: SideEffectIndex,
}

impl ReferenceSnapshot {
    pub fn new(catalog: InteractionCatalog, side_effects: SideEffectIndex) -> Self {
        Self {
            catalog,
            side_effects,
        }
    }

    /// Reconcile both reference tables and build the snapshot.
    ///
    /// Fails if either table lacks a required column.
    pub fn from_tables(
        interactions: &SourceTable,
        side_effects: &SourceTable,
        options: CatalogOptions,
    ) -> BuildResult<Self> {
        let interactions = interactions.reconcile(SourceKind::Interactions)?;
        let side_effect_rows = side_effects.reconcile(SourceKind::SideEffects)?;

        let mut catalog = InteractionCatalog::new(options);
        let mut skipped = 0;
        for row in interactions.rows() {
            match (row.get(Field::Drug1), row.get(Field::Drug2)) {
                (Some(a), Some(b)) => {
                    catalog.insert(a, b, row.get(Field::Description));
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("Skipped {} interaction rows with a missing drug", skipped);
        }

        let mut index = SideEffectIndex::new();
        let mut skipped = 0;
        for row in side_effect_rows.rows() {
            match (row.get(Field::Ingredient), row.get(Field::SideEffect)) {
                (Some(ingredient), Some(effect)) => {
                    index.insert(ingredient, effect);
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("Skipped {} side-effect rows with a missing value", skipped);
        }

        info!(
            "Reference snapshot: {} interaction pairs, {} ingredients with side effects",
            catalog.len(),
            index.len()
        );

        Ok(Self::new(catalog, index))
    }

    pub fn catalog(&self) -> &InteractionCatalog {
        &self.catalog
    }

    pub fn side_effects(&self) -> &SideEffectIndex {
        &self.side_effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::BuildError;
    use crate::sources::{RawRecord, SourceError};

    fn table(headers: &[&str], rows: &[&[&str]]) -> SourceTable {
        SourceTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter().map(|r| RawRecord::from_cells(r.iter())).collect(),
        )
    }

    #[test]
    fn test_from_tables() {
        let interactions = table(
            &["Drug 1", "Drug 2", "Interaction Description"],
            &[
                &["Aspirin", "Warfarin", "Bleeding risk"],
                &["Ibuprofen", "", "incomplete"],
            ],
        );
        let side_effects = table(
            &["drug_name", "side_effects"],
            &[&["Aspirin", "Nausea"], &["aspirin", "Tinnitus"], &["", "orphan"]],
        );

        let snapshot =
            ReferenceSnapshot::from_tables(&interactions, &side_effects, CatalogOptions::default())
                .unwrap();

        assert_eq!(snapshot.catalog().len(), 1);
        assert!(snapshot.catalog().contains("warfarin", "aspirin"));
        assert_eq!(
            snapshot.catalog().description("aspirin", "warfarin"),
            Some("Bleeding risk")
        );
        assert_eq!(snapshot.side_effects().lookup("aspirin").len(), 2);
        assert_eq!(snapshot.side_effects().len(), 1);
    }

    #[test]
    fn test_missing_side_effect_column_is_fatal() {
        let interactions = table(&["drug_a", "drug_b"], &[]);
        let side_effects = table(&["drug_name", "severity"], &[]);

        let err =
            ReferenceSnapshot::from_tables(&interactions, &side_effects, CatalogOptions::default())
                .unwrap_err();

        assert!(matches!(
            err,
            BuildError::Source(SourceError::MissingRequiredColumn {
                kind: SourceKind::SideEffects,
                field: Field::SideEffect,
            })
        ));
    }
}
