//! Dataset builder: one enriched medicine per catalog row.

use std::collections::{BTreeSet, HashMap};

use log::{debug, info, warn};

use crate::models::{
    BuildStats, InteractionPair, Medicine, NO_KNOWN_INTERACTION, NO_MAJOR_SIDE_EFFECTS,
};
use crate::sources::{Field, SourceKind, SourceTable};

use super::normalizer::normalize_field;
use super::{BuildResult, ComponentExtractor, ReferenceSnapshot};

/// Medicines produced by one build, with run counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub medicines: Vec<Medicine>,
    pub stats: BuildStats,
}

/// Joins catalog rows with the reference snapshot.
pub struct DatasetBuilder<'a> {
    snapshot: &'a ReferenceSnapshot,
    extractor: ComponentExtractor,
}

impl<'a> DatasetBuilder<'a> {
    /// Create a builder with the default component extractor.
    pub fn new(snapshot: &'a ReferenceSnapshot) -> Self {
        Self::with_extractor(snapshot, ComponentExtractor::new())
    }

    pub fn with_extractor(snapshot: &'a ReferenceSnapshot, extractor: ComponentExtractor) -> Self {
        Self {
            snapshot,
            extractor,
        }
    }

    /// Build the dataset from a catalog table.
    ///
    /// Fails only if the table lacks a required column; rows with an
    /// unresolvable name are dropped. Names are unique in the result: a row
    /// repeating an earlier name replaces that record in place.
    pub fn build(&self, catalog: &SourceTable) -> BuildResult<Dataset> {
        let table = catalog.reconcile(SourceKind::Catalog)?;

        let mut medicines: Vec<Medicine> = Vec::with_capacity(table.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut dropped_rows = 0;
        let mut duplicate_names = 0;
        for (line, row) in table.rows().enumerate() {
            let compositions = row.get_all(Field::Composition);
            let Some(medicine) = self.build_medicine(
                row.get(Field::Name),
                row.get(Field::Manufacturer),
                compositions,
            ) else {
                debug!("Dropping catalog row {}: empty name", line + 1);
                dropped_rows += 1;
                continue;
            };

            match positions.get(&medicine.name).copied() {
                Some(index) => {
                    debug!("Catalog row {} repeats '{}'", line + 1, medicine.name);
                    duplicate_names += 1;
                    medicines[index] = medicine;
                }
                None => {
                    positions.insert(medicine.name.clone(), medicines.len());
                    medicines.push(medicine);
                }
            }
        }

        if dropped_rows > 0 {
            warn!("Dropped {} catalog rows without a usable name", dropped_rows);
        }
        if duplicate_names > 0 {
            warn!(
                "{} catalog rows repeated an earlier medicine name; the later row was kept",
                duplicate_names
            );
        }
        info!(
            "Built {} medicines from {} catalog rows",
            medicines.len(),
            table.len()
        );

        let stats = BuildStats {
            catalog_rows: table.len(),
            dropped_rows,
            unreadable_rows: catalog.skipped_rows(),
            duplicate_names,
            medicines: medicines.len(),
            interaction_pairs: self.snapshot.catalog().len(),
            indexed_ingredients: self.snapshot.side_effects().len(),
            built_at: None,
        };

        Ok(Dataset { medicines, stats })
    }

    /// Build one medicine. Returns `None` when the name normalizes to empty.
    pub fn build_medicine<'r, I>(
        &self,
        name: Option<&str>,
        manufacturer: Option<&str>,
        compositions: I,
    ) -> Option<Medicine>
    where
        I: IntoIterator<Item = Option<&'r str>>,
    {
        let name = normalize_field(name);
        if name.is_empty() {
            return None;
        }

        let components = self.extractor.extract_all(compositions);
        let (interaction_warning, interaction_description) =
            match self.first_interaction(&components) {
                Some((pair, description)) => (pair.warning(), description.map(str::to_string)),
                None => (NO_KNOWN_INTERACTION.to_string(), None),
            };
        let side_effects = self.side_effects(&components);

        Some(Medicine {
            name,
            manufacturer: normalize_field(manufacturer),
            components,
            interaction_warning,
            interaction_description,
            side_effects,
        })
    }

    /// Warning for the first known interaction among a medicine's own components.
    pub fn interaction_warning(&self, components: &[String]) -> String {
        self.first_interaction(components)
            .map(|(pair, _)| pair.warning())
            .unwrap_or_else(|| NO_KNOWN_INTERACTION.to_string())
    }

    /// Pairs are scanned as (i, j), i < j, over the sorted components.
    fn first_interaction(
        &self,
        components: &[String],
    ) -> Option<(&'a InteractionPair, Option<&'a str>)> {
        let catalog = self.snapshot.catalog();
        for (i, a) in components.iter().enumerate() {
            for b in &components[i + 1..] {
                if let Some(entry) = catalog.entry(a, b) {
                    return Some(entry);
                }
            }
        }
        None
    }

    /// Union of the components' side effects, sorted.
    pub fn side_effects(&self, components: &[String]) -> Vec<String> {
        let index = self.snapshot.side_effects();
        let effects: BTreeSet<&String> = components
            .iter()
            .flat_map(|component| index.lookup(component))
            .collect();

        if effects.is_empty() {
            return vec![NO_MAJOR_SIDE_EFFECTS.to_string()];
        }
        effects.into_iter().cloned().collect()
    }
}
