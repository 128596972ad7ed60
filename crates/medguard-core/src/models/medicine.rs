//! Knowledge base medicine records.

use serde::{Deserialize, Serialize};

/// Warning stored when no intra-medicine component pair is a known interaction.
pub const NO_KNOWN_INTERACTION: &str = "No known interaction";

/// Side-effect entry stored when none of the components has indexed side effects.
pub const NO_MAJOR_SIDE_EFFECTS: &str = "No major side effects known";

/// One enriched medicine in the knowledge base.
///
/// `name` is the unique key. `components` and `side_effects` are sorted and
/// deduplicated so records built from identical input are identical.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medicine {
    /// Normalized brand/product name
    pub name: String,
    /// Normalized manufacturer name (empty when the catalog has none)
    pub manufacturer: String,
    /// Active-ingredient components, sorted
    pub components: Vec<String>,
    /// Precomputed warning for interactions between this medicine's own components
    pub interaction_warning: String,
    /// Source description of the interaction named by `interaction_warning`
    #[serde(default)]
    pub interaction_description: Option<String>,
    /// Aggregated side effects of all components, sorted
    pub side_effects: Vec<String>,
}

impl Medicine {
    /// Create a medicine with no components and sentinel warning/side effects.
    pub fn new(name: String, manufacturer: String) -> Self {
        Self {
            name,
            manufacturer,
            components: Vec::new(),
            interaction_warning: NO_KNOWN_INTERACTION.to_string(),
            interaction_description: None,
            side_effects: vec![NO_MAJOR_SIDE_EFFECTS.to_string()],
        }
    }

    /// Whether the precomputed warning names an actual interaction.
    pub fn has_interaction_warning(&self) -> bool {
        self.interaction_warning != NO_KNOWN_INTERACTION
    }

    /// Whether any side effects are known for this medicine.
    pub fn has_known_side_effects(&self) -> bool {
        !self.side_effects.is_empty() && self.side_effects != [NO_MAJOR_SIDE_EFFECTS]
    }
}

/// Summary of one knowledge base build run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildStats {
    /// Catalog rows read from the source table
    pub catalog_rows: usize,
    /// Rows dropped because the name was empty after normalization
    pub dropped_rows: usize,
    /// Rows skipped because they could not be decoded
    #[serde(default)]
    pub unreadable_rows: usize,
    /// Rows whose name repeated an earlier row; the later row replaces it
    #[serde(default)]
    pub duplicate_names: usize,
    /// Distinct medicine records stored
    pub medicines: usize,
    /// Distinct known interaction pairs
    pub interaction_pairs: usize,
    /// Distinct ingredients with indexed side effects
    pub indexed_ingredients: usize,
    /// Build timestamp (RFC 3339), set when the knowledge base is stored
    pub built_at: Option<String>,
}
