//! MedGuard Core Library
//!
//! Drug interaction and side-effect knowledge base, built once from raw
//! catalog tables and then queried by medicine name.
//!
//! # Architecture
//!
//! ```text
//!  Medicine catalog   Known interactions   Known side effects
//!         │                   │                    │
//!         │           Column Reconciliation        │
//!         │                   │                    │
//!         │                   ▼                    ▼
//!         │          ┌─────────────────────────────────────┐
//!         │          │         Reference Snapshot          │
//!         │          │  Interaction Catalog (pair set)     │
//!         │          │  Side-Effect Index (ingredient →)   │
//!         │          └──────────────────┬──────────────────┘
//!         ▼                             │
//!   Normalize → Extract Components      │
//!         │                             │
//!         └────────► Dataset Builder ◄──┘
//!                          │
//!                          ▼
//!                 SQLite knowledge base
//!                          │
//!                          ▼
//!         Interaction Checker → Interaction Detector
//! ```
//!
//! # Modules
//!
//! - [`sources`]: CSV source tables and header reconciliation
//! - [`pipeline`]: Normalizer, component extractor, catalog, index, builder
//! - [`db`]: SQLite knowledge base keyed by medicine name
//! - [`query`]: Interaction checker and detector
//! - [`models`]: Domain types (Medicine, InteractionPair, BuildStats)
//! - [`export`]: Cleaned master dataset export

pub mod db;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod sources;

// Re-export commonly used types
pub use db::Database;
pub use models::{BuildStats, InteractionCheck, InteractionPair, Medicine};
pub use pipeline::{
    normalize, ComponentExtractor, DatasetBuilder, InteractionCatalog, Pipeline,
    ReferenceSnapshot, SideEffectIndex, SourceTables,
};
pub use query::{detect, InteractionChecker};
pub use sources::SourceTable;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedGuardError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Build error: {0}")]
    BuildError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for MedGuardError {
    fn from(e: db::DbError) -> Self {
        MedGuardError::DatabaseError(e.to_string())
    }
}

impl From<pipeline::BuildError> for MedGuardError {
    fn from(e: pipeline::BuildError) -> Self {
        MedGuardError::BuildError(e.to_string())
    }
}

impl From<query::QueryError> for MedGuardError {
    fn from(e: query::QueryError) -> Self {
        MedGuardError::DatabaseError(e.to_string())
    }
}

impl From<export::ExportError> for MedGuardError {
    fn from(e: export::ExportError) -> Self {
        MedGuardError::ExportError(e.to_string())
    }
}

impl From<serde_json::Error> for MedGuardError {
    fn from(e: serde_json::Error) -> Self {
        MedGuardError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedGuardError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedGuardError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a knowledge base at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<MedGuardCore>, MedGuardError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(MedGuardCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory knowledge base (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<MedGuardCore>, MedGuardError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(MedGuardCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MedGuardCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl MedGuardCore {
    // =========================================================================
    // Build Operations
    // =========================================================================

    /// Rebuild the knowledge base from the three source CSV files.
    pub fn import_sources(
        &self,
        catalog_path: String,
        interactions_path: String,
        side_effects_path: String,
    ) -> Result<FfiBuildStats, MedGuardError> {
        let sources =
            SourceTables::from_paths(&catalog_path, &interactions_path, &side_effects_path)?;
        let mut db = self.db.lock()?;
        let stats = Pipeline::new().load_into(&mut db, &sources)?;
        Ok(stats.into())
    }

    /// Stats of the stored build, if the knowledge base has been built.
    pub fn get_build_stats(&self) -> Result<Option<FfiBuildStats>, MedGuardError> {
        let db = self.db.lock()?;
        Ok(db.get_build_stats()?.map(|s| s.into()))
    }

    // =========================================================================
    // Query Operations
    // =========================================================================

    /// Get a medicine by name.
    pub fn get_medicine(&self, name: String) -> Result<Option<FfiMedicine>, MedGuardError> {
        let db = self.db.lock()?;
        let medicine = db.get_medicine(&normalize(&name))?;
        Ok(medicine.map(|m| m.into()))
    }

    /// Check the named medicines against each other.
    pub fn check_interactions(
        &self,
        names: Vec<String>,
    ) -> Result<FfiInteractionCheck, MedGuardError> {
        let db = self.db.lock()?;
        let checker = InteractionChecker::new(&db);
        let check = checker.check(names.as_slice())?;
        Ok(check.into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the knowledge base as CSV.
    pub fn export_dataset_csv(&self) -> Result<String, MedGuardError> {
        let db = self.db.lock()?;
        let exporter = export::DatasetExporter::new(&db);
        let dataset = exporter.export_all()?;
        Ok(dataset.to_csv()?)
    }

    /// Export the knowledge base as JSON.
    pub fn export_dataset_json(&self) -> Result<String, MedGuardError> {
        let db = self.db.lock()?;
        let exporter = export::DatasetExporter::new(&db);
        let dataset = exporter.export_all()?;
        Ok(dataset.to_json()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe medicine.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicine {
    pub name: String,
    pub manufacturer: String,
    pub components: Vec<String>,
    pub interaction_warning: String,
    pub interaction_description: Option<String>,
    pub side_effects: Vec<String>,
}

impl From<Medicine> for FfiMedicine {
    fn from(medicine: Medicine) -> Self {
        Self {
            name: medicine.name,
            manufacturer: medicine.manufacturer,
            components: medicine.components,
            interaction_warning: medicine.interaction_warning,
            interaction_description: medicine.interaction_description,
            side_effects: medicine.side_effects,
        }
    }
}

/// FFI-safe interaction check result.
///
/// `error` is set when the request was rejected; `interactions` is then empty.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInteractionCheck {
    pub medicines_checked: Vec<String>,
    pub interactions: Vec<String>,
    pub error: Option<String>,
}

impl From<InteractionCheck> for FfiInteractionCheck {
    fn from(check: InteractionCheck) -> Self {
        match check {
            InteractionCheck::Rejected { error } => Self {
                medicines_checked: Vec::new(),
                interactions: Vec::new(),
                error: Some(error),
            },
            InteractionCheck::Checked {
                medicines_checked,
                interactions,
            } => Self {
                medicines_checked,
                interactions,
                error: None,
            },
        }
    }
}

/// FFI-safe build statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBuildStats {
    pub catalog_rows: u32,
    pub dropped_rows: u32,
    pub unreadable_rows: u32,
    pub duplicate_names: u32,
    pub medicines: u32,
    pub interaction_pairs: u32,
    pub indexed_ingredients: u32,
    pub built_at: Option<String>,
}

impl From<BuildStats> for FfiBuildStats {
    fn from(stats: BuildStats) -> Self {
        Self {
            catalog_rows: stats.catalog_rows as u32,
            dropped_rows: stats.dropped_rows as u32,
            unreadable_rows: stats.unreadable_rows as u32,
            duplicate_names: stats.duplicate_names as u32,
            medicines: stats.medicines as u32,
            interaction_pairs: stats.interaction_pairs as u32,
            indexed_ingredients: stats.indexed_ingredients as u32,
            built_at: stats.built_at,
        }
    }
}
