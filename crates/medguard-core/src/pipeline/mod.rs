//! Knowledge base build pipeline.
//!
//! Pipeline: Source Tables → Normalization → Component Extraction →
//! {Interaction Catalog, Side-Effect Index} → Dataset Builder → Database

mod builder;
mod catalog;
mod extractor;
mod normalizer;
mod side_effects;
mod snapshot;

pub use builder::*;
pub use catalog::*;
pub use extractor::*;
pub use normalizer::*;
pub use side_effects::*;
pub use snapshot::*;

use std::path::Path;

use log::info;
use thiserror::Error;

use crate::db::Database;
use crate::models::BuildStats;
use crate::sources::{SourceError, SourceTable};

/// Build errors. Any of these aborts the whole run.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),
}

pub type BuildResult<T> = Result<T, BuildError>;

/// The three raw inputs of a build.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub catalog: SourceTable,
    pub interactions: SourceTable,
    pub side_effects: SourceTable,
}

impl SourceTables {
    /// Read all three tables from CSV files.
    pub fn from_paths<P: AsRef<Path>>(
        catalog: P,
        interactions: P,
        side_effects: P,
    ) -> BuildResult<Self> {
        Ok(Self {
            catalog: SourceTable::from_path(catalog)?,
            interactions: SourceTable::from_path(interactions)?,
            side_effects: SourceTable::from_path(side_effects)?,
        })
    }
}

/// Batch pipeline that coordinates a full knowledge base build.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    extractor: ComponentExtractor,
    catalog_options: CatalogOptions,
}

impl Pipeline {
    /// Create a pipeline with default extraction vocabulary and catalog options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extractor(mut self, extractor: ComponentExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_catalog_options(mut self, options: CatalogOptions) -> Self {
        self.catalog_options = options;
        self
    }

    /// Run the build in memory.
    pub fn run(&self, sources: &SourceTables) -> BuildResult<Dataset> {
        // Step 1: Reference data, immutable from here on
        let snapshot = ReferenceSnapshot::from_tables(
            &sources.interactions,
            &sources.side_effects,
            self.catalog_options,
        )?;

        // Step 2: One enriched record per distinct catalog name
        let builder = DatasetBuilder::with_extractor(&snapshot, self.extractor.clone());
        let dataset = builder.build(&sources.catalog)?;

        Ok(dataset)
    }

    /// Run the build and replace the knowledge base in `db`.
    pub fn load_into(&self, db: &mut Database, sources: &SourceTables) -> BuildResult<BuildStats> {
        let dataset = self.run(sources)?;
        let stats = db.replace_knowledge_base(&dataset.medicines, &dataset.stats)?;
        info!("Knowledge base stored: {} medicines", stats.medicines);
        Ok(stats)
    }
}
