//! Raw source tables and header reconciliation.
//!
//! Each of the three inputs (medicine catalog, known interactions, known side
//! effects) is a CSV table whose headers differ between data vendors. Tables are
//! loaded as loosely-typed [`RawRecord`] rows and then reconciled against the
//! rule tables in [`columns`] before any structural processing.

mod columns;
mod table;

pub use columns::*;
pub use table::*;

use thiserror::Error;

/// Source table errors.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{field}' in {kind} table")]
    MissingRequiredColumn { kind: SourceKind, field: Field },
}

pub type SourceResult<T> = Result<T, SourceError>;
