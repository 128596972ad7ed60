//! Query path over a built knowledge base.

mod detector;

pub use detector::*;

use log::debug;
use thiserror::Error;

use crate::db::Database;
use crate::models::InteractionCheck;
use crate::pipeline::normalize;

/// Query errors.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Resolves requested medicine names and runs the detector.
pub struct InteractionChecker<'a> {
    db: &'a Database,
}

impl<'a> InteractionChecker<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Check the requested medicines against each other.
    ///
    /// Names are normalized the same way the build normalizes catalog names.
    /// If fewer than two resolve, the check is rejected with a user-facing
    /// message and the detector is not run.
    pub fn check<S: AsRef<str>>(&self, names: &[S]) -> QueryResult<InteractionCheck> {
        let normalized: Vec<String> = names.iter().map(|n| normalize(n.as_ref())).collect();
        let medicines = self.db.get_multiple_drugs(normalized.as_slice())?;

        if medicines.len() < 2 {
            debug!(
                "Rejecting interaction check: {} of {} medicines found",
                medicines.len(),
                names.len()
            );
            return Ok(InteractionCheck::insufficient_medicines());
        }

        Ok(InteractionCheck::Checked {
            medicines_checked: names.iter().map(|n| n.as_ref().to_string()).collect(),
            interactions: detect(&medicines),
        })
    }
}
