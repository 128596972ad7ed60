//! Interaction pair and interaction check models.

use serde::{Deserialize, Serialize};

/// User-facing message returned when fewer than two medicines were resolved.
pub const INSUFFICIENT_MEDICINES: &str = "At least two medicines required";

/// An unordered pair of ingredients known to interact.
///
/// Always stored in canonical (sorted) order, so `(a, b)` and `(b, a)` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InteractionPair(String, String);

impl InteractionPair {
    /// Create a pair in canonical order. Inputs are taken as already normalized.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The lexicographically smaller ingredient.
    pub fn first(&self) -> &str {
        &self.0
    }

    /// The lexicographically larger ingredient.
    pub fn second(&self) -> &str {
        &self.1
    }

    /// Whether both sides name the same ingredient.
    pub fn is_self_pair(&self) -> bool {
        self.0 == self.1
    }

    /// Human-readable warning text, e.g. "aspirin interacts with warfarin".
    pub fn warning(&self) -> String {
        format!("{} interacts with {}", self.0, self.1)
    }
}

/// Outcome of an interaction check request.
///
/// A rejected request is a normal result carrying a user-facing message,
/// not a failure of the check itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InteractionCheck {
    /// Fewer than two of the requested medicines were found.
    Rejected { error: String },
    /// The detector ran over the resolved medicines.
    Checked {
        medicines_checked: Vec<String>,
        interactions: Vec<String>,
    },
}

impl InteractionCheck {
    /// Rejection for the two-medicine precondition.
    pub fn insufficient_medicines() -> Self {
        InteractionCheck::Rejected {
            error: INSUFFICIENT_MEDICINES.to_string(),
        }
    }

    /// Whether the request was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, InteractionCheck::Rejected { .. })
    }
}
