//! Domain models for the medguard knowledge base.

mod interaction;
mod medicine;

pub use interaction::*;
pub use medicine::*;
