//! Export module for the cleaned master dataset.

mod dataset;

pub use dataset::*;
