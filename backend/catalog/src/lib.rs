//! `garden-catalog` — the immutable tables behind every garden response.
//!
//! Provides:
//! - State display metadata for the eight emotional states
//! - The `(from, to)` transition table and its generic fallback
//! - Per-state response pools and follow-up prompts
//! - YAML loading, with a default catalog embedded in the binary
//! - Validation with a report of errors and warnings

pub mod catalog;
pub mod validation;

pub use catalog::{Catalog, CatalogError, EMBEDDED_CATALOG};
pub use validation::{validate, CatalogIssue, ValidationReport};
