//! Cross-cutting error types for Grimoire.
//!
//! Mapping and validation outcomes are reported as data by `grim-ingest` and
//! `grim-pipeline`; this enum only covers failures that callers cannot
//! recover from locally.

use thiserror::Error;

/// Errors that can be raised by any Grimoire crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A domain tag string did not name a known domain.
    #[error("Unknown domain tag: {0}")]
    UnknownDomain(String),

    /// A canonical record could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
