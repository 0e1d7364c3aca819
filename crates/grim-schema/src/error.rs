//! Schema registry and validation error types.

use std::path::PathBuf;

use grim_core::DomainTag;
use thiserror::Error;

/// Errors from schema sources and validator compilation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No active schema is published for the domain.
    #[error("no active schema for domain '{0}'")]
    NotFound(DomainTag),

    /// A schema version is not valid semver.
    #[error("invalid schema version '{version}': {source}")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    /// A published version does not supersede the active one.
    #[error("schema version {version} for '{domain}' is not newer than active {active}")]
    StaleVersion {
        domain: DomainTag,
        version: semver::Version,
        active: semver::Version,
    },

    /// The schema document itself failed to compile.
    #[error("schema for '{domain}' failed to compile: {message}")]
    Compile { domain: DomainTag, message: String },

    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
