//! Pipeline error types.
//!
//! Mapping and validation failures are not errors here; they are reported in
//! [`ValidationOutcome`](crate::ValidationOutcome). These variants cover the
//! infrastructure underneath.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The schema source failed, or the schema would not compile.
    #[error("schema error: {0}")]
    Schema(#[from] grim_schema::SchemaError),

    /// A canonical record could not be converted to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
