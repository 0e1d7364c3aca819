use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fallback record for payloads that match no domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenericRecord {
    pub title: String,
    pub content: String,
}
