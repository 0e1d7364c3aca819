//! Schema source selection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const fn default_validate_on_ingest() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchemaConfig {
    /// Directory of `<domain>.schema.json` files. Empty uses the builtin
    /// registry.
    #[serde(default)]
    pub dir: String,

    /// Validate records as part of block mapping.
    #[serde(default = "default_validate_on_ingest")]
    pub validate_on_ingest: bool,
}

impl SchemaConfig {
    #[must_use]
    pub fn directory(&self) -> Option<PathBuf> {
        let dir = self.dir.trim();
        (!dir.is_empty()).then(|| PathBuf::from(dir))
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            validate_on_ingest: default_validate_on_ingest(),
        }
    }
}
