//! General pipeline settings.

use grim_core::DomainTag;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Domain forced on every payload (e.g., "npc"). Empty means classify.
    #[serde(default)]
    pub default_domain: String,
}

impl GeneralConfig {
    /// The forced domain, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the name is not a known domain.
    pub fn domain_override(&self) -> Result<Option<DomainTag>, ConfigError> {
        let name = self.default_domain.trim();
        if name.is_empty() {
            return Ok(None);
        }
        name.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
            field: "general.default_domain".to_string(),
            reason: format!("unknown domain '{name}'"),
        })
    }
}
