//! Markdown rendering settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_heading_level() -> u8 {
    3
}

const fn default_include_stat_block() -> bool {
    true
}

/// Allowed section heading levels. Level 1 is the document title.
pub const HEADING_LEVELS: std::ops::RangeInclusive<u8> = 2..=4;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    #[serde(default = "default_heading_level")]
    pub heading_level: u8,

    #[serde(default = "default_include_stat_block")]
    pub include_stat_block: bool,
}

impl RenderConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `heading_level` is outside
    /// [`HEADING_LEVELS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if HEADING_LEVELS.contains(&self.heading_level) {
            return Ok(());
        }
        Err(ConfigError::InvalidValue {
            field: "render.heading_level".to_string(),
            reason: format!(
                "{} is outside {}..={}",
                self.heading_level,
                HEADING_LEVELS.start(),
                HEADING_LEVELS.end()
            ),
        })
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            heading_level: default_heading_level(),
            include_stat_block: default_include_stat_block(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RenderConfig::default();
        assert_eq!(config.heading_level, 3);
        assert!(config.include_stat_block);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn heading_level_bounds() {
        for (level, ok) in [(1, false), (2, true), (4, true), (5, false)] {
            let config = RenderConfig {
                heading_level: level,
                ..RenderConfig::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "{level}");
        }
    }
}
