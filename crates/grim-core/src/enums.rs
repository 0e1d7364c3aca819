//! Domain tags for classified payloads.
//!
//! All tags use `snake_case` serialization. The generic fallback domain is
//! serialized as `"text"`, which is what content blocks store as their type.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// DomainTag
// ---------------------------------------------------------------------------

/// The inferred content category of a raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DomainTag {
    Npc,
    Monster,
    Item,
    Location,
    StoryArc,
    Encounter,
    Writing,
    #[serde(rename = "text")]
    Generic,
}

impl DomainTag {
    /// Every domain, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Npc,
        Self::Monster,
        Self::Item,
        Self::Location,
        Self::StoryArc,
        Self::Encounter,
        Self::Writing,
        Self::Generic,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Npc => "npc",
            Self::Monster => "monster",
            Self::Item => "item",
            Self::Location => "location",
            Self::StoryArc => "story_arc",
            Self::Encounter => "encounter",
            Self::Writing => "writing",
            Self::Generic => "text",
        }
    }

    /// Human-readable label used in rendered headings and CLI output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Npc => "NPC",
            Self::Monster => "Monster",
            Self::Item => "Item",
            Self::Location => "Location",
            Self::StoryArc => "Story Arc",
            Self::Encounter => "Encounter",
            Self::Writing => "Writing",
            Self::Generic => "Text",
        }
    }

    /// Whether this domain belongs to the tabletop RPG family.
    #[must_use]
    pub const fn is_rpg(self) -> bool {
        !matches!(self, Self::Writing | Self::Generic)
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainTag {
    type Err = CoreError;

    /// Parse a tag name. Accepts the serialized names plus a few common
    /// aliases (`character`, `creature`, `generic`, `arc`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "npc" | "character" => Ok(Self::Npc),
            "monster" | "creature" => Ok(Self::Monster),
            "item" | "artifact" => Ok(Self::Item),
            "location" | "place" => Ok(Self::Location),
            "story_arc" | "storyarc" | "arc" => Ok(Self::StoryArc),
            "encounter" | "combat" => Ok(Self::Encounter),
            "writing" | "prose" | "nonfiction" => Ok(Self::Writing),
            "text" | "generic" => Ok(Self::Generic),
            _ => Err(CoreError::UnknownDomain(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_as_str() {
        for tag in DomainTag::ALL {
            let json = serde_json::to_value(tag).unwrap();
            assert_eq!(json, serde_json::Value::String(tag.as_str().to_string()));
        }
    }

    #[test]
    fn from_str_accepts_serialized_names_and_aliases() {
        for tag in DomainTag::ALL {
            assert_eq!(tag.as_str().parse::<DomainTag>().unwrap(), tag);
        }
        assert_eq!("Story Arc".parse::<DomainTag>().unwrap(), DomainTag::StoryArc);
        assert_eq!("creature".parse::<DomainTag>().unwrap(), DomainTag::Monster);
        assert!("spaceship".parse::<DomainTag>().is_err());
    }

    #[test]
    fn rpg_family() {
        assert!(DomainTag::Monster.is_rpg());
        assert!(DomainTag::Encounter.is_rpg());
        assert!(!DomainTag::Writing.is_rpg());
        assert!(!DomainTag::Generic.is_rpg());
    }
}
