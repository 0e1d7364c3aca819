//! The `{type, data}` envelope a canonical record travels in.
//!
//! Content blocks embed this as `metadata.structuredContent`. The `type`
//! string is always the [`DomainTag`] serialization of the variant.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    EncounterRecord, GenericRecord, ItemRecord, LocationRecord, MonsterRecord, NpcRecord,
    StoryArcRecord, WritingRecord,
};
use crate::enums::DomainTag;

/// A canonical record tagged with its domain.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum StructuredContent {
    Npc(NpcRecord),
    Monster(MonsterRecord),
    Item(ItemRecord),
    Location(LocationRecord),
    StoryArc(StoryArcRecord),
    Encounter(EncounterRecord),
    Writing(WritingRecord),
    #[serde(rename = "text")]
    Generic(GenericRecord),
}

impl StructuredContent {
    #[must_use]
    pub const fn domain(&self) -> DomainTag {
        match self {
            Self::Npc(_) => DomainTag::Npc,
            Self::Monster(_) => DomainTag::Monster,
            Self::Item(_) => DomainTag::Item,
            Self::Location(_) => DomainTag::Location,
            Self::StoryArc(_) => DomainTag::StoryArc,
            Self::Encounter(_) => DomainTag::Encounter,
            Self::Writing(_) => DomainTag::Writing,
            Self::Generic(_) => DomainTag::Generic,
        }
    }

    /// The record's own name or title, which may be empty.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Npc(r) => &r.name,
            Self::Monster(r) => &r.name,
            Self::Item(r) => &r.name,
            Self::Location(r) => &r.name,
            Self::StoryArc(r) => &r.title,
            Self::Encounter(r) => &r.title,
            Self::Writing(r) => &r.title,
            Self::Generic(r) => &r.title,
        }
    }

    /// The schema-version marker carried by the record, if any.
    #[must_use]
    pub fn schema_version(&self) -> Option<&str> {
        match self {
            Self::Npc(r) => r.schema_version.as_deref(),
            Self::Monster(r) => r.schema_version.as_deref(),
            Self::Item(r) => r.schema_version.as_deref(),
            Self::Location(r) => r.schema_version.as_deref(),
            Self::StoryArc(r) => r.schema_version.as_deref(),
            Self::Encounter(r) => r.schema_version.as_deref(),
            Self::Writing(r) => r.schema_version.as_deref(),
            Self::Generic(_) => None,
        }
    }

    /// The record alone (the `data` half of the envelope) as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the record cannot be serialized.
    pub fn data_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Npc(r) => serde_json::to_value(r),
            Self::Monster(r) => serde_json::to_value(r),
            Self::Item(r) => serde_json::to_value(r),
            Self::Location(r) => serde_json::to_value(r),
            Self::StoryArc(r) => serde_json::to_value(r),
            Self::Encounter(r) => serde_json::to_value(r),
            Self::Writing(r) => serde_json::to_value(r),
            Self::Generic(r) => serde_json::to_value(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_uses_domain_tag_names() {
        let content = StructuredContent::Generic(GenericRecord {
            title: "Notes".into(),
            content: "hello".into(),
        });
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["type"], json!("text"));
        assert_eq!(value["data"]["content"], json!("hello"));
        assert_eq!(content.domain().as_str(), "text");
    }

    #[test]
    fn story_arc_tag_is_snake_case() {
        let content = StructuredContent::StoryArc(StoryArcRecord::default());
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["type"], json!(DomainTag::StoryArc.as_str()));
    }
}
