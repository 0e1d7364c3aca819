use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A structured item property, e.g. `{name: "Keen", description: "Crits on 19-20"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemProperty {
    pub name: String,
    pub description: String,
}

/// Canonical record for an item or artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemRecord {
    #[schemars(length(min = 1))]
    pub name: String,
    pub item_type: String,
    pub rarity: String,
    pub requires_attunement: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attunement_requirements: Option<String>,
    pub description: String,
    /// Flat property labels.
    pub properties: Vec<String>,
    /// Structured properties with descriptions.
    pub properties_v2: Vec<ItemProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recharge: Option<String>,
    pub weight: String,
    pub value: String,
    pub lore: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curse: Option<String>,
    pub sources_used: Vec<String>,
    pub assumptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}
