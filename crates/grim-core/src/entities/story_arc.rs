use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One act of a story arc.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArcAct {
    pub name: String,
    pub summary: String,
    pub beats: Vec<String>,
}

/// A character's part in a story arc.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArcCharacter {
    pub name: String,
    pub role: String,
    pub description: String,
    pub goals: Vec<String>,
}

/// Canonical record for a story arc.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StoryArcRecord {
    #[schemars(length(min = 1))]
    pub title: String,
    pub premise: String,
    pub theme: String,
    pub acts: Vec<ArcAct>,
    pub characters: Vec<ArcCharacter>,
    pub conflicts: Vec<String>,
    pub hooks: Vec<String>,
    pub climax: String,
    pub resolution: String,
    pub rewards: Vec<String>,
    pub sources_used: Vec<String>,
    pub assumptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}
