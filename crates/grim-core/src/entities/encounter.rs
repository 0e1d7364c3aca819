use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A group of identical combatants in an encounter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EncounterMonster {
    pub name: String,
    #[schemars(range(min = 1))]
    pub count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Canonical record for a combat or social encounter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EncounterRecord {
    #[schemars(length(min = 1))]
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub setting: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_level: Option<i64>,
    pub monsters: Vec<EncounterMonster>,
    pub objectives: Vec<String>,
    pub tactics: String,
    pub terrain: Vec<String>,
    pub treasure: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp_budget: Option<i64>,
    pub sources_used: Vec<String>,
    pub assumptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}
