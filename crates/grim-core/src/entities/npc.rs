use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::primitives::{
    AbilityScores, ArmorClass, ClassLevel, Feature, HitPoints, Personality, Relationship,
    ScoredEntry, SpellcastingSummary,
};

/// Canonical record for a non-player character.
///
/// Unresolvable armor class and hit points stay `None`, unlike
/// [`MonsterRecord`](super::MonsterRecord) which defaults them to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NpcRecord {
    #[schemars(length(min = 1))]
    pub name: String,
    pub title: String,
    pub race: String,
    pub role: String,
    pub alignment: String,
    pub background: String,
    pub description: String,
    pub appearance: String,
    pub personality: Personality,
    pub motivations: Vec<String>,
    pub hooks: Vec<String>,
    pub abilities: Vec<Feature>,
    pub skills: Vec<ScoredEntry>,
    pub saving_throws: Vec<ScoredEntry>,
    pub tactics: String,
    pub class_levels: Vec<ClassLevel>,
    pub ability_scores: AbilityScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_class: Option<ArmorClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_points: Option<HitPoints>,
    pub speed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_bonus: Option<i64>,
    pub challenge_rating: String,
    pub senses: Vec<String>,
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellcasting: Option<SpellcastingSummary>,
    pub equipment: Vec<String>,
    pub magic_items: Vec<String>,
    pub actions: Vec<Feature>,
    pub bonus_actions: Vec<Feature>,
    pub reactions: Vec<Feature>,
    pub legendary_actions: Vec<Feature>,
    pub relationships: Vec<Relationship>,
    /// The producer's stat block, kept verbatim for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_block: Option<serde_json::Value>,
    pub sources_used: Vec<String>,
    pub assumptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}
