use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::primitives::{AbilityScores, ArmorClass, Feature, HitPoints, ScoredEntry};

/// Canonical record for a monster stat block.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MonsterRecord {
    #[schemars(length(min = 1))]
    pub name: String,
    pub size: String,
    pub creature_type: String,
    pub subtype: String,
    pub alignment: String,
    pub description: String,
    /// `0` when the producer's value could not be parsed.
    pub armor_class: ArmorClass,
    /// `average` is `0` when the producer's value could not be parsed.
    pub hit_points: HitPoints,
    pub speed: String,
    pub ability_scores: AbilityScores,
    pub saving_throws: Vec<ScoredEntry>,
    pub skills: Vec<ScoredEntry>,
    pub damage_resistances: Vec<String>,
    pub damage_immunities: Vec<String>,
    pub damage_vulnerabilities: Vec<String>,
    pub condition_immunities: Vec<String>,
    pub senses: Vec<String>,
    pub languages: Vec<String>,
    pub challenge_rating: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_bonus: Option<i64>,
    pub abilities: Vec<Feature>,
    pub actions: Vec<Feature>,
    pub bonus_actions: Vec<Feature>,
    pub reactions: Vec<Feature>,
    pub legendary_actions: Vec<Feature>,
    pub lair_actions: Vec<Feature>,
    pub tactics: String,
    pub habitat: String,
    pub sources_used: Vec<String>,
    pub assumptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}

impl Default for MonsterRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            size: String::new(),
            creature_type: String::new(),
            subtype: String::new(),
            alignment: String::new(),
            description: String::new(),
            armor_class: ArmorClass::Value(0),
            hit_points: HitPoints {
                average: Some(0),
                formula: None,
                notes: None,
            },
            speed: String::new(),
            ability_scores: AbilityScores::default(),
            saving_throws: Vec::new(),
            skills: Vec::new(),
            damage_resistances: Vec::new(),
            damage_immunities: Vec::new(),
            damage_vulnerabilities: Vec::new(),
            condition_immunities: Vec::new(),
            senses: Vec::new(),
            languages: Vec::new(),
            challenge_rating: String::new(),
            experience_points: None,
            proficiency_bonus: None,
            abilities: Vec::new(),
            actions: Vec::new(),
            bonus_actions: Vec::new(),
            reactions: Vec::new(),
            legendary_actions: Vec::new(),
            lair_actions: Vec::new(),
            tactics: String::new(),
            habitat: String::new(),
            sources_used: Vec::new(),
            assumptions: Vec::new(),
            schema_version: None,
        }
    }
}
