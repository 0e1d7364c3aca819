use grim_core::DomainTag;
use grim_core::coerce::{
    ensure_array, ensure_string_array, first_opt_string, first_string, first_string_array,
    first_value,
};
use grim_core::entities::{ArcAct, ArcCharacter, StoryArcRecord};
use serde_json::Value;

use super::common::FieldView;
use super::{ASSUMPTIONS, SOURCES_USED};
use crate::field_map::{SCHEMA_VERSION_VARIANTS, map_fields};

const TITLE: &[&str] = &["title", "name", "arc_name"];
const PREMISE: &[&str] = &["premise", "summary", "logline"];
const THEME: &[&str] = &["theme", "themes"];
const ACTS: &[&str] = &["acts", "stages", "parts"];
const CHARACTERS: &[&str] = &["characters", "cast", "key_characters", "npcs"];
const CONFLICTS: &[&str] = &["conflicts", "conflict"];
const HOOKS: &[&str] = &["hooks", "plot_hooks", "adventure_hooks"];
const CLIMAX: &[&str] = &["climax"];
const RESOLUTION: &[&str] = &["resolution", "ending"];
const REWARDS: &[&str] = &["rewards", "treasure"];

pub(super) const FIELDS: &[&[&str]] = &[
    TITLE,
    PREMISE,
    THEME,
    ACTS,
    CHARACTERS,
    CONFLICTS,
    HOOKS,
    CLIMAX,
    RESOLUTION,
    REWARDS,
    SOURCES_USED,
    ASSUMPTIONS,
    SCHEMA_VERSION_VARIANTS,
];

#[must_use]
pub fn normalize_story_arc(raw: &Value) -> StoryArcRecord {
    let mapped = map_fields(DomainTag::StoryArc, raw).mapped;
    let view = FieldView::new(&mapped);

    StoryArcRecord {
        title: view.string(TITLE),
        premise: view.string(PREMISE),
        theme: view.text(THEME),
        acts: first_value(&mapped, ACTS).map(acts).unwrap_or_default(),
        characters: first_value(&mapped, CHARACTERS).map(characters).unwrap_or_default(),
        conflicts: view.strings(CONFLICTS),
        hooks: view.strings(HOOKS),
        climax: view.string(CLIMAX),
        resolution: view.string(RESOLUTION),
        rewards: view.strings(REWARDS),
        sources_used: first_string_array(&mapped, SOURCES_USED),
        assumptions: first_string_array(&mapped, ASSUMPTIONS),
        schema_version: first_opt_string(&mapped, &["schema_version"]),
    }
}

fn acts(value: &Value) -> Vec<ArcAct> {
    ensure_array(value)
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => {
                let beats = first_value(map, &["beats", "events", "scenes"]);
                Some(ArcAct {
                    name: first_string(map, &["name", "title"]),
                    summary: first_string(map, &["summary", "description"]),
                    beats: beats.map(ensure_string_array).unwrap_or_default(),
                })
            }
            Value::String(s) if !s.trim().is_empty() => Some(ArcAct {
                summary: s.trim().to_string(),
                ..ArcAct::default()
            }),
            _ => None,
        })
        .filter(|act| !act.name.is_empty() || !act.summary.is_empty() || !act.beats.is_empty())
        .collect()
}

fn characters(value: &Value) -> Vec<ArcCharacter> {
    ensure_array(value)
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(ArcCharacter {
                name: first_string(map, &["name"]),
                role: first_string(map, &["role", "function"]),
                description: first_string(map, &["description", "summary"]),
                goals: first_string_array(map, &["goals", "motivations", "goal"]),
            }),
            Value::String(s) => Some(ArcCharacter {
                name: s.trim().to_string(),
                ..ArcCharacter::default()
            }),
            _ => None,
        })
        .filter(|c| !c.name.is_empty())
        .collect()
}
