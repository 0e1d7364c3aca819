use std::sync::LazyLock;

use grim_core::DomainTag;
use grim_core::coerce::{
    ensure_array, first_integer, first_opt_string, first_string, first_string_array, first_value,
    split_list,
};
use grim_core::entities::{EncounterMonster, EncounterRecord};
use regex::Regex;
use serde_json::Value;

use super::common::{FieldView, normalize_challenge_rating};
use super::{ASSUMPTIONS, SOURCES_USED};
use crate::field_map::{SCHEMA_VERSION_VARIANTS, map_fields};

/// `3x Goblin`, `3 × Goblin`, `3 Goblins`.
static LEADING_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*[x×]?\s+(.+?)\s*$").expect("pattern is valid"));

/// `Goblin x3`, `Goblin (3)`.
static TRAILING_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.+?)\s*(?:[x×]\s*(\d+)|\((\d+)\))\s*$").expect("pattern is valid"));

const TITLE: &[&str] = &["title", "name", "encounter_name"];
const DESCRIPTION: &[&str] = &["description", "summary"];
const DIFFICULTY: &[&str] = &["difficulty"];
const SETTING: &[&str] = &["setting", "location"];
const PARTY_LEVEL: &[&str] = &["party_level", "recommended_level", "level"];
const MONSTERS: &[&str] = &["monsters", "enemies", "creatures", "combatants"];
const OBJECTIVES: &[&str] = &["objectives", "goals"];
const TACTICS: &[&str] = &["tactics"];
const TERRAIN: &[&str] = &["terrain", "terrain_features"];
const TREASURE: &[&str] = &["treasure", "loot", "rewards"];
const XP_BUDGET: &[&str] = &["xp_budget", "total_xp", "xp"];

pub(super) const FIELDS: &[&[&str]] = &[
    TITLE,
    DESCRIPTION,
    DIFFICULTY,
    SETTING,
    PARTY_LEVEL,
    MONSTERS,
    OBJECTIVES,
    TACTICS,
    TERRAIN,
    TREASURE,
    XP_BUDGET,
    SOURCES_USED,
    ASSUMPTIONS,
    SCHEMA_VERSION_VARIANTS,
];

#[must_use]
pub fn normalize_encounter(raw: &Value) -> EncounterRecord {
    let mapped = map_fields(DomainTag::Encounter, raw).mapped;
    let view = FieldView::new(&mapped);

    EncounterRecord {
        title: view.string(TITLE),
        description: view.string(DESCRIPTION),
        difficulty: view.string(DIFFICULTY),
        setting: view.text(SETTING),
        party_level: view.integer(PARTY_LEVEL),
        monsters: first_value(&mapped, MONSTERS).map(monsters).unwrap_or_default(),
        objectives: view.strings(OBJECTIVES),
        tactics: view.text(TACTICS),
        terrain: view.strings(TERRAIN),
        treasure: view.strings(TREASURE),
        xp_budget: view.integer(XP_BUDGET),
        sources_used: first_string_array(&mapped, SOURCES_USED),
        assumptions: first_string_array(&mapped, ASSUMPTIONS),
        schema_version: first_opt_string(&mapped, &["schema_version"]),
    }
}

fn monsters(value: &Value) -> Vec<EncounterMonster> {
    let items: Vec<Value> = match value {
        Value::String(_) => split_list(value).into_iter().map(Value::String).collect(),
        other => ensure_array(other).to_vec(),
    };
    items.iter().filter_map(monster_entry).collect()
}

fn monster_entry(item: &Value) -> Option<EncounterMonster> {
    let entry = match item {
        Value::Object(map) => EncounterMonster {
            name: first_string(map, &["name", "monster", "creature"]),
            count: first_integer(map, &["count", "quantity", "number", "qty"]).unwrap_or(1),
            challenge_rating: Some(normalize_challenge_rating(first_value(map, &["challenge_rating", "cr"])))
                .filter(|cr| !cr.is_empty()),
            notes: first_opt_string(map, &["notes", "role", "tactics"]),
        },
        Value::String(s) => parse_counted(s),
        _ => return None,
    };
    (!entry.name.is_empty()).then(|| EncounterMonster {
        count: entry.count.max(1),
        ..entry
    })
}

fn parse_counted(s: &str) -> EncounterMonster {
    let (name, count) = if let Some(caps) = LEADING_COUNT_RE.captures(s) {
        (caps[2].to_string(), caps[1].parse::<i64>().unwrap_or(1))
    } else if let Some(caps) = TRAILING_COUNT_RE.captures(s) {
        let count = caps.get(2).or_else(|| caps.get(3)).and_then(|m| m.as_str().parse::<i64>().ok());
        (caps[1].to_string(), count.unwrap_or(1))
    } else {
        (s.trim().to_string(), 1)
    };
    EncounterMonster {
        name,
        count,
        challenge_rating: None,
        notes: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("3x Goblin", "Goblin", 3)]
    #[case("2 × Ogre", "Ogre", 2)]
    #[case("Bugbear x2", "Bugbear", 2)]
    #[case("Wolf (4)", "Wolf", 4)]
    #[case("Hobgoblin Captain", "Hobgoblin Captain", 1)]
    fn counted_strings(#[case] input: &str, #[case] name: &str, #[case] count: i64) {
        let parsed = parse_counted(input);
        assert_eq!((parsed.name.as_str(), parsed.count), (name, count));
    }

    #[test]
    fn encounter_fields() {
        let encounter = normalize_encounter(&json!({
            "encounter": {
                "name": "Ambush at the Ford",
                "difficulty": "hard",
                "level": "3",
                "enemies": [
                    {"name": "Goblin", "quantity": 4, "cr": 0.25},
                    "Worg x2",
                    {"name": "Nobody", "count": 0},
                ],
                "loot": "12 gp\nA silver locket",
            },
        }));
        assert_eq!(encounter.title, "Ambush at the Ford");
        assert_eq!(encounter.party_level, Some(3));
        assert_eq!(encounter.monsters.len(), 3);
        assert_eq!(encounter.monsters[0].challenge_rating.as_deref(), Some("1/4"));
        assert_eq!(encounter.monsters[1].count, 2);
        assert_eq!(encounter.monsters[2].count, 1);
        assert_eq!(encounter.treasure, vec!["12 gp", "A silver locket"]);
    }
}
