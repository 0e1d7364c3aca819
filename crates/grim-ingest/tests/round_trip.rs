//! `normalize(to_storage_shape(normalize(x))) == normalize(x)` across domains,
//! plus the classification-to-record path for representative payloads.

use grim_core::coerce::is_empty_value;
use grim_core::{DomainTag, StructuredContent};
use grim_ingest::normalize::field_keys;
use grim_ingest::serialize::PRESERVE_EMPTY;
use grim_ingest::{apply_field_edit, classify, normalize, to_storage_shape};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn round_trip(domain: DomainTag, raw: &Value) -> (StructuredContent, StructuredContent) {
    let first = normalize(domain, raw);
    let stored = to_storage_shape(&first, raw).expect("record serializes");
    let second = normalize(domain, &Value::Object(stored));
    (first, second)
}

fn npc_payload() -> Value {
    json!({
        "deliverable": "npc",
        "draft": {"canonical_name": "Mira Vale"},
        "race": "Half-elf",
        "class_levels": ["Rogue 5 (Thief)"],
        "ability_scores": {"STR": 12, "Dexterity": 18, "int": 0},
        "personality_traits": ["curious"],
        "flaws": "Cannot resist a locked door",
        "armor_class": "15 (studded leather)",
        "hit_points": "33 (6d8+6)",
        "skills": ["Stealth +8", "Perception +5"],
        "saving_throws": {"Dex": 7},
        "traits": [{"name": "Cunning Action", "text": "Dash, Disengage, or Hide as a bonus action."}],
        "actions": ["Shortsword. Melee Weapon Attack: +7 to hit, one target."],
        "gear": [{"name": "Thieves' tools"}, "Grappling hook"],
        "relationships": ["Tobin - brother"],
        "spells": ["Minor Illusion"],
        "speed": {"walk": 30, "climb": 30},
        "languages": "Common, Elvish, Thieves' Cant",
        "sources_used": ["Guild ledger"],
        "schemaVersion": "1.0.0",
        "stat_block": {"cr": "2", "notes": ""},
    })
}

fn monster_payload() -> Value {
    json!({
        "deliverable": "monster",
        "content_type": "character",
        "name": "Marsh Troll",
        "meta": "Large giant, chaotic evil",
        "armor_class": [{"ac": 15, "source": "natural armor"}],
        "hit_points": {"avg": 84},
        "stat_block": {"hit_dice": "8d10+40"},
        "stats": [18, 13, 20, 7, 9, 7],
        "challenge_rating": 5,
        "damage_resistances": "cold; fire",
        "traits": ["Regeneration. Regains 10 hit points at the start of its turn."],
        "legendary_actions": {"Swipe": "One claw attack."},
        "environment": ["swamp", "forest"],
    })
}

#[rstest]
#[case::npc(DomainTag::Npc, npc_payload())]
#[case::monster(DomainTag::Monster, monster_payload())]
#[case::item(DomainTag::Item, json!({
    "item": {"canonical_name": "Moonblade", "type": "longsword", "rarity": "legendary"},
    "attunement": "requires attunement by an elf",
    "properties": ["finesse", {"name": "Keen", "description": "Crits on 19-20."}],
    "charges": "3",
    "cost": 5000,
    "cursed": true,
}))]
#[case::location(DomainTag::Location, json!({
    "name": "Saltmarsh",
    "kind": "port town",
    "landmarks": ["The Empty Net: A rowdy tavern", {"title": "Haunted House"}],
    "residents": "Eliander Fireborn\nAnders Solmor",
    "secrets": ["The council pays the smugglers"],
}))]
#[case::story_arc(DomainTag::StoryArc, json!({
    "arc": {"name": "The Drowned Crown", "logline": "A sunken throne wakes."},
    "acts": [{"title": "Tides", "events": ["Body on the beach"]}, "The queen rises."],
    "cast": [{"name": "Queen Ysolde", "goal": "Reclaim the throne"}, "Brother Aldous"],
    "themes": ["grief", "legacy"],
}))]
#[case::encounter(DomainTag::Encounter, json!({
    "name": "Ambush at the Ford",
    "level": 3,
    "enemies": "3x Goblin, Worg x2",
    "loot": ["12 gp"],
    "xp": 450,
}))]
#[case::writing(DomainTag::Writing, json!({
    "work": {"working_title": "Field Notes", "format": "essay"},
    "draft_text": "# One\n\nIt began in the marsh.\n\n- reeds\n- herons",
    "chapters": [{"heading": "One", "body": "It began."}],
    "toc": "One\nTwo",
}))]
#[case::generic(DomainTag::Generic, json!({"title": "Loose", "foo": [1, 2]}))]
#[case::generic_text(DomainTag::Generic, json!("free text"))]
fn storage_round_trip_is_idempotent(#[case] domain: DomainTag, #[case] raw: Value) {
    let (first, second) = round_trip(domain, &raw);
    assert_eq!(second, first);
}

#[test]
fn round_trip_of_empty_payloads_is_idempotent() {
    for domain in DomainTag::ALL {
        let (first, second) = round_trip(domain, &json!({}));
        assert_eq!(second, first, "{domain}");
    }
}

/// Every key the domain reads, each holding some flavor of nothing.
fn blank_payload(domain: DomainTag) -> Value {
    let blanks = [json!(""), json!("   "), json!([]), Value::Null, json!({})];
    let fields = field_keys(domain)
        .into_iter()
        .zip(blanks.into_iter().cycle())
        .map(|(key, blank)| (key.to_string(), blank))
        .collect();
    Value::Object(fields)
}

fn assert_nothing_empty(path: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let inner_path = format!("{path}/{key}");
                assert!(!is_empty_value(inner), "empty value stored at {inner_path}");
                assert_nothing_empty(&inner_path, inner);
            }
        }
        Value::Array(items) => {
            for (index, inner) in items.iter().enumerate() {
                let inner_path = format!("{path}/{index}");
                assert!(!is_empty_value(inner), "empty value stored at {inner_path}");
                assert_nothing_empty(&inner_path, inner);
            }
        }
        _ => {}
    }
}

#[rstest]
#[case::npc(DomainTag::Npc)]
#[case::monster(DomainTag::Monster)]
#[case::item(DomainTag::Item)]
#[case::location(DomainTag::Location)]
#[case::story_arc(DomainTag::StoryArc)]
#[case::encounter(DomainTag::Encounter)]
#[case::writing(DomainTag::Writing)]
#[case::generic(DomainTag::Generic)]
fn storage_shape_drops_empties_except_preserved_lists(#[case] domain: DomainTag) {
    let raw = blank_payload(domain);
    let record = normalize(domain, &raw);
    let mut shape = to_storage_shape(&record, &raw).expect("record serializes");

    let Value::Object(fields) = record.data_value().expect("record serializes") else {
        panic!("records serialize to objects");
    };
    for key in PRESERVE_EMPTY {
        if fields.contains_key(key) {
            assert_eq!(shape.remove(key), Some(json!([])), "{domain} {key}");
        }
    }
    assert_nothing_empty("", &Value::Object(shape));
}

#[rstest]
#[case::npc(DomainTag::Npc, json!({"npc_name": "Old", "gear": ["rope"]}), "equipment", "[]")]
#[case::npc_name(DomainTag::Npc, json!({"npc_name": "Old"}), "name", r#""New""#)]
#[case::monster(DomainTag::Monster, json!({"name": "Troll", "monster_type": "giant"}), "creature_type", r#""""#)]
#[case::item(DomainTag::Item, json!({"name": "Blade", "type": "longsword"}), "item_type", r#""""#)]
#[case::location(DomainTag::Location, json!({"name": "Saltmarsh", "type": "port town"}), "location_type", r#""city""#)]
#[case::story_arc(DomainTag::StoryArc, json!({"name": "Crown", "logline": "A throne wakes."}), "premise", r#""""#)]
#[case::encounter(DomainTag::Encounter, json!({"name": "Ford", "enemies": "3x Goblin"}), "monsters", "[]")]
#[case::writing(DomainTag::Writing, json!({"title": "Notes", "format": "essay"}), "work_type", r#""memoir""#)]
#[case::generic(DomainTag::Generic, json!({"title": "Loose", "body": "old"}), "content", r#""new""#)]
fn edits_survive_storage_round_trip(
    #[case] domain: DomainTag,
    #[case] raw: Value,
    #[case] field: &str,
    #[case] edit: &str,
) {
    let first = normalize(domain, &raw);
    let edited = apply_field_edit(&first, field, edit);
    assert!(edited.is_applied());
    assert_ne!(edited.value, first, "edit of {field} changed nothing");

    let stored = to_storage_shape(&edited.value, &raw).expect("record serializes");
    let again = normalize(domain, &Value::Object(stored));
    assert_eq!(again, edited.value);
}

#[test]
fn monster_hint_beats_character_content_type() {
    let raw = json!({"deliverable": "monster", "content_type": "character", "challenge_rating": "3"});
    assert_eq!(classify(&raw, None, None), DomainTag::Monster);
}

#[test]
fn classified_monster_normalizes_with_formula_fallback() {
    let raw = monster_payload();
    let StructuredContent::Monster(monster) = normalize(classify(&raw, None, None), &raw) else {
        panic!("expected a monster record");
    };
    assert_eq!(monster.size, "Large");
    assert_eq!(monster.hit_points.average, Some(84));
    assert_eq!(monster.hit_points.formula.as_deref(), Some("8d10+40"));
    assert_eq!(monster.ability_scores.con, 20);
    assert_eq!(monster.experience_points, Some(1_800));
    assert_eq!(monster.damage_resistances, vec!["cold", "fire"]);
    assert_eq!(monster.habitat, "swamp, forest");
}
