//! Polymorphic field parsers shared by the domain normalizers.

use std::sync::LazyLock;

use grim_core::DomainTag;
use grim_core::coerce::{
    ensure_array, ensure_integer, ensure_number, ensure_string_array, first_integer,
    first_opt_string, first_string, first_value, split_list, truncate_chars,
};
use grim_core::entities::{
    ArmorClass, ArmorClassEntry, ClassLevel, Feature, HitPoints, Relationship, ScoredEntry,
    SpellcastingSummary,
};
use regex::Regex;
use serde_json::{Map, Value};

/// Longest feature name derived from a plain-string entry.
pub const FEATURE_NAME_MAX_CHARS: usize = 80;

/// `15`, `15 (natural armor)`, `16 (chain mail) with shield`.
static ARMOR_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*(?:\(([^)]*)\))?\s*(.*?)\s*$").expect("pattern is valid"));

/// `138`, `138 (12d12+60)`, `45 (6d10+12) regenerates`. Digits must not run
/// straight into a dice `d`.
static HIT_POINTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)(?:\s*\(([^)]*)\))?(?:\s+(.*?))?\s*$").expect("pattern is valid")
});

static DICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*\d+\s*d\s*\d+").expect("pattern is valid"));

/// `Stealth +6`, `Dex -1 (disadvantage)`.
static SCORED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.+?)\s*([+-]?\d+)\s*(?:\((.*)\))?\s*$").expect("pattern is valid")
});

/// `Fighter 5`, `Wizard 3 (Evocation)`.
static CLASS_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.+?)\s+(\d+)\s*(?:\((.*)\))?\s*$").expect("pattern is valid")
});

// ── Field view ─────────────────────────────────────────────────────

/// Field lookup over a payload with an optional fallback map (a nested stat
/// block). Every getter takes the first non-empty match from `primary`, then
/// tries `fallback`.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub primary: &'a Map<String, Value>,
    pub fallback: Option<&'a Map<String, Value>>,
}

impl<'a> FieldView<'a> {
    #[must_use]
    pub const fn new(primary: &'a Map<String, Value>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    #[must_use]
    pub const fn with_fallback(primary: &'a Map<String, Value>, fallback: &'a Map<String, Value>) -> Self {
        Self {
            primary,
            fallback: Some(fallback),
        }
    }

    #[must_use]
    pub fn value(&self, keys: &[&str]) -> Option<&'a Value> {
        first_value(self.primary, keys).or_else(|| self.fallback.and_then(|f| first_value(f, keys)))
    }

    /// First non-blank string, trimmed.
    #[must_use]
    pub fn string(&self, keys: &[&str]) -> String {
        self.opt_string(keys).unwrap_or_default()
    }

    #[must_use]
    pub fn opt_string(&self, keys: &[&str]) -> Option<String> {
        first_opt_string(self.primary, keys)
            .or_else(|| self.fallback.and_then(|f| first_opt_string(f, keys)))
    }

    /// First non-blank string among `keys` that does not merely name a
    /// domain; see [`descriptive`].
    #[must_use]
    pub fn descriptive(&self, keys: &[&str]) -> String {
        keys.iter()
            .map(|key| descriptive(self.string(&[*key])))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }

    /// Like [`string`](Self::string), also accepting numbers and joining
    /// string lists with `", "`.
    #[must_use]
    pub fn text(&self, keys: &[&str]) -> String {
        self.value(keys).map(text_of).unwrap_or_default()
    }

    #[must_use]
    pub fn integer(&self, keys: &[&str]) -> Option<i64> {
        first_integer(self.primary, keys).or_else(|| self.fallback.and_then(|f| first_integer(f, keys)))
    }

    #[must_use]
    pub fn strings(&self, keys: &[&str]) -> Vec<String> {
        self.value(keys).map(ensure_string_array).unwrap_or_default()
    }

    #[must_use]
    pub fn list(&self, keys: &[&str]) -> Vec<String> {
        self.value(keys).map(split_list).unwrap_or_default()
    }

    #[must_use]
    pub fn features(&self, keys: &[&str]) -> Vec<Feature> {
        self.value(keys).map(normalize_features).unwrap_or_default()
    }

    #[must_use]
    pub fn scored(&self, keys: &[&str]) -> Vec<ScoredEntry> {
        self.value(keys).map(normalize_scored_entries).unwrap_or_default()
    }
}

/// A string, number, or string list rendered as one line of text.
#[must_use]
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) => ensure_string_array(value).join(", "),
        _ => String::new(),
    }
}

/// `value` unless it merely names a content domain (`"item"`, `"monster"`),
/// which producers often put in type-like fields.
#[must_use]
pub fn descriptive(value: String) -> String {
    if value.parse::<DomainTag>().is_ok() {
        String::new()
    } else {
        value
    }
}

// ── Armor class ────────────────────────────────────────────────────

/// Resolve an armor class from a number, an annotated string, an object, or
/// an array of any of those.
///
/// An unmatched string becomes `[{value: 0, notes: <string>}]`. `None` means
/// nothing usable was supplied.
#[must_use]
pub fn normalize_armor_class(value: &Value) -> Option<ArmorClass> {
    match value {
        Value::Number(_) => ensure_integer(value).map(ArmorClass::Value),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(parse_armor_class_str(s)),
        Value::Object(map) => armor_class_entry(map).map(|entry| ArmorClass::Entries(vec![entry])),
        Value::Array(items) => {
            let entries: Vec<ArmorClassEntry> = items
                .iter()
                .flat_map(|item| match item {
                    Value::Number(_) => ensure_integer(item)
                        .map(|value| ArmorClassEntry {
                            value,
                            kind: None,
                            notes: None,
                        })
                        .into_iter()
                        .collect(),
                    Value::String(s) if !s.trim().is_empty() => match parse_armor_class_str(s) {
                        ArmorClass::Value(value) => vec![ArmorClassEntry {
                            value,
                            kind: None,
                            notes: None,
                        }],
                        ArmorClass::Entries(entries) => entries,
                    },
                    Value::Object(map) => armor_class_entry(map).into_iter().collect(),
                    _ => Vec::new(),
                })
                .collect();
            (!entries.is_empty()).then_some(ArmorClass::Entries(entries))
        }
        Value::Null | Value::Bool(_) => None,
    }
}

fn parse_armor_class_str(s: &str) -> ArmorClass {
    let Some(caps) = ARMOR_CLASS_RE.captures(s) else {
        return ArmorClass::Entries(vec![ArmorClassEntry {
            value: 0,
            kind: None,
            notes: Some(s.trim().to_string()),
        }]);
    };
    let value = caps[1].parse::<i64>().unwrap_or(0);
    let kind = caps.get(2).map(|m| m.as_str().trim().to_string()).filter(|k| !k.is_empty());
    let notes = caps.get(3).map(|m| m.as_str().trim().to_string()).filter(|n| !n.is_empty());
    if kind.is_none() && notes.is_none() {
        ArmorClass::Value(value)
    } else {
        ArmorClass::Entries(vec![ArmorClassEntry { value, kind, notes }])
    }
}

fn armor_class_entry(map: &Map<String, Value>) -> Option<ArmorClassEntry> {
    let value = first_integer(map, &["value", "ac", "armor_class"]);
    let kind = first_opt_string(map, &["type", "kind", "source"]);
    let notes = first_opt_string(map, &["notes", "description", "condition"]);
    if value.is_none() && kind.is_none() && notes.is_none() {
        return None;
    }
    Some(ArmorClassEntry {
        value: value.unwrap_or(0),
        kind,
        notes,
    })
}

// ── Hit points ─────────────────────────────────────────────────────

/// Resolve hit points from a number, a `"138 (12d12+60)"` string, or an
/// object. `fallback_formula` fills an otherwise missing formula.
#[must_use]
pub fn normalize_hit_points(value: &Value, fallback_formula: Option<&str>) -> Option<HitPoints> {
    let fallback = fallback_formula.map(str::trim).filter(|f| !f.is_empty()).map(str::to_string);
    let parsed = match value {
        Value::Number(_) => HitPoints {
            average: ensure_integer(value),
            formula: None,
            notes: None,
        },
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => parse_hit_points_str(s),
        Value::Object(map) => HitPoints {
            average: first_integer(map, &["average", "avg", "value", "hp", "max"]),
            formula: first_opt_string(map, &["formula", "dice", "hit_dice"]),
            notes: first_opt_string(map, &["notes", "description"]),
        },
        _ => return None,
    };
    if parsed.is_empty() && fallback.is_none() {
        return None;
    }
    Some(HitPoints {
        formula: parsed.formula.or(fallback),
        ..parsed
    })
}

fn parse_hit_points_str(s: &str) -> HitPoints {
    if let Some(caps) = HIT_POINTS_RE.captures(s) {
        return HitPoints {
            average: caps[1].parse::<i64>().ok(),
            formula: caps.get(2).map(|m| m.as_str().trim().to_string()).filter(|f| !f.is_empty()),
            notes: caps.get(3).map(|m| m.as_str().trim().to_string()).filter(|n| !n.is_empty()),
        };
    }
    if DICE_RE.is_match(s) {
        return HitPoints {
            average: None,
            formula: Some(s.trim().to_string()),
            notes: None,
        };
    }
    HitPoints {
        average: None,
        formula: None,
        notes: Some(s.trim().to_string()),
    }
}

// ── Features ───────────────────────────────────────────────────────

/// Normalize a feature list.
///
/// Plain strings become `{name: <first 80 chars>, description: <string>}`.
/// Objects read `name`/`title` and `description`/`text`/`effect`. A map of
/// `name → description` is also accepted. Entries with neither name nor
/// description are dropped.
#[must_use]
pub fn normalize_features(value: &Value) -> Vec<Feature> {
    match value {
        Value::Array(items) => items.iter().filter_map(|item| feature_from(item, None)).collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(name, item)| feature_from(item, Some(name.as_str())))
            .collect(),
        Value::String(_) => ensure_string_array(value)
            .into_iter()
            .filter_map(|line| feature_from(&Value::String(line), None))
            .collect(),
        _ => Vec::new(),
    }
}

fn feature_from(item: &Value, key_name: Option<&str>) -> Option<Feature> {
    let feature = match item {
        Value::String(s) => {
            let description = s.trim().to_string();
            let name = key_name
                .map(str::to_string)
                .unwrap_or_else(|| truncate_chars(&description, FEATURE_NAME_MAX_CHARS));
            Feature {
                name,
                description,
                ..Feature::default()
            }
        }
        Value::Object(map) => {
            let description = first_string(map, &["description", "text", "effect", "desc"]);
            let mut name = first_string(map, &["name", "title"]);
            if name.is_empty() {
                name = key_name
                    .map(str::to_string)
                    .unwrap_or_else(|| truncate_chars(&description, FEATURE_NAME_MAX_CHARS));
            }
            Feature {
                name,
                description,
                uses: scalar_text(map, &["uses", "usage"]),
                recharge: scalar_text(map, &["recharge"]),
                notes: first_opt_string(map, &["notes"]),
            }
        }
        _ => return None,
    };
    (!feature.name.is_empty() || !feature.description.is_empty()).then_some(feature)
}

/// A string or number field as text.
fn scalar_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_value(map, keys)
        .map(|v| match v {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            _ => String::new(),
        })
        .filter(|s| !s.is_empty())
}

// ── Scored entries ─────────────────────────────────────────────────

/// Normalize saving throws, skills, or slot counts.
///
/// Accepts `{"Stealth": "+6"}` maps, `[{name, value, notes}]` arrays,
/// `["Stealth +6"]` string arrays, and comma-separated strings. Entries
/// without a readable number are dropped.
#[must_use]
pub fn normalize_scored_entries(value: &Value) -> Vec<ScoredEntry> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(name, item)| match item {
                Value::Object(inner) => first_integer(inner, &["value", "bonus", "modifier"]).map(|value| ScoredEntry {
                    name: name.clone(),
                    value,
                    notes: first_opt_string(inner, &["notes"]),
                }),
                other => ensure_integer(other).map(|value| ScoredEntry {
                    name: name.clone(),
                    value,
                    notes: None,
                }),
            })
            .collect(),
        Value::Array(items) => items.iter().filter_map(scored_from).collect(),
        Value::String(s) => s
            .split([',', ';'])
            .filter_map(|part| scored_from(&Value::String(part.to_string())))
            .collect(),
        _ => Vec::new(),
    }
}

fn scored_from(item: &Value) -> Option<ScoredEntry> {
    match item {
        Value::Object(map) => {
            let name = first_string(map, &["name", "skill", "ability", "save"]);
            let value = first_integer(map, &["value", "bonus", "modifier", "score"])?;
            (!name.is_empty()).then(|| ScoredEntry {
                name,
                value,
                notes: first_opt_string(map, &["notes"]),
            })
        }
        Value::String(s) => {
            let caps = SCORED_RE.captures(s)?;
            let name = caps[1].trim().to_string();
            let value = caps[2].trim_start_matches('+').parse::<i64>().ok()?;
            Some(ScoredEntry {
                name,
                value,
                notes: caps.get(3).map(|m| m.as_str().trim().to_string()).filter(|n| !n.is_empty()),
            })
        }
        _ => None,
    }
}

// ── Misc scalars ───────────────────────────────────────────────────

/// Challenge rating as text; fractional numbers render as `1/8`, `1/4`, `1/2`.
#[must_use]
pub fn normalize_challenge_rating(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(_) => match ensure_number(value) {
            Some(f) if (f - 0.125).abs() < f64::EPSILON => "1/8".to_string(),
            Some(f) if (f - 0.25).abs() < f64::EPSILON => "1/4".to_string(),
            Some(f) if (f - 0.5).abs() < f64::EPSILON => "1/2".to_string(),
            Some(f) if f.fract() == 0.0 => format!("{f:.0}"),
            Some(f) => f.to_string(),
            None => String::new(),
        },
        Value::Object(map) => first_value(map, &["rating", "value", "cr"])
            .map(|inner| normalize_challenge_rating(Some(inner)))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Speed as one line: `30 ft.` for a number, `walk 30 ft., fly 60 ft.` for
/// a movement map, strings kept as they are.
#[must_use]
pub fn normalize_speed(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => format!("{n} ft."),
        Some(Value::Array(_)) => value.map(text_of).unwrap_or_default(),
        Some(Value::Object(map)) => {
            let mut modes: Vec<(&String, &Value)> = map.iter().collect();
            modes.sort_by_key(|(mode, _)| i32::from(mode.as_str() != "walk"));
            modes
                .into_iter()
                .filter_map(|(mode, v)| {
                    let amount = match v {
                        Value::Number(n) => format!("{n} ft."),
                        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
                        _ => return None,
                    };
                    Some(format!("{mode} {amount}"))
                })
                .collect::<Vec<_>>()
                .join(", ")
        }
        _ => String::new(),
    }
}

/// Class levels from `[{class, level, subclass}]`, `["Fighter 5"]`, or a
/// top-level `class` + `level` pair.
#[must_use]
pub fn normalize_class_levels(view: &FieldView<'_>) -> Vec<ClassLevel> {
    let from_list: Vec<ClassLevel> = view
        .value(&["class_levels", "classes"])
        .map(|value| {
            ensure_array(value)
                .iter()
                .filter_map(|item| match item {
                    Value::Object(map) => {
                        let class = first_string(map, &["class", "name", "class_name"]);
                        (!class.is_empty()).then(|| ClassLevel {
                            class,
                            level: first_integer(map, &["level", "levels"]).unwrap_or(1),
                            subclass: first_opt_string(map, &["subclass", "archetype", "subclass_name"]),
                        })
                    }
                    Value::String(s) => Some(parse_class_level_str(s)).filter(|c| !c.class.is_empty()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    if !from_list.is_empty() {
        return from_list;
    }
    match view.primary.get("class") {
        Some(Value::String(s)) if !s.trim().is_empty() => {
            let mut parsed = parse_class_level_str(s);
            if let Some(level) = view.integer(&["level", "character_level"]) {
                parsed.level = level;
            }
            if parsed.subclass.is_none() {
                parsed.subclass = view.opt_string(&["subclass"]);
            }
            vec![parsed]
        }
        _ => Vec::new(),
    }
}

fn parse_class_level_str(s: &str) -> ClassLevel {
    CLASS_LEVEL_RE.captures(s).map_or_else(
        || ClassLevel {
            class: s.trim().to_string(),
            level: 1,
            subclass: None,
        },
        |caps| ClassLevel {
            class: caps[1].trim().to_string(),
            level: caps[2].parse::<i64>().unwrap_or(1),
            subclass: caps.get(3).map(|m| m.as_str().trim().to_string()).filter(|s| !s.is_empty()),
        },
    )
}

/// Relationships from objects, `"Name - relation"` strings, or a
/// `name → description` map.
#[must_use]
pub fn normalize_relationships(value: &Value) -> Vec<Relationship> {
    let entries: Vec<Relationship> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(Relationship {
                    name: first_string(map, &["name", "target", "with", "npc"]),
                    relation: first_opt_string(map, &["relation", "relationship", "type", "role"]),
                    description: first_opt_string(map, &["description", "notes", "details"]),
                }),
                Value::String(s) => Some(parse_relationship_str(s)),
                _ => None,
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(name, item)| Relationship {
                name: name.clone(),
                relation: None,
                description: Some(text_of(item)).filter(|d| !d.is_empty()),
            })
            .collect(),
        _ => Vec::new(),
    };
    entries.into_iter().filter(|r| !r.name.is_empty()).collect()
}

fn parse_relationship_str(s: &str) -> Relationship {
    let trimmed = s.trim();
    for separator in [" - ", ": "] {
        if let Some((name, relation)) = trimmed.split_once(separator) {
            return Relationship {
                name: name.trim().to_string(),
                relation: Some(relation.trim().to_string()).filter(|r| !r.is_empty()),
                description: None,
            };
        }
    }
    Relationship {
        name: trimmed.to_string(),
        relation: None,
        description: None,
    }
}

/// Spellcasting summary from an object, or a bare spell list.
#[must_use]
pub fn normalize_spellcasting(value: &Value) -> Option<SpellcastingSummary> {
    let summary = match value {
        Value::Object(map) => SpellcastingSummary {
            ability: first_opt_string(map, &["ability", "spellcasting_ability"]),
            save_dc: first_integer(map, &["save_dc", "spell_save_dc", "dc"]),
            attack_bonus: first_integer(map, &["attack_bonus", "spell_attack_bonus", "to_hit"]),
            cantrips: first_value(map, &["cantrips"]).map(ensure_string_array).unwrap_or_default(),
            spells: first_value(map, &["spells", "spells_known", "known_spells", "prepared"])
                .map(flatten_spell_list)
                .unwrap_or_default(),
            slots: first_value(map, &["slots", "spell_slots"])
                .map(normalize_scored_entries)
                .unwrap_or_default(),
        },
        Value::Array(_) | Value::String(_) => SpellcastingSummary {
            spells: ensure_string_array(value),
            ..SpellcastingSummary::default()
        },
        _ => return None,
    };
    (!summary.is_empty()).then_some(summary)
}

/// Spells given either as a list or as a `level → list` map.
fn flatten_spell_list(value: &Value) -> Vec<String> {
    match value {
        Value::Object(by_level) => by_level.values().flat_map(ensure_string_array).collect(),
        other => ensure_string_array(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn armor_class_annotated_string() {
        assert_eq!(
            normalize_armor_class(&json!("15 (natural armor)")),
            Some(ArmorClass::Entries(vec![ArmorClassEntry {
                value: 15,
                kind: Some("natural armor".into()),
                notes: None,
            }]))
        );
    }

    #[test]
    fn armor_class_number_passes_through() {
        assert_eq!(normalize_armor_class(&json!(15)), Some(ArmorClass::Value(15)));
        assert_eq!(normalize_armor_class(&json!("15")), Some(ArmorClass::Value(15)));
    }

    #[test]
    fn armor_class_unmatched_string_keeps_notes() {
        assert_eq!(
            normalize_armor_class(&json!("weird")),
            Some(ArmorClass::Entries(vec![ArmorClassEntry {
                value: 0,
                kind: None,
                notes: Some("weird".into()),
            }]))
        );
    }

    #[test]
    fn armor_class_array_and_object_forms() {
        let ac = normalize_armor_class(&json!([{"value": 17, "type": "plate"}, 19, "12 (mage armor)"])).unwrap();
        let ArmorClass::Entries(entries) = ac else {
            panic!("expected entries");
        };
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].value, 19);
        assert_eq!(entries[2].kind.as_deref(), Some("mage armor"));

        let single = normalize_armor_class(&json!({"ac": 13, "source": "leather"})).unwrap();
        assert_eq!(single.primary_value(), Some(13));
        assert_eq!(normalize_armor_class(&json!([])), None);
        assert_eq!(normalize_armor_class(&json!(true)), None);
    }

    #[test]
    fn hit_points_string_with_formula() {
        assert_eq!(
            normalize_hit_points(&json!("138 (12d12+60)"), None),
            Some(HitPoints {
                average: Some(138),
                formula: Some("12d12+60".into()),
                notes: None,
            })
        );
    }

    #[rstest]
    #[case(json!(45), HitPoints { average: Some(45), formula: None, notes: None })]
    #[case(json!("12d12+60"), HitPoints { average: None, formula: Some("12d12+60".into()), notes: None })]
    #[case(json!("lots"), HitPoints { average: None, formula: None, notes: Some("lots".into()) })]
    #[case(json!("22 plus regeneration"), HitPoints { average: Some(22), formula: None, notes: Some("plus regeneration".into()) })]
    #[case(json!({"avg": 30, "dice": "4d10+8"}), HitPoints { average: Some(30), formula: Some("4d10+8".into()), notes: None })]
    fn hit_points_shapes(#[case] input: Value, #[case] expected: HitPoints) {
        assert_eq!(normalize_hit_points(&input, None), Some(expected));
    }

    #[test]
    fn hit_points_fallback_formula_fills_gap() {
        let hp = normalize_hit_points(&json!({"average": 52}), Some("8d8+16")).unwrap();
        assert_eq!(hp.formula.as_deref(), Some("8d8+16"));
        let explicit = normalize_hit_points(&json!("52 (7d8+21)"), Some("8d8+16")).unwrap();
        assert_eq!(explicit.formula.as_deref(), Some("7d8+21"));
        assert_eq!(normalize_hit_points(&json!(null), None), None);
    }

    #[test]
    fn features_from_strings_truncate_name() {
        let long = "x".repeat(120);
        let features = normalize_features(&json!([long.clone()]));
        assert_eq!(features[0].name.chars().count(), FEATURE_NAME_MAX_CHARS);
        assert_eq!(features[0].description, long);
    }

    #[test]
    fn features_from_objects_and_maps() {
        let features = normalize_features(&json!([
            {"title": "Pack Tactics", "text": "Advantage when an ally is near."},
            {"name": "Breath Weapon", "effect": "Cone of fire.", "recharge": "5-6", "uses": 1},
            {"notes": "orphan"},
            42,
        ]));
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].name, "Pack Tactics");
        assert_eq!(features[1].recharge.as_deref(), Some("5-6"));
        assert_eq!(features[1].uses.as_deref(), Some("1"));

        let mapped = normalize_features(&json!({"Multiattack": "Two claw attacks."}));
        assert_eq!(mapped[0].name, "Multiattack");
        assert_eq!(mapped[0].description, "Two claw attacks.");
    }

    #[test]
    fn scored_entries_from_every_shape() {
        let from_map = normalize_scored_entries(&json!({"dex": "+5", "wis": 3, "cha": "n/a"}));
        assert_eq!(from_map.len(), 2);
        let from_strings = normalize_scored_entries(&json!(["Stealth +6", "Perception -1 (blind)"]));
        assert_eq!(from_strings[0].name, "Stealth");
        assert_eq!(from_strings[0].value, 6);
        assert_eq!(from_strings[1].value, -1);
        assert_eq!(from_strings[1].notes.as_deref(), Some("blind"));
        let from_text = normalize_scored_entries(&json!("Athletics +4, Insight +2"));
        assert_eq!(from_text.len(), 2);
    }

    #[rstest]
    #[case(json!(0.5), "1/2")]
    #[case(json!(0.125), "1/8")]
    #[case(json!(3), "3")]
    #[case(json!(" 1/4 "), "1/4")]
    #[case(json!({"rating": 7}), "7")]
    fn challenge_ratings(#[case] input: Value, #[case] expected: &str) {
        assert_eq!(normalize_challenge_rating(Some(&input)), expected);
    }

    #[test]
    fn speed_map_puts_walk_first() {
        assert_eq!(normalize_speed(Some(&json!({"fly": 60, "walk": 30}))), "walk 30 ft., fly 60 ft.");
        assert_eq!(normalize_speed(Some(&json!(25))), "25 ft.");
        assert_eq!(normalize_speed(None), "");
    }

    #[test]
    fn class_levels_from_strings_and_top_level() {
        let raw = json!({"class_levels": ["Wizard 3 (Evocation)", {"class": "Fighter", "level": 2}]});
        let levels = normalize_class_levels(&FieldView::new(raw.as_object().unwrap()));
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].subclass.as_deref(), Some("Evocation"));

        let top = json!({"class": "Bard", "level": 4});
        let levels = normalize_class_levels(&FieldView::new(top.as_object().unwrap()));
        assert_eq!(levels[0].class, "Bard");
        assert_eq!(levels[0].level, 4);
    }

    #[test]
    fn relationships_from_strings() {
        let rels = normalize_relationships(&json!(["Tobin - brother", {"name": "The Guild", "relation": "employer"}, ""]));
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].relation.as_deref(), Some("brother"));
    }

    #[test]
    fn spellcasting_object_and_list() {
        let summary = normalize_spellcasting(&json!({
            "ability": "Intelligence",
            "spell_save_dc": 14,
            "spells": {"1st": ["Shield"], "2nd": ["Misty Step"]},
            "slots": {"1st": 4, "2nd": 2},
        }))
        .unwrap();
        assert_eq!(summary.save_dc, Some(14));
        assert_eq!(summary.spells, vec!["Shield", "Misty Step"]);
        assert_eq!(summary.slots.len(), 2);

        assert_eq!(normalize_spellcasting(&json!({})), None);
        assert_eq!(normalize_spellcasting(&json!(["Light"])).unwrap().spells, vec!["Light"]);
    }
}
