//! Field-name variant mapping.
//!
//! Producers spell the same field many ways (`STR`, `Strength`, `strength`;
//! `canonical_name`; `personality_traits`; `magical_items`). The static tables
//! here list every accepted variant per canonical path. [`map_fields`] rewrites
//! a payload onto the canonical names; the domain normalizers read the same
//! tables so raw and mapped input normalize identically.

use grim_core::DomainTag;
use grim_core::coerce::{
    ensure_array, ensure_integer, ensure_object, ensure_string_array, first_string,
    first_string_array, first_value, is_empty_value,
};
use grim_core::entities::{AbilityScores, DEFAULT_ABILITY_SCORE};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::payload::domain_view;

// ── Variant tables ─────────────────────────────────────────────────

/// Accepted spellings per canonical ability key.
pub const ABILITY_VARIANTS: [(&str, &[&str]); 6] = [
    ("str", &["str", "STR", "Str", "strength", "Strength", "STRENGTH"]),
    ("dex", &["dex", "DEX", "Dex", "dexterity", "Dexterity", "DEXTERITY"]),
    ("con", &["con", "CON", "Con", "constitution", "Constitution", "CONSTITUTION"]),
    ("int", &["int", "INT", "Int", "intelligence", "Intelligence", "INTELLIGENCE"]),
    ("wis", &["wis", "WIS", "Wis", "wisdom", "Wisdom", "WISDOM"]),
    ("cha", &["cha", "CHA", "Cha", "charisma", "Charisma", "CHARISMA"]),
];

/// Containers that may hold ability scores, canonical first.
pub const ABILITY_CONTAINERS: &[&str] = &["ability_scores", "abilityScores", "stats", "attributes", "abilities"];

pub const NAME_VARIANTS: &[&str] = &["name", "canonical_name", "npc_name", "character_name"];

/// Top-level personality variants per canonical `personality.*` key.
///
/// A bare top-level `traits` is handled by [`personality_traits_fallback`]
/// because stat blocks use the same key for special abilities.
pub const PERSONALITY_VARIANTS: [(&str, &[&str]); 4] = [
    ("traits", &["personality_traits"]),
    ("ideals", &["ideals"]),
    ("bonds", &["bonds"]),
    ("flaws", &["flaws"]),
];

pub const EQUIPMENT_VARIANTS: &[&str] = &["equipment", "gear", "inventory"];

pub const MAGIC_ITEM_VARIANTS: &[&str] = &["magic_items", "magical_items", "magic_item"];

pub const SCHEMA_VERSION_VARIANTS: &[&str] =
    &["schema_version", "schemaVersion", "$schema_version", "_schema_version"];

/// Top-level keys the mapper consumes and never writes back.
///
/// These are the non-canonical spellings from every table above. Storage
/// serialization strips them so a stale variant cannot shadow an edit.
#[must_use]
pub fn alias_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = Vec::new();
    for (_, variants) in ABILITY_VARIANTS {
        keys.extend(variants.iter().copied());
    }
    keys.extend(ABILITY_CONTAINERS.iter().copied().filter(|k| !matches!(*k, "ability_scores" | "abilities")));
    keys.extend(NAME_VARIANTS.iter().skip(1).copied());
    keys.push("personality_traits");
    keys.extend(["ideals", "bonds", "flaws"]);
    keys.extend(EQUIPMENT_VARIANTS.iter().skip(1).copied());
    keys.extend(MAGIC_ITEM_VARIANTS.iter().skip(1).copied());
    keys.extend(SCHEMA_VERSION_VARIANTS.iter().skip(1).copied());
    keys
}

// ── Ability scores ─────────────────────────────────────────────────

/// Ability scores recovered from a payload, with what could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityResolution {
    pub scores: AbilityScores,
    /// Canonical keys that were absent and defaulted to 10.
    pub defaulted: Vec<&'static str>,
    /// Canonical keys whose value was present but not numeric.
    pub invalid: Vec<(&'static str, Value)>,
}

/// Resolve all six ability scores from `obj`.
///
/// Sources per key, first hit wins: the first ability container holding any
/// ability key (object, `[{name, value}]` array, or six bare numbers in
/// STR..CHA order), top-level variant keys, then `stat_block.ability_scores`.
/// A present `0` is kept; only absence defaults.
#[must_use]
pub fn resolve_ability_scores(obj: &Map<String, Value>) -> AbilityResolution {
    let container = ABILITY_CONTAINERS
        .iter()
        .filter_map(|key| obj.get(*key))
        .map(container_map)
        .find(|map| holds_ability_key(map))
        .unwrap_or_default();
    let stat_block = obj
        .get("stat_block")
        .map(ensure_object)
        .and_then(|sb| sb.get("ability_scores"))
        .map(container_map)
        .unwrap_or_default();

    let mut resolution = AbilityResolution {
        scores: AbilityScores::default(),
        defaulted: Vec::new(),
        invalid: Vec::new(),
    };

    for (canonical, variants) in ABILITY_VARIANTS {
        let found = [&container, obj, &stat_block]
            .into_iter()
            .find_map(|source| variants.iter().find_map(|v| source.get(*v)).filter(|v| !v.is_null()));
        match found {
            Some(value) => match ensure_integer(value) {
                Some(score) => resolution.scores.set(canonical, score),
                None => resolution.invalid.push((canonical, value.clone())),
            },
            None => resolution.defaulted.push(canonical),
        }
    }
    resolution
}

/// View an ability container as a key → score map.
fn container_map(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map.clone(),
        Value::Array(items) if items.len() == 6 && items.iter().all(Value::is_number) => {
            AbilityScores::KEYS
                .iter()
                .zip(items)
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect()
        }
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let entry = ensure_object(item);
                let name = first_string(entry, &["name", "ability", "stat", "key"]);
                let score = first_value(entry, &["value", "score"])?;
                (!name.is_empty()).then(|| (name, score.clone()))
            })
            .collect(),
        _ => Map::new(),
    }
}

fn holds_ability_key(map: &Map<String, Value>) -> bool {
    ABILITY_VARIANTS
        .iter()
        .any(|(_, variants)| variants.iter().any(|v| map.contains_key(*v)))
}

// ── Mapping ────────────────────────────────────────────────────────

/// Outcome of mapping a payload onto canonical field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MappingResult {
    /// `false` when any entry in `errors` exists.
    pub success: bool,
    pub mapped: Map<String, Value>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Rewrite `raw` onto canonical field names for `domain`.
///
/// The payload's `draft` and domain envelopes are merged first. Ability
/// scores are resolved for NPC and monster payloads: an absent score defaults
/// to 10 with a warning, a present non-numeric score is an error.
#[must_use]
pub fn map_fields(domain: DomainTag, raw: &Value) -> MappingResult {
    let mut mapped = domain_view(raw, domain);
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    if matches!(domain, DomainTag::Npc | DomainTag::Monster | DomainTag::Item | DomainTag::Location) {
        rename_first(&mut mapped, "name", NAME_VARIANTS);
    }

    if matches!(domain, DomainTag::Npc | DomainTag::Monster) {
        let resolution = resolve_ability_scores(&mapped);
        for key in &resolution.defaulted {
            warnings.push(format!(
                "ability score '{key}' missing; defaulted to {DEFAULT_ABILITY_SCORE}"
            ));
        }
        for (key, value) in &resolution.invalid {
            errors.push(format!("ability score '{key}' is not numeric: {value}"));
        }
        let mut scores: Map<String, Value> = resolution
            .scores
            .entries()
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect();
        for (key, _) in &resolution.invalid {
            scores.remove(*key);
        }
        if resolution.defaulted.len() == AbilityScores::KEYS.len() {
            tracing::debug!(%domain, "no ability scores supplied; all defaulted");
        }
        for (_, variants) in ABILITY_VARIANTS {
            for variant in variants {
                mapped.remove(*variant);
            }
        }
        let abilities_hold_scores = mapped
            .get("abilities")
            .is_some_and(|value| holds_ability_key(&container_map(value)));
        if abilities_hold_scores {
            mapped.remove("abilities");
        }
        for key in ABILITY_CONTAINERS.iter().skip(1).filter(|k| **k != "abilities") {
            mapped.remove(*key);
        }
        mapped.insert("ability_scores".to_string(), Value::Object(scores));
    }

    if domain == DomainTag::Npc {
        map_personality(&mut mapped, &mut warnings);
        collapse_names(&mut mapped, "equipment", EQUIPMENT_VARIANTS);
        collapse_names(&mut mapped, "magic_items", MAGIC_ITEM_VARIANTS);
    }

    if let Some(version) = schema_version_marker(&mapped) {
        for key in SCHEMA_VERSION_VARIANTS {
            mapped.remove(*key);
        }
        mapped.insert("schema_version".to_string(), Value::String(version));
    }

    MappingResult {
        success: errors.is_empty(),
        mapped,
        warnings,
        errors,
    }
}

/// The schema-version marker, from a string or number under any variant.
#[must_use]
pub fn schema_version_marker(obj: &Map<String, Value>) -> Option<String> {
    SCHEMA_VERSION_VARIANTS
        .iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Move the first non-empty variant into `canonical` and drop the rest.
fn rename_first(obj: &mut Map<String, Value>, canonical: &str, variants: &[&str]) {
    let chosen = first_value(obj, variants).cloned();
    for variant in variants.iter().filter(|v| **v != canonical) {
        if obj.remove(*variant).is_some() {
            tracing::debug!(from = variant, to = canonical, "mapped field variant");
        }
    }
    if let Some(value) = chosen {
        obj.insert(canonical.to_string(), value);
    }
}

/// Collapse the first non-empty variant to a string list under `canonical`.
/// Object entries contribute their `name`.
fn collapse_names(obj: &mut Map<String, Value>, canonical: &str, variants: &[&str]) {
    let names = first_string_array(obj, variants);
    for variant in variants {
        obj.remove(*variant);
    }
    if !names.is_empty() {
        obj.insert(
            canonical.to_string(),
            Value::Array(names.into_iter().map(Value::String).collect()),
        );
    }
}

fn map_personality(obj: &mut Map<String, Value>, warnings: &mut Vec<String>) {
    let existing = obj.get("personality").cloned().unwrap_or(Value::Null);
    let mut personality = match &existing {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        Value::String(_) | Value::Array(_) => {
            let mut map = Map::new();
            map.insert("traits".to_string(), existing.clone());
            map
        }
        other => {
            warnings.push(format!("ignored non-list personality value: {other}"));
            Map::new()
        }
    };

    let string_traits = obj
        .get("traits")
        .is_some_and(|v| v.as_array().is_some_and(|items| items.iter().all(Value::is_string)));

    for (canonical, variants) in PERSONALITY_VARIANTS {
        let nested = personality.get(canonical).map(ensure_string_array).unwrap_or_default();
        let top_level = if canonical == "traits" {
            personality_traits_fallback(obj)
        } else {
            first_string_array(obj, variants)
        };
        let chosen = if nested.is_empty() { top_level } else { nested };
        for variant in variants {
            obj.remove(*variant);
        }
        personality.insert(
            canonical.to_string(),
            Value::Array(chosen.into_iter().map(Value::String).collect()),
        );
    }

    if string_traits {
        obj.remove("traits");
    }

    if personality.values().all(is_empty_value) {
        obj.remove("personality");
    } else {
        obj.insert("personality".to_string(), Value::Object(personality));
    }
}

/// Top-level `traits` is ambiguous between personality and stat-block traits;
/// it only counts as personality when every entry is a plain string.
#[must_use]
pub fn personality_traits_fallback(obj: &Map<String, Value>) -> Vec<String> {
    let traits = obj.get("traits").map(ensure_array).unwrap_or_default();
    if !traits.is_empty() && traits.iter().all(Value::is_string) {
        return ensure_string_array(&Value::Array(traits.to_vec()));
    }
    obj.get("personality_traits").map(ensure_string_array).unwrap_or_default()
}
