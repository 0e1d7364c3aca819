use grim_core::DomainTag;
use grim_core::coerce::{
    ensure_array, ensure_bool, first_opt_string, first_string, first_string_array, first_value,
};
use grim_core::entities::{ItemProperty, ItemRecord};
use serde_json::{Map, Value};

use super::common::FieldView;
use super::{ASSUMPTIONS, SOURCES_USED};
use crate::field_map::{SCHEMA_VERSION_VARIANTS, map_fields};

const NAME: &[&str] = &["name"];
const ITEM_TYPE: &[&str] = &["item_type", "type", "category", "kind"];
const RARITY: &[&str] = &["rarity"];
const ATTUNEMENT: &[&str] = &["requires_attunement", "attunement", "requiresAttunement"];
const ATTUNEMENT_REQUIREMENTS: &[&str] = &["attunement_requirements", "attunement_requirement"];
const DESCRIPTION: &[&str] = &["description", "summary"];
const PROPERTIES: &[&str] = &["properties"];
const PROPERTIES_V2: &[&str] = &["properties_v2", "propertiesV2"];
const CHARGES: &[&str] = &["charges", "max_charges"];
const RECHARGE: &[&str] = &["recharge", "recharges"];
const WEIGHT: &[&str] = &["weight"];
const VALUE: &[&str] = &["value", "cost", "price"];
const LORE: &[&str] = &["lore", "history"];
const CURSE: &[&str] = &["curse", "cursed"];

pub(super) const FIELDS: &[&[&str]] = &[
    NAME,
    ITEM_TYPE,
    RARITY,
    ATTUNEMENT,
    ATTUNEMENT_REQUIREMENTS,
    DESCRIPTION,
    PROPERTIES,
    PROPERTIES_V2,
    CHARGES,
    RECHARGE,
    WEIGHT,
    VALUE,
    LORE,
    CURSE,
    SOURCES_USED,
    ASSUMPTIONS,
    SCHEMA_VERSION_VARIANTS,
];

/// Normalize an item payload.
///
/// `properties_v2` is taken as given when present. Otherwise it is derived
/// from the object entries of `properties`.
#[must_use]
pub fn normalize_item(raw: &Value) -> ItemRecord {
    let mapped = map_fields(DomainTag::Item, raw).mapped;
    let view = FieldView::new(&mapped);
    let (requires_attunement, requirement_text) = attunement(&mapped);

    let explicit_v2 = first_value(&mapped, PROPERTIES_V2).map(structured_properties).unwrap_or_default();
    let properties_v2 = if explicit_v2.is_empty() {
        first_value(&mapped, PROPERTIES).map(structured_properties).unwrap_or_default()
    } else {
        explicit_v2
    };

    ItemRecord {
        name: view.string(NAME),
        item_type: view.descriptive(ITEM_TYPE),
        rarity: view.string(RARITY),
        requires_attunement,
        attunement_requirements: view.opt_string(ATTUNEMENT_REQUIREMENTS).or(requirement_text),
        description: view.string(DESCRIPTION),
        properties: view.strings(PROPERTIES),
        properties_v2,
        charges: view.integer(CHARGES),
        recharge: view.opt_string(RECHARGE),
        weight: view.text(WEIGHT),
        value: view.text(VALUE),
        lore: view.string(LORE),
        curse: curse(&mapped),
        sources_used: first_string_array(&mapped, SOURCES_USED),
        assumptions: first_string_array(&mapped, ASSUMPTIONS),
        schema_version: first_opt_string(&mapped, &["schema_version"]),
    }
}

/// The attunement flag, plus requirement text when the flag was a phrase
/// like `"requires attunement by a cleric"`.
fn attunement(mapped: &Map<String, Value>) -> (bool, Option<String>) {
    let Some(value) = first_value(mapped, ATTUNEMENT) else {
        return (false, None);
    };
    if let Some(flag) = ensure_bool(value) {
        return (flag, None);
    }
    match value {
        Value::String(s) => (true, Some(s.trim().to_string())),
        _ => (false, None),
    }
}

/// The `{name, description}` entries of a property list. Plain strings are
/// skipped.
fn structured_properties(value: &Value) -> Vec<ItemProperty> {
    ensure_array(value)
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| ItemProperty {
            name: first_string(entry, &["name", "title", "label"]),
            description: first_string(entry, &["description", "text", "effect"]),
        })
        .filter(|p| !p.name.is_empty() || !p.description.is_empty())
        .collect()
}

/// A curse description, or a generic note when only a `cursed: true` flag is
/// given.
fn curse(mapped: &Map<String, Value>) -> Option<String> {
    match first_value(mapped, CURSE) {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Bool(true)) => Some("Cursed".to_string()),
        Some(Value::Object(map)) => first_opt_string(map, &["description", "effect", "name"]),
        _ => None,
    }
}
