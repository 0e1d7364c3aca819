use grim_core::DomainTag;
use grim_core::coerce::{
    ensure_array, ensure_string_array, first_opt_string, first_string, first_string_array,
    first_value,
};
use grim_core::entities::{LocationRecord, PointOfInterest};
use serde_json::Value;

use super::common::FieldView;
use super::{ASSUMPTIONS, SOURCES_USED};
use crate::field_map::{SCHEMA_VERSION_VARIANTS, map_fields};

const NAME: &[&str] = &["name"];
const LOCATION_TYPE: &[&str] = &["location_type", "type", "kind"];
const REGION: &[&str] = &["region", "area", "parent_location"];
const DESCRIPTION: &[&str] = &["description", "summary"];
const ATMOSPHERE: &[&str] = &["atmosphere", "mood", "ambience"];
const POINTS_OF_INTEREST: &[&str] = &["points_of_interest", "landmarks", "poi", "features"];
const INHABITANTS: &[&str] = &["inhabitants", "residents", "npcs"];
const HOOKS: &[&str] = &["hooks", "plot_hooks", "adventure_hooks"];
const SECRETS: &[&str] = &["secrets"];
const HAZARDS: &[&str] = &["hazards", "dangers"];
const CONNECTIONS: &[&str] = &["connections", "exits", "connected_locations"];

pub(super) const FIELDS: &[&[&str]] = &[
    NAME,
    LOCATION_TYPE,
    REGION,
    DESCRIPTION,
    ATMOSPHERE,
    POINTS_OF_INTEREST,
    INHABITANTS,
    HOOKS,
    SECRETS,
    HAZARDS,
    CONNECTIONS,
    SOURCES_USED,
    ASSUMPTIONS,
    SCHEMA_VERSION_VARIANTS,
];

#[must_use]
pub fn normalize_location(raw: &Value) -> LocationRecord {
    let mapped = map_fields(DomainTag::Location, raw).mapped;
    let view = FieldView::new(&mapped);

    LocationRecord {
        name: view.string(NAME),
        location_type: view.descriptive(LOCATION_TYPE),
        region: view.string(REGION),
        description: view.string(DESCRIPTION),
        atmosphere: view.text(ATMOSPHERE),
        points_of_interest: first_value(&mapped, POINTS_OF_INTEREST)
            .map(points_of_interest)
            .unwrap_or_default(),
        inhabitants: view.strings(INHABITANTS),
        hooks: view.strings(HOOKS),
        secrets: view.strings(SECRETS),
        hazards: view.strings(HAZARDS),
        connections: view.strings(CONNECTIONS),
        sources_used: first_string_array(&mapped, SOURCES_USED),
        assumptions: first_string_array(&mapped, ASSUMPTIONS),
        schema_version: first_opt_string(&mapped, &["schema_version"]),
    }
}

/// Points of interest from objects, `"Name: description"` strings, or a
/// `name → description` map.
fn points_of_interest(value: &Value) -> Vec<PointOfInterest> {
    let entries: Vec<PointOfInterest> = match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, description)| PointOfInterest {
                name: name.clone(),
                description: ensure_string_array(description).join(" "),
            })
            .collect(),
        Value::String(_) => ensure_string_array(value).iter().map(String::as_str).map(split_named).collect(),
        _ => ensure_array(value)
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(PointOfInterest {
                    name: first_string(map, &["name", "title"]),
                    description: first_string(map, &["description", "summary", "details"]),
                }),
                Value::String(s) => Some(split_named(s)),
                _ => None,
            })
            .collect(),
    };
    entries.into_iter().filter(|p| !p.name.is_empty()).collect()
}

fn split_named(line: &str) -> PointOfInterest {
    match line.split_once(": ") {
        Some((name, description)) => PointOfInterest {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        },
        None => PointOfInterest {
            name: line.trim().to_string(),
            description: String::new(),
        },
    }
}
