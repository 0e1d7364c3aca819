//! Round-trip serialization back into the storage shape.
//!
//! [`to_storage_shape`] is the inverse of normalization. It starts from the
//! payload already on file, strips every key the domain normalizer would
//! read, and writes the canonical fields back with empty values pruned.
//! Normalizing the result yields the same record again.

use grim_core::coerce::is_empty_value;
use grim_core::{CoreError, DomainTag, StructuredContent};
use serde_json::{Map, Value};

use crate::field_map::alias_keys;
use crate::normalize::{field_keys, hint_aliases};
use crate::payload::{DRAFT_KEY, domain_view};

/// Keys whose empty list is still written. Consumers treat an explicit `[]`
/// here differently from an absent field.
pub const PRESERVE_EMPTY: [&str; 4] = ["class_levels", "motivations", "sources_used", "assumptions"];

/// Keys copied without pruning.
const VERBATIM: [&str; 1] = ["stat_block"];

/// Flatten `record` into a storage-shaped object over `existing_raw`.
///
/// Unknown keys of `existing_raw` survive. Canonical values that are `null`,
/// blank strings, empty lists, or objects that prune to nothing are dropped,
/// except the [`PRESERVE_EMPTY`] lists.
///
/// # Errors
///
/// Returns [`CoreError::Serialization`] if the record cannot be converted to
/// JSON.
pub fn to_storage_shape(
    record: &StructuredContent,
    existing_raw: &Value,
) -> Result<Map<String, Value>, CoreError> {
    let domain = record.domain();
    let mut out = domain_view(existing_raw, domain);
    out.remove(DRAFT_KEY);
    for key in alias_keys().into_iter().chain(field_keys(domain)) {
        out.remove(key);
    }
    // A hint that feeds a field survives only while it names a domain.
    for key in hint_aliases(domain) {
        let names_domain = out
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|hint| hint.parse::<DomainTag>().is_ok());
        if !names_domain {
            out.remove(key);
        }
    }

    let Value::Object(fields) = record.data_value()? else {
        return Ok(out);
    };
    for (key, value) in fields {
        assign(&mut out, key, value);
    }
    Ok(out)
}

fn assign(out: &mut Map<String, Value>, key: String, value: Value) {
    if VERBATIM.contains(&key.as_str()) {
        if !is_empty_value(&value) {
            out.insert(key, value);
        }
        return;
    }
    let preserve = PRESERVE_EMPTY.contains(&key.as_str()) && value.is_array();
    match prune(value) {
        Some(pruned) => {
            out.insert(key, pruned);
        }
        None if preserve => {
            out.insert(key, Value::Array(Vec::new()));
        }
        None => {
            out.remove(&key);
        }
    }
}

/// Drop empty values recursively. `None` means the value itself is empty.
fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::Array(items) => {
            let kept: Vec<Value> = items.into_iter().filter_map(prune).collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        Value::Object(map) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| prune(v).map(|v| (k, v)))
                .collect();
            (!kept.is_empty()).then_some(Value::Object(kept))
        }
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use grim_core::DomainTag;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn stored(domain: DomainTag, raw: &Value) -> Map<String, Value> {
        to_storage_shape(&normalize(domain, raw), raw).unwrap()
    }

    #[test]
    fn empty_values_are_dropped() {
        let shape = stored(DomainTag::Item, &json!({"name": "Rope", "description": "   "}));
        assert!(!shape.contains_key("description"));
        assert!(!shape.contains_key("properties"));
        assert!(!shape.contains_key("attunement_requirements"));
        assert_eq!(shape.get("name"), Some(&json!("Rope")));
        assert_eq!(shape.get("requires_attunement"), Some(&json!(false)));
    }

    #[test]
    fn preserve_list_keeps_empty_arrays() {
        let shape = stored(DomainTag::Npc, &json!({"name": "Mira"}));
        for key in PRESERVE_EMPTY {
            assert_eq!(shape.get(key), Some(&json!([])), "{key}");
        }
        assert!(!shape.contains_key("hooks"));
        assert!(!shape.contains_key("armor_class"));
    }

    #[test]
    fn aliases_and_envelopes_are_stripped() {
        let raw = json!({
            "deliverable": "npc",
            "draft": {"canonical_name": "Mira"},
            "npc": {"STR": 16, "personality_traits": ["curious"]},
            "notes_for_gm": "keep me",
        });
        let shape = stored(DomainTag::Npc, &raw);
        for gone in ["draft", "npc", "canonical_name", "STR", "personality_traits"] {
            assert!(!shape.contains_key(gone), "{gone}");
        }
        assert_eq!(shape["name"], json!("Mira"));
        assert_eq!(shape["ability_scores"]["str"], json!(16));
        assert_eq!(shape["personality"], json!({"traits": ["curious"]}));
        assert_eq!(shape["deliverable"], json!("npc"));
        assert_eq!(shape["notes_for_gm"], json!("keep me"));
    }

    #[test]
    fn nested_objects_prune_recursively() {
        let raw = json!({"name": "Vey", "hit_points": "27", "spellcasting": {"cantrips": []}});
        let shape = stored(DomainTag::Npc, &raw);
        assert_eq!(shape["hit_points"], json!({"average": 27}));
        assert!(!shape.contains_key("spellcasting"));
    }

    #[test]
    fn stat_block_is_kept_verbatim() {
        let raw = json!({"name": "Vey", "stat_block": {"notes": "", "ac": 15}});
        let shape = stored(DomainTag::Npc, &raw);
        assert_eq!(shape["stat_block"], json!({"notes": "", "ac": 15}));
    }

    #[test]
    fn edited_canonical_value_overrides_stale_alias() {
        let raw = json!({"name": "Old", "npc_name": "Old"});
        let StructuredContent::Npc(mut npc) = normalize(DomainTag::Npc, &raw) else {
            panic!("expected npc");
        };
        npc.name = "New".into();
        let shape = to_storage_shape(&StructuredContent::Npc(npc), &raw).unwrap();
        let again = normalize(DomainTag::Npc, &Value::Object(shape));
        assert_eq!(again.display_name(), "New");
    }

    #[test]
    fn cleared_item_type_stays_cleared() {
        let raw = json!({"name": "Blade", "type": "longsword"});
        let StructuredContent::Item(mut item) = normalize(DomainTag::Item, &raw) else {
            panic!("expected item");
        };
        assert_eq!(item.item_type, "longsword");
        item.item_type = String::new();
        let shape = to_storage_shape(&StructuredContent::Item(item), &raw).unwrap();
        assert!(!shape.contains_key("type"));
        let StructuredContent::Item(again) = normalize(DomainTag::Item, &Value::Object(shape)) else {
            panic!("expected item");
        };
        assert_eq!(again.item_type, "");
    }

    #[test]
    fn domain_naming_type_hint_is_kept() {
        let raw = json!({"name": "Saltmarsh", "type": "location", "kind": "port town"});
        let shape = stored(DomainTag::Location, &raw);
        assert_eq!(shape["type"], json!("location"));
        assert_eq!(shape["location_type"], json!("port town"));
        assert!(!shape.contains_key("kind"));
    }
}
