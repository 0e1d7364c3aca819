//! Hand-edited JSON recovery.
//!
//! Editors send canonical sub-structures back as text on every keystroke. A
//! parse failure keeps the last good value and reports a warning instead of
//! clearing the field.

use grim_core::StructuredContent;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::normalize::normalize;

/// The value to keep after an edit, plus a warning when the edit was
/// rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome<T> {
    pub value: T,
    pub warning: Option<String>,
}

impl<T> EditOutcome<T> {
    const fn accepted(value: T) -> Self {
        Self { value, warning: None }
    }

    /// Whether the edit was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.warning.is_none()
    }
}

/// Parse `text` as a `T`, or keep `previous` when it does not parse.
#[must_use]
pub fn apply_json_edit<T: DeserializeOwned + Clone>(previous: &T, text: &str) -> EditOutcome<T> {
    match serde_json::from_str::<T>(text) {
        Ok(value) => EditOutcome::accepted(value),
        Err(error) => {
            tracing::warn!(%error, "ignored malformed JSON edit; keeping previous value");
            EditOutcome {
                value: previous.clone(),
                warning: Some(format!("invalid JSON: {error}")),
            }
        }
    }
}

/// Replace one top-level field of `record` with the JSON in `text`, then
/// re-normalize the whole record.
///
/// The edited value goes through the domain normalizer, so loose shapes such
/// as `"15 (natural armor)"` for `armor_class` are accepted. Malformed JSON
/// leaves `record` unchanged.
#[must_use]
pub fn apply_field_edit(record: &StructuredContent, field: &str, text: &str) -> EditOutcome<StructuredContent> {
    let edited = apply_json_edit(&Value::Null, text);
    if let Some(warning) = edited.warning {
        return EditOutcome {
            value: record.clone(),
            warning: Some(format!("{field}: {warning}")),
        };
    }
    let mut data = match record.data_value() {
        Ok(Value::Object(map)) => map,
        Ok(_) => serde_json::Map::new(),
        Err(error) => {
            tracing::warn!(%error, field, "could not serialize record for edit");
            return EditOutcome {
                value: record.clone(),
                warning: Some(format!("{field}: {error}")),
            };
        }
    };
    data.insert(field.to_string(), edited.value);
    EditOutcome::accepted(normalize(record.domain(), &Value::Object(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grim_core::DomainTag;
    use grim_core::entities::{ArmorClass, ArmorClassEntry, Personality};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn malformed_json_keeps_previous() {
        let previous = Personality {
            traits: vec!["curious".into()],
            ..Personality::default()
        };
        let outcome = apply_json_edit(&previous, r#"{"traits": ["curious", "#);
        assert_eq!(outcome.value, previous);
        assert!(!outcome.is_applied());
        assert!(outcome.warning.unwrap().starts_with("invalid JSON"));
    }

    #[test]
    fn valid_json_replaces_value() {
        let previous = Personality::default();
        let outcome = apply_json_edit(&previous, r#"{"traits": ["bold"], "ideals": [], "bonds": [], "flaws": []}"#);
        assert!(outcome.is_applied());
        assert_eq!(outcome.value.traits, vec!["bold"]);
    }

    #[test]
    fn field_edit_renormalizes_loose_shapes() {
        let record = normalize(DomainTag::Npc, &json!({"name": "Mira"}));
        let outcome = apply_field_edit(&record, "armor_class", r#""15 (natural armor)""#);
        let StructuredContent::Npc(npc) = outcome.value else {
            panic!("expected npc");
        };
        assert_eq!(
            npc.armor_class,
            Some(ArmorClass::Entries(vec![ArmorClassEntry {
                value: 15,
                kind: Some("natural armor".into()),
                notes: None,
            }]))
        );
        assert_eq!(npc.name, "Mira");
    }

    #[test]
    fn field_edit_with_bad_json_is_a_no_op() {
        let record = normalize(DomainTag::Item, &json!({"name": "Moonblade", "rarity": "legendary"}));
        let outcome = apply_field_edit(&record, "properties", "[\"finesse\",");
        assert_eq!(outcome.value, record);
        assert!(outcome.warning.unwrap().starts_with("properties:"));
    }
}
