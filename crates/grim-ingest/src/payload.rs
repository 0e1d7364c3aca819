//! Payload preparation shared by every stage.

use grim_core::DomainTag;
use grim_core::coerce::ensure_object;
use serde_json::{Map, Value};

/// Key of the producer's draft sub-object, merged over the top level.
pub const DRAFT_KEY: &str = "draft";

/// Every envelope key any domain unwraps.
pub const ALL_ENVELOPE_KEYS: [&str; 9] = [
    "npc",
    "character",
    "monster",
    "item",
    "location",
    "story_arc",
    "arc",
    "encounter",
    "work",
];

/// Sub-object keys whose fields are merged over the top level for a domain.
#[must_use]
pub const fn envelope_keys(domain: DomainTag) -> &'static [&'static str] {
    match domain {
        DomainTag::Npc => &["character", "npc"],
        DomainTag::Monster => &["monster"],
        DomainTag::Item => &["item"],
        DomainTag::Location => &["location"],
        DomainTag::StoryArc => &["arc", "story_arc"],
        DomainTag::Encounter => &["encounter"],
        DomainTag::Writing => &["work"],
        DomainTag::Generic => &[],
    }
}

/// The payload as an object with its `draft` keys merged over the top level.
///
/// Non-object payloads prepare to an empty object.
#[must_use]
pub fn prepare_payload(raw: &Value) -> Map<String, Value> {
    let mut merged = ensure_object(raw).clone();
    if let Some(Value::Object(draft)) = merged.remove(DRAFT_KEY) {
        merge_over(&mut merged, draft);
    }
    merged
}

/// [`prepare_payload`] plus the domain's envelope sub-objects merged over the
/// result. Later envelope keys win.
#[must_use]
pub fn domain_view(raw: &Value, domain: DomainTag) -> Map<String, Value> {
    let mut view = prepare_payload(raw);
    for key in envelope_keys(domain) {
        if let Some(Value::Object(inner)) = view.get(*key).cloned() {
            view.remove(*key);
            merge_over(&mut view, inner);
        }
    }
    view
}

fn merge_over(target: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        target.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn draft_keys_win_over_top_level() {
        let raw = json!({"name": "Old", "role": "smith", "draft": {"name": "New"}});
        let prepared = prepare_payload(&raw);
        assert_eq!(prepared.get("name"), Some(&json!("New")));
        assert_eq!(prepared.get("role"), Some(&json!("smith")));
        assert!(!prepared.contains_key(DRAFT_KEY));
    }

    #[test]
    fn non_object_draft_is_dropped() {
        let prepared = prepare_payload(&json!({"draft": "text", "a": 1}));
        assert_eq!(Value::Object(prepared), json!({"a": 1}));
    }

    #[test]
    fn non_object_payload_prepares_empty() {
        assert!(prepare_payload(&json!([1, 2, 3])).is_empty());
        assert!(prepare_payload(&json!("hello")).is_empty());
    }

    #[test]
    fn envelope_merges_for_matching_domain_only() {
        let raw = json!({"deliverable": "npc", "npc": {"name": "Mira"}});
        let view = domain_view(&raw, DomainTag::Npc);
        assert_eq!(view.get("name"), Some(&json!("Mira")));
        assert!(!view.contains_key("npc"));

        let other = domain_view(&raw, DomainTag::Item);
        assert!(other.contains_key("npc"));
        assert!(!other.contains_key("name"));
    }
}
