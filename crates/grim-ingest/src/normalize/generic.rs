use grim_core::coerce::{first_string, is_empty_value};
use grim_core::entities::GenericRecord;
use serde_json::Value;

use crate::payload::prepare_payload;

const TITLE: &[&str] = &["title", "name"];
const CONTENT: &[&str] = &["content", "text", "body"];

pub(super) const FIELDS: &[&[&str]] = &[TITLE, CONTENT];

/// Normalize an unclassified payload. A bare string payload is the content;
/// an object without a content field is kept as pretty-printed JSON.
#[must_use]
pub fn normalize_generic(raw: &Value) -> GenericRecord {
    if let Value::String(text) = raw {
        return GenericRecord {
            title: String::new(),
            content: text.trim().to_string(),
        };
    }
    let prepared = prepare_payload(raw);
    let mut content = first_string(&prepared, CONTENT);
    if content.is_empty() && !prepared.values().all(is_empty_value) {
        content = serde_json::to_string_pretty(&prepared).unwrap_or_default();
    }
    GenericRecord {
        title: first_string(&prepared, TITLE),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_payload_is_content() {
        let record = normalize_generic(&json!("  just text "));
        assert_eq!(record.content, "just text");
    }

    #[test]
    fn object_without_content_is_pretty_json() {
        let record = normalize_generic(&json!({"title": "Loose", "foo": 1}));
        assert_eq!(record.title, "Loose");
        assert!(record.content.contains("\"foo\": 1"));
    }

    #[test]
    fn empty_object_has_empty_content() {
        assert_eq!(normalize_generic(&json!({})), GenericRecord::default());
    }
}
