//! Never-failing readers over `serde_json::Value`.
//!
//! Every function here accepts any JSON shape and degrades to an empty value
//! (`""`, `None`, `[]`, `{}`) instead of failing. A wrong shape is a coercion
//! miss, which is silently defaulted by the callers.
//!
//! The `first_*` helpers resolve one canonical field over an ordered list of
//! alias keys. They return the first **non-empty** match, so an empty canonical
//! key never shadows a populated alias.

use std::sync::LazyLock;

use serde_json::{Map, Value};

static EMPTY_OBJECT: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// The string content of `value`, or `""` for any non-string.
#[must_use]
pub fn ensure_string(value: &Value) -> String {
    value.as_str().map(str::to_string).unwrap_or_default()
}

/// A JSON number, or a string that parses as one after trimming and dropping
/// a leading `+`.
#[must_use]
pub fn ensure_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
            unsigned.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// [`ensure_number`] truncated toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn ensure_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    ensure_number(value).map(|f| f.trunc() as i64)
}

/// Booleans, plus the usual `"yes"`/`"no"`/`"true"`/`"false"` strings and
/// numeric zero/non-zero.
#[must_use]
pub fn ensure_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "required" => Some(true),
            "false" | "no" | "n" | "none" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// The elements of an array, or an empty slice.
#[must_use]
pub fn ensure_array(value: &Value) -> &[Value] {
    value.as_array().map_or(&[], Vec::as_slice)
}

/// Map each array element through `mapper`, dropping elements it rejects.
pub fn ensure_array_with<T>(value: &Value, mapper: impl FnMut(&Value) -> Option<T>) -> Vec<T> {
    ensure_array(value).iter().filter_map(mapper).collect()
}

/// The object map of `value`, or a shared empty map.
#[must_use]
pub fn ensure_object(value: &Value) -> &Map<String, Value> {
    value
        .as_object()
        .unwrap_or_else(|| LazyLock::force(&EMPTY_OBJECT))
}

/// A list of non-empty strings.
///
/// Arrays contribute their string elements, numbers (stringified), and the
/// `name`/`title` of object elements. A lone string becomes one item per
/// non-empty line, with leading bullet markers stripped.
#[must_use]
pub fn ensure_string_array(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(item_label).collect(),
        Value::String(s) => s
            .lines()
            .map(strip_bullet)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Like [`ensure_string_array`], but a lone string is also split on `,` and
/// `;`. Used for short-token lists such as languages or damage types.
#[must_use]
pub fn split_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split([',', ';', '\n'])
            .map(strip_bullet)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        other => ensure_string_array(other),
    }
}

fn item_label(item: &Value) -> Option<String> {
    let label = match item {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => first_string(map, &["name", "title", "label"]),
        _ => String::new(),
    };
    (!label.is_empty()).then_some(label)
}

fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed
        .strip_prefix(['-', '*', '•'])
        .map_or(trimmed, str::trim_start)
}

/// Whether a value counts as absent for lookup and storage purposes:
/// `null`, a blank string, an empty array, or an empty object.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// The first non-empty value among `keys`.
#[must_use]
pub fn first_value<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !is_empty_value(value))
}

/// The first non-blank string among `keys`, trimmed.
#[must_use]
pub fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Like [`first_string`], returning `None` instead of `""`.
#[must_use]
pub fn first_opt_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    Some(first_string(obj, keys)).filter(|s| !s.is_empty())
}

/// The first value among `keys` that coerces to a number.
#[must_use]
pub fn first_number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(ensure_number)
}

/// The first value among `keys` that coerces to an integer.
#[must_use]
pub fn first_integer(obj: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(ensure_integer)
}

/// The first non-empty string list among `keys`.
#[must_use]
pub fn first_string_array(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .map(ensure_string_array)
        .find(|items| !items.is_empty())
        .unwrap_or_default()
}

/// The first non-empty split list among `keys`; see [`split_list`].
#[must_use]
pub fn first_split_list(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .map(split_list)
        .find(|items| !items.is_empty())
        .unwrap_or_default()
}

/// The first object-valued entry among `keys`, or the shared empty map.
#[must_use]
pub fn first_object<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> &'a Map<String, Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_object))
        .find(|map| !map.is_empty())
        .unwrap_or_else(|| LazyLock::force(&EMPTY_OBJECT))
}

/// Truncate to at most `max` characters, trimming trailing whitespace.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].trim_end().to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn ensure_string_only_accepts_strings() {
        assert_eq!(ensure_string(&json!("abc")), "abc");
        assert_eq!(ensure_string(&json!(12)), "");
        assert_eq!(ensure_string(&json!(null)), "");
        assert_eq!(ensure_string(&json!({"a": 1})), "");
    }

    #[test]
    fn ensure_number_parses_numeric_strings() {
        assert_eq!(ensure_number(&json!(7)), Some(7.0));
        assert_eq!(ensure_number(&json!(" +5 ")), Some(5.0));
        assert_eq!(ensure_number(&json!("-2")), Some(-2.0));
        assert_eq!(ensure_number(&json!("five")), None);
        assert_eq!(ensure_number(&json!(true)), None);
    }

    #[test]
    fn ensure_integer_preserves_zero_and_truncates() {
        assert_eq!(ensure_integer(&json!(0)), Some(0));
        assert_eq!(ensure_integer(&json!(15.9)), Some(15));
        assert_eq!(ensure_integer(&json!("12")), Some(12));
        assert_eq!(ensure_integer(&json!([])), None);
    }

    #[test]
    fn ensure_bool_reads_words() {
        assert_eq!(ensure_bool(&json!("Yes")), Some(true));
        assert_eq!(ensure_bool(&json!("no")), Some(false));
        assert_eq!(ensure_bool(&json!(0)), Some(false));
        assert_eq!(ensure_bool(&json!("maybe")), None);
    }

    #[test]
    fn ensure_array_and_object_degrade() {
        assert!(ensure_array(&json!("x")).is_empty());
        assert_eq!(ensure_array(&json!([1, 2])).len(), 2);
        assert!(ensure_object(&json!([1])).is_empty());
        assert_eq!(ensure_object(&json!({"a": 1})).len(), 1);
    }

    #[test]
    fn ensure_array_with_drops_rejected() {
        let evens = ensure_array_with(&json!([1, 2, "x", 4]), |v| {
            v.as_i64().filter(|n| n % 2 == 0)
        });
        assert_eq!(evens, vec![2, 4]);
    }

    #[test]
    fn string_array_collects_mixed_entries() {
        let items = ensure_string_array(&json!(["rope", " ", 3, {"name": "Wand of Sparks"}, null]));
        assert_eq!(items, vec!["rope", "3", "Wand of Sparks"]);
    }

    #[test]
    fn string_array_splits_bulleted_lines() {
        let items = ensure_string_array(&json!("- first hook\n\n* second, with comma"));
        assert_eq!(items, vec!["first hook", "second, with comma"]);
    }

    #[test]
    fn split_list_splits_commas() {
        assert_eq!(split_list(&json!("Common, Elvish; Draconic")), vec!["Common", "Elvish", "Draconic"]);
        assert_eq!(split_list(&json!(["fire"])), vec!["fire"]);
    }

    #[test]
    fn first_string_skips_blank_canonical_key() {
        let obj = json!({"description": "  ", "summary": "A tall elf"});
        let map = ensure_object(&obj);
        assert_eq!(first_string(map, &["description", "summary"]), "A tall elf");
        assert_eq!(first_opt_string(map, &["missing"]), None);
    }

    #[test]
    fn first_number_skips_unparsable() {
        let obj = json!({"level": "high", "lvl": "4"});
        assert_eq!(first_integer(ensure_object(&obj), &["level", "lvl"]), Some(4));
    }

    #[test]
    fn empty_value_rules() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("\t")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
    }

    #[test]
    fn truncate_is_char_aware() {
        assert_eq!(truncate_chars("héllo world", 5), "héllo");
        assert_eq!(truncate_chars("abc def", 4), "abc");
        assert_eq!(truncate_chars("short", 80), "short");
    }
}
