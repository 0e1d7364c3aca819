use grim_core::DomainTag;
use grim_core::coerce::{
    ensure_array, first_integer, first_opt_string, first_string, first_string_array, first_value,
};
use grim_core::entities::{Chapter, WritingRecord};
use serde_json::Value;

use super::common::FieldView;
use super::{ASSUMPTIONS, SOURCES_USED};
use crate::field_map::{SCHEMA_VERSION_VARIANTS, map_fields};

const TITLE: &[&str] = &["title", "name", "working_title"];
const WORK_TYPE: &[&str] = &["work_type", "format", "kind"];
const GENRE: &[&str] = &["genre", "genres"];
const AUDIENCE: &[&str] = &["audience", "target_audience"];
const SUMMARY: &[&str] = &["summary", "synopsis", "description"];
const TABLE_OF_CONTENTS: &[&str] = &["table_of_contents", "toc", "outline"];
const CHAPTERS: &[&str] = &["chapters", "sections"];
const FORMATTED_TEXT: &[&str] = &["formatted_text", "draft_text"];
const WORD_COUNT: &[&str] = &["word_count", "wordCount"];

pub(super) const FIELDS: &[&[&str]] = &[
    TITLE,
    WORK_TYPE,
    GENRE,
    AUDIENCE,
    SUMMARY,
    TABLE_OF_CONTENTS,
    CHAPTERS,
    FORMATTED_TEXT,
    WORD_COUNT,
    SOURCES_USED,
    ASSUMPTIONS,
    SCHEMA_VERSION_VARIANTS,
];

/// Normalize a prose payload. The word count is computed from the formatted
/// text, or from the chapter contents, when the producer gave none.
#[must_use]
pub fn normalize_writing(raw: &Value) -> WritingRecord {
    let mapped = map_fields(DomainTag::Writing, raw).mapped;
    let view = FieldView::new(&mapped);
    let chapters = first_value(&mapped, CHAPTERS).map(chapters).unwrap_or_default();
    let formatted_text = first_value(&mapped, FORMATTED_TEXT)
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .unwrap_or_default();
    let word_count = first_integer(&mapped, WORD_COUNT).or_else(|| count_words(&formatted_text, &chapters));

    WritingRecord {
        title: view.string(TITLE),
        work_type: view.descriptive(WORK_TYPE),
        genre: view.text(GENRE),
        audience: view.text(AUDIENCE),
        summary: view.string(SUMMARY),
        table_of_contents: view.strings(TABLE_OF_CONTENTS),
        chapters,
        formatted_text,
        word_count,
        sources_used: first_string_array(&mapped, SOURCES_USED),
        assumptions: first_string_array(&mapped, ASSUMPTIONS),
        schema_version: first_opt_string(&mapped, &["schema_version"]),
    }
}

fn chapters(value: &Value) -> Vec<Chapter> {
    ensure_array(value)
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(Chapter {
                title: first_string(map, &["title", "name", "heading"]),
                summary: first_string(map, &["summary", "description"]),
                content: first_string(map, &["content", "text", "body"]),
            }),
            Value::String(s) => Some(Chapter {
                title: s.trim().to_string(),
                ..Chapter::default()
            }),
            _ => None,
        })
        .filter(|c| !c.title.is_empty() || !c.summary.is_empty() || !c.content.is_empty())
        .collect()
}

#[allow(clippy::cast_possible_wrap)]
fn count_words(text: &str, chapters: &[Chapter]) -> Option<i64> {
    let words = if text.is_empty() {
        chapters.iter().map(|c| c.content.split_whitespace().count()).sum()
    } else {
        text.split_whitespace().count()
    };
    (words > 0).then_some(words as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn draft_text_fills_formatted_text_and_counts_words() {
        let writing = normalize_writing(&json!({
            "work": {"working_title": "Field Notes", "format": "essay"},
            "draft_text": "# One\n\nIt began in the marsh.",
        }));
        assert_eq!(writing.title, "Field Notes");
        assert_eq!(writing.work_type, "essay");
        assert_eq!(writing.formatted_text, "# One\n\nIt began in the marsh.");
        assert_eq!(writing.word_count, Some(7));
    }

    #[test]
    fn explicit_word_count_wins_and_chapters_parse() {
        let writing = normalize_writing(&json!({
            "title": "Atlas",
            "word_count": 1200,
            "chapters": [{"heading": "Maps", "body": "Lines on paper."}, "Coda"],
        }));
        assert_eq!(writing.word_count, Some(1200));
        assert_eq!(writing.chapters[0].title, "Maps");
        assert_eq!(writing.chapters[1].title, "Coda");
    }

    #[test]
    fn chapter_words_counted_without_text() {
        let writing = normalize_writing(&json!({"chapters": [{"content": "one two"}, {"content": "three"}]}));
        assert_eq!(writing.word_count, Some(3));
    }
}
