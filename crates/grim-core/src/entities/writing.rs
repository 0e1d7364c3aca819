use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One chapter of a prose work.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub summary: String,
    pub content: String,
}

/// Canonical record for prose, fiction or nonfiction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WritingRecord {
    #[schemars(length(min = 1))]
    pub title: String,
    pub work_type: String,
    pub genre: String,
    pub audience: String,
    pub summary: String,
    pub table_of_contents: Vec<String>,
    pub chapters: Vec<Chapter>,
    /// The draft body, markdown-like.
    pub formatted_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,
    pub sources_used: Vec<String>,
    pub assumptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}
