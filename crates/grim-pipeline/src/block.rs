//! Generated content to persisted content block.

use grim_core::StructuredContent;
use grim_ingest::{classify_traced, normalize};
use grim_render::{RenderOptions, UNTITLED, render_with};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One generation result as handed over by the run orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverable: Option<String>,
    #[serde(default)]
    pub title: String,
    pub generated_content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_proposals: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_conflicts: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetadata {
    pub structured_content: StructuredContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_proposals: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_conflicts: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}

/// A titled, rendered block with its canonical record in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub title: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub content: String,
    pub metadata: BlockMetadata,
}

/// Map generated content with default render options.
#[must_use]
pub fn map_generated_content_to_content_block(input: &GeneratedContent) -> ContentBlock {
    map_generated_content_with(input, &RenderOptions::default())
}

/// Classify, normalize, and render `input` into a content block.
///
/// The block title is the caller's title, else the record's own name, else
/// [`UNTITLED`].
#[must_use]
pub fn map_generated_content_with(input: &GeneratedContent, options: &RenderOptions) -> ContentBlock {
    let raw = &input.generated_content;
    let classification = classify_traced(raw, input.content_type.as_deref(), input.deliverable.as_deref());
    tracing::debug!(domain = %classification.tag, rule = classification.rule, "mapped generated content");
    let record = normalize(classification.tag, raw);
    block_for(record, input, options)
}

fn block_for(record: StructuredContent, input: &GeneratedContent, options: &RenderOptions) -> ContentBlock {
    let title = [input.title.trim(), record.display_name().trim()]
        .into_iter()
        .find(|t| !t.is_empty())
        .unwrap_or(UNTITLED)
        .to_string();
    ContentBlock {
        title,
        block_type: record.domain().as_str().to_string(),
        content: render_with(&record, options),
        metadata: BlockMetadata {
            schema_version: record.schema_version().map(str::to_string),
            structured_content: record,
            deliverable: input.deliverable.clone(),
            content_type: input.content_type.clone(),
            resolved_proposals: input.resolved_proposals.clone(),
            resolved_conflicts: input.resolved_conflicts.clone(),
        },
    }
}
