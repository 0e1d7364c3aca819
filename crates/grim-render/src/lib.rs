//! # grim-render
//!
//! Deterministic markdown rendering of canonical Grimoire records.
//!
//! Every domain has a fixed section order. A section appears only when its
//! backing field is non-empty, so two records with the same content always
//! render to the same text regardless of the payload they came from.
//!
//! The [`blocks`] module holds the lighter draft-text reader used for
//! free-form prose.

pub mod blocks;
mod document;
mod domains;

use grim_core::StructuredContent;

pub use blocks::{Block, demote_headings, parse_blocks, render_blocks};
pub use document::UNTITLED;

/// Default markdown level of domain section headings.
pub const DEFAULT_HEADING_LEVEL: u8 = 3;

/// Rendering knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Level of section headings; the title is always level 1.
    pub heading_level: u8,
    /// Emit the raw NPC stat block as a JSON fence.
    pub include_stat_block: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading_level: DEFAULT_HEADING_LEVEL,
            include_stat_block: true,
        }
    }
}

/// Render a record with default options.
#[must_use]
pub fn render(record: &StructuredContent) -> String {
    render_with(record, &RenderOptions::default())
}

/// Render a record as markdown.
#[must_use]
pub fn render_with(record: &StructuredContent, options: &RenderOptions) -> String {
    match record {
        StructuredContent::Npc(npc) => domains::npc::render(npc, options),
        StructuredContent::Monster(monster) => domains::monster::render(monster, options),
        StructuredContent::Item(item) => domains::lore::render_item(item, options),
        StructuredContent::Location(location) => domains::lore::render_location(location, options),
        StructuredContent::StoryArc(arc) => domains::lore::render_story_arc(arc, options),
        StructuredContent::Encounter(encounter) => domains::lore::render_encounter(encounter, options),
        StructuredContent::Writing(writing) => domains::prose::render_writing(writing, options),
        StructuredContent::Generic(generic) => domains::prose::render_generic(generic, options),
    }
}
