//! Domain normalizers.
//!
//! One total function per domain turns a raw payload into a fully-shaped
//! canonical record. Each domain module declares the alias keys it reads per
//! canonical field; [`field_keys`] exposes them so the storage serializer can
//! strip stale aliases before writing canonical values back.

pub mod common;
mod encounter;
mod generic;
mod item;
mod location;
mod monster;
mod npc;
mod story_arc;
mod writing;

use grim_core::{DomainTag, StructuredContent};
use serde_json::Value;

pub use encounter::normalize_encounter;
pub use generic::normalize_generic;
pub use item::normalize_item;
pub use location::normalize_location;
pub use monster::normalize_monster;
pub use npc::normalize_npc;
pub use story_arc::normalize_story_arc;
pub use writing::normalize_writing;

/// Classifier hint keys. Normalizers may read them but storage keeps them.
pub const HINT_KEYS: [&str; 4] = ["deliverable", "content_type", "type", "domain"];

/// Keys shared by every RPG and writing record.
pub(crate) const SOURCES_USED: &[&str] = &["sources_used", "sources"];
pub(crate) const ASSUMPTIONS: &[&str] = &["assumptions"];

/// Normalize `raw` as a `domain` record and wrap it in its envelope.
#[must_use]
pub fn normalize(domain: DomainTag, raw: &Value) -> StructuredContent {
    match domain {
        DomainTag::Npc => StructuredContent::Npc(normalize_npc(raw)),
        DomainTag::Monster => StructuredContent::Monster(normalize_monster(raw)),
        DomainTag::Item => StructuredContent::Item(normalize_item(raw)),
        DomainTag::Location => StructuredContent::Location(normalize_location(raw)),
        DomainTag::StoryArc => StructuredContent::StoryArc(normalize_story_arc(raw)),
        DomainTag::Encounter => StructuredContent::Encounter(normalize_encounter(raw)),
        DomainTag::Writing => StructuredContent::Writing(normalize_writing(raw)),
        DomainTag::Generic => StructuredContent::Generic(normalize_generic(raw)),
    }
}

fn tables(domain: DomainTag) -> &'static [&'static [&'static str]] {
    match domain {
        DomainTag::Npc => npc::FIELDS,
        DomainTag::Monster => monster::FIELDS,
        DomainTag::Item => item::FIELDS,
        DomainTag::Location => location::FIELDS,
        DomainTag::StoryArc => story_arc::FIELDS,
        DomainTag::Encounter => encounter::FIELDS,
        DomainTag::Writing => writing::FIELDS,
        DomainTag::Generic => generic::FIELDS,
    }
}

/// Every top-level key the `domain` normalizer reads, canonical and alias,
/// except the [`HINT_KEYS`].
#[must_use]
pub fn field_keys(domain: DomainTag) -> Vec<&'static str> {
    tables(domain)
        .iter()
        .flat_map(|keys| keys.iter().copied())
        .filter(|key| !HINT_KEYS.contains(key))
        .collect()
}

/// The [`HINT_KEYS`] the `domain` normalizer also reads as field aliases,
/// such as `type` for an item's `item_type`.
#[must_use]
pub fn hint_aliases(domain: DomainTag) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = tables(domain)
        .iter()
        .flat_map(|keys| keys.iter().copied())
        .filter(|key| HINT_KEYS.contains(key))
        .collect();
    keys.dedup();
    keys
}
