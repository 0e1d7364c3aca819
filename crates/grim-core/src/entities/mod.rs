//! Canonical records for every content domain.
//!
//! A canonical record is fully shaped: every field is present and defaulted.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so the
//! schema registry can publish one JSON Schema per domain.

mod encounter;
mod generic;
mod item;
mod location;
mod monster;
mod npc;
mod primitives;
mod story_arc;
mod writing;

pub use encounter::{EncounterMonster, EncounterRecord};
pub use generic::GenericRecord;
pub use item::{ItemProperty, ItemRecord};
pub use location::{LocationRecord, PointOfInterest};
pub use monster::MonsterRecord;
pub use npc::NpcRecord;
pub use primitives::{
    AbilityScores, ArmorClass, ArmorClassEntry, ClassLevel, DEFAULT_ABILITY_SCORE, Feature,
    HitPoints, Personality, Relationship, ScoredEntry, SpellcastingSummary,
};
pub use story_arc::{ArcAct, ArcCharacter, StoryArcRecord};
pub use writing::{Chapter, WritingRecord};
