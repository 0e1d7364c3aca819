//! # grim-pipeline
//!
//! The two entry points the save and generation paths call:
//! - [`map_generated_content_to_content_block`]: classify, normalize, and
//!   render a generation result into a [`ContentBlock`]
//! - [`map_and_validate`] / [`map_and_validate_npc`]: map and normalize a
//!   payload, then check it against the active schema
//!
//! Outcomes are data. `Err` means the schema infrastructure itself failed.

pub mod block;
pub mod error;
pub mod validate;

pub use block::{
    BlockMetadata, ContentBlock, GeneratedContent, map_generated_content_to_content_block,
    map_generated_content_with,
};
pub use error::PipelineError;
pub use validate::{NpcValidationOutcome, ValidationOutcome, map_and_validate, map_and_validate_npc};
