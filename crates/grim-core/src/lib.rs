//! # grim-core
//!
//! Core types and coercion helpers for Grimoire.
//!
//! This crate provides the foundational types shared across all Grimoire crates:
//! - `DomainTag`, the inferred content category of a payload
//! - Cross-domain primitives (ability scores, armor class, hit points, features)
//! - One canonical record per content domain (NPC, monster, item, ...)
//! - The `StructuredContent` `{type, data}` envelope embedded in content blocks
//! - Never-failing coercion readers over `serde_json::Value`
//! - Cross-cutting error types

pub mod coerce;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod structured;

pub use enums::DomainTag;
pub use errors::CoreError;
pub use structured::StructuredContent;
