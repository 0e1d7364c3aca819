//! # grim-ingest
//!
//! Turns loosely-structured generated JSON into canonical records.
//!
//! Stages, in pipeline order:
//! - [`payload`]: merge the `draft` sub-object and domain envelopes
//! - [`classify`]: infer the [`DomainTag`](grim_core::DomainTag) from an ordered rule chain
//! - [`field_map`]: rewrite known field-name variants onto canonical names
//! - [`normalize`]: build a fully-defaulted canonical record per domain
//! - [`serialize`]: flatten a record back into a storage-shaped object
//! - [`edit`]: apply hand-edited JSON without corrupting the last good value
//!
//! Every function here is total. Wrong shapes are defaulted, never raised.

pub mod classify;
pub mod edit;
pub mod field_map;
pub mod normalize;
pub mod payload;
pub mod serialize;

pub use classify::{Classification, classify, classify_traced};
pub use edit::{EditOutcome, apply_field_edit, apply_json_edit};
pub use field_map::{MappingResult, map_fields};
pub use normalize::normalize;
pub use serialize::to_storage_shape;
