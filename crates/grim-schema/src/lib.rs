//! # grim-schema
//!
//! JSON Schema registry and validation for Grimoire records.
//!
//! This crate provides:
//! - `SchemaRegistry`: versioned in-memory schemas, seeded from the grim-core
//!   record types via `schemars`
//! - `DirectorySchemaSource`: `<dir>/<domain>.schema.json` files
//! - `ValidatorCache`: compiled `jsonschema` validators cached per domain
//! - `ValidationReport`: structured multi-error results, never an `Err`
//!
//! Validators are compiled once per domain and reused until refreshed.

pub mod error;
pub mod registry;
pub mod source;
pub mod validator;

pub use error::SchemaError;
pub use registry::{BUILTIN_VERSION, SchemaRegistry, builtin_schemas};
pub use source::{ActiveSchema, DirectorySchemaSource, SchemaFile, SchemaSource};
pub use validator::{DomainValidator, FieldError, ValidationReport, ValidatorCache};
