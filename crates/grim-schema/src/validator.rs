//! Compiled per-domain validators and their process-wide cache.

use std::sync::Arc;

use dashmap::DashMap;
use grim_core::DomainTag;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;
use crate::source::{ActiveSchema, SchemaSource};

/// One failed constraint, located by JSON pointer into the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Outcome of validating one record. Invalid records carry both the error
/// list and a `; `-joined summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ValidationReport {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            errors: None,
            details: None,
        }
    }

    #[must_use]
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            return Self::ok();
        }
        let details = errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            valid: false,
            errors: Some(errors),
            details: Some(details),
        }
    }
}

/// A schema compiled for one domain at one version.
pub struct DomainValidator {
    domain: DomainTag,
    version: semver::Version,
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for DomainValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainValidator")
            .field("domain", &self.domain)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl DomainValidator {
    /// Compile an active schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the schema document is invalid.
    pub fn compile(domain: DomainTag, active: &ActiveSchema) -> Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(&active.schema).map_err(|e| SchemaError::Compile {
            domain,
            message: e.to_string(),
        })?;
        Ok(Self {
            domain,
            version: active.version.clone(),
            validator,
        })
    }

    #[must_use]
    pub const fn domain(&self) -> DomainTag {
        self.domain
    }

    #[must_use]
    pub const fn version(&self) -> &semver::Version {
        &self.version
    }

    /// Validate a record value. Never fails; violations land in the report.
    #[must_use]
    pub fn validate(&self, record: &Value) -> ValidationReport {
        let errors = self
            .validator
            .iter_errors(record)
            .map(|error| {
                let path = error.instance_path.to_string();
                FieldError {
                    path: if path.is_empty() { "/".to_string() } else { path },
                    message: error.to_string(),
                }
            })
            .collect();
        ValidationReport::from_errors(errors)
    }
}

/// Validators keyed by domain, compiled on first use from a [`SchemaSource`].
///
/// Lookups after the first are lock-free reads. A cache entry lives until
/// [`refresh`](Self::refresh) recompiles it or
/// [`clear_cache`](Self::clear_cache) drops everything.
pub struct ValidatorCache<S> {
    source: S,
    validators: DashMap<DomainTag, Arc<DomainValidator>>,
}

impl<S: SchemaSource> ValidatorCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            validators: DashMap::new(),
        }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The cached validator for `domain`, compiling it on a miss.
    ///
    /// # Errors
    ///
    /// Returns the source's lookup error or [`SchemaError::Compile`].
    pub async fn get_validator(&self, domain: DomainTag) -> Result<Arc<DomainValidator>, SchemaError> {
        if let Some(cached) = self.cached(domain) {
            return Ok(cached);
        }
        let compiled = self.compile(domain).await?;
        // A concurrent miss may have filled the slot first; keep that one.
        let entry = self.validators.entry(domain).or_insert(compiled);
        Ok(Arc::clone(entry.value()))
    }

    /// Recompile `domain` from the source and replace the cached entry.
    ///
    /// # Errors
    ///
    /// Returns the source's lookup error or [`SchemaError::Compile`]. The
    /// previous entry is kept on failure.
    pub async fn refresh(&self, domain: DomainTag) -> Result<Arc<DomainValidator>, SchemaError> {
        let compiled = self.compile(domain).await?;
        self.validators.insert(domain, Arc::clone(&compiled));
        tracing::info!(%domain, version = %compiled.version, "refreshed validator");
        Ok(compiled)
    }

    /// Validate `record` against the active schema of `domain`.
    ///
    /// # Errors
    ///
    /// Returns an error only when no validator can be obtained.
    pub async fn validate(&self, domain: DomainTag, record: &Value) -> Result<ValidationReport, SchemaError> {
        Ok(self.get_validator(domain).await?.validate(record))
    }

    /// The cached validator for `domain`, without touching the source.
    #[must_use]
    pub fn cached(&self, domain: DomainTag) -> Option<Arc<DomainValidator>> {
        self.validators.get(&domain).map(|entry| Arc::clone(entry.value()))
    }

    pub fn clear_cache(&self) {
        self.validators.clear();
        tracing::debug!("cleared validator cache");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    async fn compile(&self, domain: DomainTag) -> Result<Arc<DomainValidator>, SchemaError> {
        let active = self.source.find_active_schema(domain).await?;
        let validator = DomainValidator::compile(domain, &active)?;
        tracing::debug!(%domain, version = %validator.version, "compiled validator");
        Ok(Arc::new(validator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_joins_details() {
        let report = ValidationReport::from_errors(vec![
            FieldError {
                path: "/name".into(),
                message: "42 is not of type \"string\"".into(),
            },
            FieldError {
                path: "/".into(),
                message: "\"race\" is a required property".into(),
            },
        ]);
        assert!(!report.valid);
        assert_eq!(
            report.details.as_deref(),
            Some("/name: 42 is not of type \"string\"; /: \"race\" is a required property")
        );
    }

    #[test]
    fn empty_error_list_is_valid() {
        let report = ValidationReport::from_errors(Vec::new());
        assert_eq!(report, ValidationReport::ok());
        assert_eq!(serde_json::to_value(&report).unwrap(), serde_json::json!({"valid": true}));
    }
}
