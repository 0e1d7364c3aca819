//! Map, normalize, then validate, as run before anything is saved.

use grim_core::entities::NpcRecord;
use grim_core::{DomainTag, StructuredContent};
use grim_ingest::{map_fields, normalize};
use grim_schema::{FieldError, SchemaSource, ValidatorCache};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PipelineError;

/// Result of [`map_and_validate`]. `data` is present only on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<FieldError>>,
    /// Validator messages as emitted, without paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_errors: Option<Vec<String>>,
    /// Version of the schema the record was checked against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}

pub type NpcValidationOutcome = ValidationOutcome<NpcRecord>;

impl<T> ValidationOutcome<T> {
    fn failed(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors,
            warnings,
            validation_errors: None,
            raw_errors: None,
            schema_version: None,
        }
    }

    fn map_data<U>(self, f: impl FnOnce(T) -> Option<U>) -> ValidationOutcome<U> {
        ValidationOutcome {
            success: self.success,
            data: self.data.and_then(f),
            errors: self.errors,
            warnings: self.warnings,
            validation_errors: self.validation_errors,
            raw_errors: self.raw_errors,
            schema_version: self.schema_version,
        }
    }
}

/// Map `raw` onto canonical names for `domain`, normalize it, and validate the
/// record against the domain's active schema.
///
/// Mapping errors stop before validation. Schema violations are reported in
/// the outcome.
///
/// # Errors
///
/// Returns [`PipelineError`] only when no validator is available or the
/// record cannot be serialized.
pub async fn map_and_validate<S: SchemaSource>(
    cache: &ValidatorCache<S>,
    domain: DomainTag,
    raw: &Value,
) -> Result<ValidationOutcome<StructuredContent>, PipelineError> {
    let mapping = map_fields(domain, raw);
    if !mapping.errors.is_empty() {
        tracing::debug!(%domain, errors = mapping.errors.len(), "mapping failed; skipping validation");
        return Ok(ValidationOutcome::failed(mapping.errors, mapping.warnings));
    }

    let record = normalize(domain, raw);
    let validator = match cache.get_validator(domain).await {
        Ok(validator) => validator,
        Err(error) => {
            tracing::warn!(%error, %domain, "schema validator unavailable");
            return Err(error.into());
        }
    };
    let report = validator.validate(&record.data_value()?);
    let schema_version = Some(validator.version().to_string());

    if report.valid {
        return Ok(ValidationOutcome {
            success: true,
            data: Some(record),
            errors: Vec::new(),
            warnings: mapping.warnings,
            validation_errors: None,
            raw_errors: None,
            schema_version,
        });
    }

    let field_errors = report.errors.unwrap_or_default();
    let details = report.details.unwrap_or_default();
    Ok(ValidationOutcome {
        success: false,
        data: None,
        errors: vec![format!("schema validation failed: {details}")],
        warnings: mapping.warnings,
        raw_errors: Some(field_errors.iter().map(|e| e.message.clone()).collect()),
        validation_errors: Some(field_errors),
        schema_version,
    })
}

/// [`map_and_validate`] for NPC payloads, yielding the NPC record itself.
///
/// # Errors
///
/// Same as [`map_and_validate`].
pub async fn map_and_validate_npc<S: SchemaSource>(
    cache: &ValidatorCache<S>,
    raw: &Value,
) -> Result<NpcValidationOutcome, PipelineError> {
    let outcome = map_and_validate(cache, DomainTag::Npc, raw).await?;
    Ok(outcome.map_data(|record| match record {
        StructuredContent::Npc(npc) => Some(npc),
        _ => None,
    }))
}
