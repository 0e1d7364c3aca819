//! Where active schemas come from.

use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use grim_core::DomainTag;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// One published, versioned schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSchema {
    pub version: semver::Version,
    pub schema: Value,
    pub published_at: Option<DateTime<Utc>>,
}

impl ActiveSchema {
    /// Build from a version string.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidVersion`] if `version` is not semver.
    pub fn new(version: &str, schema: Value) -> Result<Self, SchemaError> {
        Ok(Self {
            version: parse_version(version)?,
            schema,
            published_at: None,
        })
    }
}

pub(crate) fn parse_version(version: &str) -> Result<semver::Version, SchemaError> {
    semver::Version::parse(version.trim()).map_err(|source| SchemaError::InvalidVersion {
        version: version.to_string(),
        source,
    })
}

/// Lookup seam for the schema registry backing a validator cache.
pub trait SchemaSource: Send + Sync {
    /// The schema currently active for `domain`.
    fn find_active_schema(
        &self,
        domain: DomainTag,
    ) -> impl Future<Output = Result<ActiveSchema, SchemaError>> + Send;
}

/// On-disk shape of `<domain>.schema.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaFile {
    pub version: String,
    pub schema: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Reads schemas from `<dir>/<domain>.schema.json` on every lookup.
#[derive(Debug, Clone)]
pub struct DirectorySchemaSource {
    dir: PathBuf,
}

impl DirectorySchemaSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, domain: DomainTag) -> PathBuf {
        self.dir.join(format!("{}.schema.json", domain.as_str()))
    }
}

impl SchemaSource for DirectorySchemaSource {
    async fn find_active_schema(&self, domain: DomainTag) -> Result<ActiveSchema, SchemaError> {
        let path = self.path_for(domain);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(SchemaError::NotFound(domain));
            }
            Err(source) => return Err(SchemaError::Io { path, source }),
        };
        let file: SchemaFile =
            serde_json::from_str(&text).map_err(|source| SchemaError::Parse { path: path.clone(), source })?;
        tracing::debug!(%domain, version = %file.version, path = %path.display(), "loaded schema file");
        Ok(ActiveSchema {
            version: parse_version(&file.version)?,
            schema: file.schema,
            published_at: file.published_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn reads_domain_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySchemaSource::new(dir.path());
        std::fs::write(
            source.path_for(DomainTag::StoryArc),
            json!({"version": "2.1.0", "schema": {"type": "object"}}).to_string(),
        )
        .unwrap();

        let active = source.find_active_schema(DomainTag::StoryArc).await.unwrap();
        assert_eq!(active.version, semver::Version::new(2, 1, 0));
        assert_eq!(active.schema, json!({"type": "object"}));
        assert!(source.path_for(DomainTag::StoryArc).ends_with("story_arc.schema.json"));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySchemaSource::new(dir.path());
        let err = source.find_active_schema(DomainTag::Item).await.unwrap_err();
        assert!(matches!(err, SchemaError::NotFound(DomainTag::Item)));
    }

    #[tokio::test]
    async fn bad_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySchemaSource::new(dir.path());
        std::fs::write(
            source.path_for(DomainTag::Npc),
            json!({"version": "v2", "schema": {}}).to_string(),
        )
        .unwrap();
        let err = source.find_active_schema(DomainTag::Npc).await.unwrap_err();
        assert!(matches!(err, SchemaError::InvalidVersion { .. }));
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySchemaSource::new(dir.path());
        std::fs::write(source.path_for(DomainTag::Npc), "{ not json").unwrap();
        let err = source.find_active_schema(DomainTag::Npc).await.unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }
}
