//! In-memory versioned schema registry.
//!
//! The registry is seeded with one schema per domain, generated from the
//! grim-core record types with [`schemars::schema_for!`]. New versions are
//! published per domain; the most recent publication is the active one.

use chrono::Utc;
use dashmap::DashMap;
use grim_core::DomainTag;
use grim_core::entities::{
    EncounterRecord, GenericRecord, ItemRecord, LocationRecord, MonsterRecord, NpcRecord,
    StoryArcRecord, WritingRecord,
};
use schemars::schema_for;
use serde_json::Value;

use crate::error::SchemaError;
use crate::source::{ActiveSchema, SchemaSource, parse_version};

/// Version assigned to the schemas generated from the record types.
pub const BUILTIN_VERSION: semver::Version = semver::Version::new(1, 0, 0);

macro_rules! register {
    ($map:expr, $domain:expr, $ty:ty) => {
        $map.push(($domain, Value::from(schema_for!($ty))));
    };
}

/// The generated schema of every domain record, in [`DomainTag::ALL`] order.
#[must_use]
pub fn builtin_schemas() -> Vec<(DomainTag, Value)> {
    let mut schemas = Vec::with_capacity(DomainTag::ALL.len());
    register!(schemas, DomainTag::Npc, NpcRecord);
    register!(schemas, DomainTag::Monster, MonsterRecord);
    register!(schemas, DomainTag::Item, ItemRecord);
    register!(schemas, DomainTag::Location, LocationRecord);
    register!(schemas, DomainTag::StoryArc, StoryArcRecord);
    register!(schemas, DomainTag::Encounter, EncounterRecord);
    register!(schemas, DomainTag::Writing, WritingRecord);
    register!(schemas, DomainTag::Generic, GenericRecord);
    schemas
}

/// Published schema history per domain. The last entry is active.
pub struct SchemaRegistry {
    history: DashMap<DomainTag, Vec<ActiveSchema>>,
}

impl SchemaRegistry {
    /// A registry with no schemas.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            history: DashMap::new(),
        }
    }

    /// A registry seeded with [`builtin_schemas`] at [`BUILTIN_VERSION`].
    #[must_use]
    pub fn new() -> Self {
        let registry = Self::empty();
        for (domain, schema) in builtin_schemas() {
            registry.history.insert(
                domain,
                vec![ActiveSchema {
                    version: BUILTIN_VERSION,
                    schema,
                    published_at: None,
                }],
            );
        }
        registry
    }

    /// Publish `schema` as the new active version for `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidVersion`] if `version` is not semver, or
    /// [`SchemaError::StaleVersion`] if it is not greater than the active
    /// version.
    pub fn publish(&self, domain: DomainTag, version: &str, schema: Value) -> Result<ActiveSchema, SchemaError> {
        let version = parse_version(version)?;
        let mut entries = self.history.entry(domain).or_default();
        if let Some(active) = entries.last() {
            if version <= active.version {
                return Err(SchemaError::StaleVersion {
                    domain,
                    version,
                    active: active.version.clone(),
                });
            }
        }
        let published = ActiveSchema {
            version,
            schema,
            published_at: Some(Utc::now()),
        };
        entries.push(published.clone());
        tracing::info!(%domain, version = %published.version, "published schema");
        Ok(published)
    }

    /// The active schema for `domain`, if any.
    #[must_use]
    pub fn active(&self, domain: DomainTag) -> Option<ActiveSchema> {
        self.history.get(&domain).and_then(|entries| entries.last().cloned())
    }

    /// Every published version for `domain`, oldest first.
    #[must_use]
    pub fn versions(&self, domain: DomainTag) -> Vec<semver::Version> {
        self.history
            .get(&domain)
            .map(|entries| entries.iter().map(|e| e.version.clone()).collect())
            .unwrap_or_default()
    }

    /// Domains with at least one schema, sorted.
    #[must_use]
    pub fn domains(&self) -> Vec<DomainTag> {
        let mut domains: Vec<DomainTag> = self.history.iter().map(|entry| *entry.key()).collect();
        domains.sort_unstable();
        domains
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaSource for SchemaRegistry {
    async fn find_active_schema(&self, domain: DomainTag) -> Result<ActiveSchema, SchemaError> {
        self.active(domain).ok_or(SchemaError::NotFound(domain))
    }
}
