use std::path::Path;

use anyhow::Context;
use grim_config::GrimConfig;
use grim_core::DomainTag;
use grim_schema::{DirectorySchemaSource, SchemaError, SchemaRegistry, SchemaSource};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaCommands;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemaSummary {
    domain: DomainTag,
    version: String,
}

/// Handle `grim schema`.
pub async fn handle(action: &SchemaCommands, config: &GrimConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SchemaCommands::List(args) => {
            let dir = args.schema_dir.clone().or_else(|| config.schema.directory());
            let summaries = match dir {
                Some(dir) => list_directory(&dir).await?,
                None => list_builtin(),
            };
            output(&summaries, flags.format)
        }
        SchemaCommands::Export(args) => {
            let dir = args.schema_dir.clone().or_else(|| config.schema.directory());
            let active = match dir {
                Some(dir) => DirectorySchemaSource::new(dir).find_active_schema(args.domain).await,
                None => SchemaRegistry::new().find_active_schema(args.domain).await,
            }
            .with_context(|| format!("no schema to export for {}", args.domain))?;
            output(&active.schema, flags.format)
        }
    }
}

fn list_builtin() -> Vec<SchemaSummary> {
    let registry = SchemaRegistry::new();
    registry
        .domains()
        .into_iter()
        .filter_map(|domain| {
            registry.active(domain).map(|active| SchemaSummary {
                domain,
                version: active.version.to_string(),
            })
        })
        .collect()
}

async fn list_directory(dir: &Path) -> anyhow::Result<Vec<SchemaSummary>> {
    let source = DirectorySchemaSource::new(dir);
    let mut summaries = Vec::new();
    for domain in DomainTag::ALL {
        match source.find_active_schema(domain).await {
            Ok(active) => summaries.push(SchemaSummary {
                domain,
                version: active.version.to_string(),
            }),
            Err(SchemaError::NotFound(_)) => {}
            Err(error) => return Err(error).with_context(|| format!("failed to read {domain} schema")),
        }
    }
    Ok(summaries)
}
