use std::path::PathBuf;

use anyhow::bail;
use grim_config::GrimConfig;
use grim_core::{DomainTag, StructuredContent};
use grim_pipeline::{ValidationOutcome, map_and_validate};
use grim_schema::{DirectorySchemaSource, SchemaRegistry, ValidatorCache};
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::commands::resolve_domain;
use crate::input::read_payload;
use crate::output::output;

/// Handle `grim validate`. A failed validation prints the outcome and exits
/// non-zero.
pub async fn handle(args: &ValidateArgs, config: &GrimConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = read_payload(&args.target.input)?;
    let domain = resolve_domain(args.target.domain, config, &raw)?;
    let schema_dir = args.schema_dir.clone().or_else(|| config.schema.directory());
    let outcome = run(domain, &raw, schema_dir).await?;
    output(&outcome, flags.format)?;
    if !outcome.success {
        bail!("{domain} payload failed validation");
    }
    Ok(())
}

/// Validate against `<schema_dir>` files, or the builtin registry.
pub async fn run(
    domain: DomainTag,
    raw: &Value,
    schema_dir: Option<PathBuf>,
) -> anyhow::Result<ValidationOutcome<StructuredContent>> {
    let outcome = match schema_dir {
        Some(dir) => map_and_validate(&ValidatorCache::new(DirectorySchemaSource::new(dir)), domain, raw).await?,
        None => map_and_validate(&ValidatorCache::new(SchemaRegistry::new()), domain, raw).await?,
    };
    Ok(outcome)
}
