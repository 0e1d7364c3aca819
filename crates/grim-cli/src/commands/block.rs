use anyhow::bail;
use grim_config::GrimConfig;
use grim_pipeline::{GeneratedContent, map_generated_content_with};

use crate::bootstrap::render_options;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::BlockArgs;
use crate::commands::validate;
use crate::input::read_payload;
use crate::output::output;

/// Handle `grim block`. With `schema.validate_on_ingest`, the payload must
/// pass validation before a block is printed.
pub async fn handle(args: &BlockArgs, config: &GrimConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let input = GeneratedContent {
        content_type: args.content_type.clone(),
        deliverable: args.deliverable.clone(),
        title: args.title.clone(),
        generated_content: read_payload(&args.input)?,
        resolved_proposals: None,
        resolved_conflicts: None,
    };
    let block = map_generated_content_with(&input, &render_options(config));

    if config.schema.validate_on_ingest {
        let domain = block.metadata.structured_content.domain();
        let outcome = validate::run(domain, &input.generated_content, config.schema.directory()).await?;
        if !outcome.success {
            output(&outcome, flags.format)?;
            bail!("generated {domain} content failed validation: {}", outcome.errors.join("; "));
        }
    }
    output(&block, flags.format)
}
