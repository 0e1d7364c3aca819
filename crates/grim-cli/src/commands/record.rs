use grim_config::GrimConfig;
use grim_ingest::{map_fields, normalize, to_storage_shape};
use grim_render::render_with;

use crate::bootstrap::render_options;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::{NormalizeArgs, TargetArgs};
use crate::commands::resolve_domain;
use crate::input::read_payload;
use crate::output::output;

/// Handle `grim map`.
pub fn handle_map(args: &TargetArgs, config: &GrimConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = read_payload(&args.input)?;
    let domain = resolve_domain(args.domain, config, &raw)?;
    output(&map_fields(domain, &raw), flags.format)
}

/// Handle `grim normalize`.
pub fn handle_normalize(args: &NormalizeArgs, config: &GrimConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = read_payload(&args.target.input)?;
    let domain = resolve_domain(args.target.domain, config, &raw)?;
    let record = normalize(domain, &raw);
    if args.storage {
        return output(&to_storage_shape(&record, &raw)?, flags.format);
    }
    output(&record, flags.format)
}

/// Handle `grim render`. Prints markdown, not JSON.
pub fn handle_render(args: &TargetArgs, config: &GrimConfig) -> anyhow::Result<()> {
    let raw = read_payload(&args.input)?;
    let domain = resolve_domain(args.domain, config, &raw)?;
    let record = normalize(domain, &raw);
    print!("{}", render_with(&record, &render_options(config)));
    Ok(())
}
