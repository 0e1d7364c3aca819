use grim_ingest::classify_traced;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::input::read_payload;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    domain: grim_core::DomainTag,
    label: &'static str,
    rule: &'static str,
}

/// Handle `grim classify`.
pub fn handle(args: &ClassifyArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = read_payload(&args.input)?;
    let classification = classify_traced(&raw, args.content_type.as_deref(), args.deliverable.as_deref());
    output(
        &ClassifyResponse {
            domain: classification.tag,
            label: classification.tag.label(),
            rule: classification.rule,
        },
        flags.format,
    )
}
