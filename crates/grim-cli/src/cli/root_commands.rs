use std::path::PathBuf;

use clap::{Args, Subcommand};
use grim_core::DomainTag;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Infer the domain of a payload.
    Classify(ClassifyArgs),
    /// Rewrite field-name variants onto canonical names.
    Map(TargetArgs),
    /// Build the canonical record of a payload.
    Normalize(NormalizeArgs),
    /// Render a payload as markdown.
    Render(TargetArgs),
    /// Map, normalize, and validate a payload against its schema.
    Validate(ValidateArgs),
    /// Map generated content into a content block.
    Block(BlockArgs),
    /// Inspect the builtin schemas.
    Schema {
        #[command(subcommand)]
        action: SchemaCommands,
    },
}

/// A JSON payload file, `-` for stdin.
#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    #[arg(default_value = "-")]
    pub input: String,

    /// Explicit content type hint (e.g., "character")
    #[arg(long)]
    pub content_type: Option<String>,

    /// Deliverable hint (e.g., "monster")
    #[arg(long)]
    pub deliverable: Option<String>,
}

/// A payload plus an optional forced domain.
#[derive(Clone, Debug, Args)]
pub struct TargetArgs {
    #[arg(default_value = "-")]
    pub input: String,

    /// Skip classification and use this domain
    #[arg(short, long)]
    pub domain: Option<DomainTag>,
}

#[derive(Clone, Debug, Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the storage shape instead of the canonical record
    #[arg(long)]
    pub storage: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Read `<domain>.schema.json` files from this directory
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct BlockArgs {
    #[arg(default_value = "-")]
    pub input: String,

    /// Block title; empty falls back to the record name
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub deliverable: Option<String>,

    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum SchemaCommands {
    /// List domains and their active schema versions.
    List(SchemaListArgs),
    /// Print the active JSON Schema of one domain.
    Export(SchemaExportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaListArgs {
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaExportArgs {
    pub domain: DomainTag,

    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}
