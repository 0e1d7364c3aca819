use anyhow::Context;
use grim_config::GrimConfig;
use grim_render::RenderOptions;

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GrimConfig> {
    match &flags.config {
        Some(path) => GrimConfig::load_from(path)
            .with_context(|| format!("failed to load config file {}", path.display())),
        None => GrimConfig::load_with_dotenv().context("failed to load configuration"),
    }
}

pub fn render_options(config: &GrimConfig) -> RenderOptions {
    RenderOptions {
        heading_level: config.render.heading_level,
        include_stat_block: config.render.include_stat_block,
    }
}
