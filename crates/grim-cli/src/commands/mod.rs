pub mod block;
pub mod classify;
pub mod record;
pub mod schema;
pub mod validate;

use grim_config::GrimConfig;
use grim_core::DomainTag;
use serde_json::Value;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, config: &GrimConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Classify(args) => classify::handle(&args, flags),
        Commands::Map(args) => record::handle_map(&args, config, flags),
        Commands::Normalize(args) => record::handle_normalize(&args, config, flags),
        Commands::Render(args) => record::handle_render(&args, config),
        Commands::Validate(args) => validate::handle(&args, config, flags).await,
        Commands::Block(args) => block::handle(&args, config, flags).await,
        Commands::Schema { action } => schema::handle(&action, config, flags).await,
    }
}

/// `--domain`, else `general.default_domain`, else classification.
pub fn resolve_domain(explicit: Option<DomainTag>, config: &GrimConfig, raw: &Value) -> anyhow::Result<DomainTag> {
    if let Some(domain) = explicit {
        return Ok(domain);
    }
    if let Some(domain) = config.general.domain_override()? {
        return Ok(domain);
    }
    let classification = grim_ingest::classify_traced(raw, None, None);
    tracing::debug!(domain = %classification.tag, rule = classification.rule, "classified payload");
    Ok(classification.tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explicit_domain_beats_config_and_classifier() {
        let mut config = GrimConfig::default();
        config.general.default_domain = "item".into();
        let raw = json!({"challenge_rating": "3"});
        assert_eq!(resolve_domain(Some(DomainTag::Location), &config, &raw).unwrap(), DomainTag::Location);
        assert_eq!(resolve_domain(None, &config, &raw).unwrap(), DomainTag::Item);
        assert_eq!(
            resolve_domain(None, &GrimConfig::default(), &json!({"deliverable": "monster"})).unwrap(),
            DomainTag::Monster
        );
    }
}
