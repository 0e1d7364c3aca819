use figment::Jail;
use grim_config::GrimConfig;
use grim_core::DomainTag;
use pretty_assertions::assert_eq;

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".grimoire")?;
        jail.create_file(".grimoire/config.toml", "[render]\nheading_level = 2\n")?;
        jail.set_env("GRIMOIRE_RENDER__HEADING_LEVEL", "4");
        jail.set_env("GRIMOIRE_RENDER__INCLUDE_STAT_BLOCK", "false");

        let config = GrimConfig::load().expect("config loads");
        assert_eq!(config.render.heading_level, 4);
        assert!(!config.render.include_stat_block);
        Ok(())
    });
}

#[test]
fn env_sets_default_domain() {
    Jail::expect_with(|jail| {
        jail.set_env("GRIMOIRE_GENERAL__DEFAULT_DOMAIN", "arc");

        let config = GrimConfig::load().expect("config loads");
        assert_eq!(config.general.domain_override().unwrap(), Some(DomainTag::StoryArc));
        Ok(())
    });
}

#[test]
fn env_unknown_domain_fails_load() {
    Jail::expect_with(|jail| {
        jail.set_env("GRIMOIRE_GENERAL__DEFAULT_DOMAIN", "starship");
        assert!(GrimConfig::load().is_err());
        Ok(())
    });
}
