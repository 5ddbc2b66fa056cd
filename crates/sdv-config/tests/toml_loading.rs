//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use sdv_config::SdvConfig;

#[test]
fn loads_portal_and_trial_site_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[portal]
base_url = "https://portal.example.test"
timeout_secs = 30

[trial_site]
base_url = "http://site.example.test:5500"
poll_interval_secs = 2
response_max_attempts = 10
"#,
        )?;

        let config: SdvConfig = Figment::from(Serialized::defaults(SdvConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.portal.base_url, "https://portal.example.test");
        assert_eq!(config.portal.timeout_secs, 30);
        assert_eq!(config.trial_site.base_url, "http://site.example.test:5500");
        assert_eq!(config.trial_site.poll_interval_secs, 2);
        assert_eq!(config.trial_site.response_max_attempts, 10);
        // untouched keys keep their defaults
        assert_eq!(config.trial_site.response_poll_interval_secs, 1);
        Ok(())
    });
}

#[test]
fn loads_sso_and_session_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[sso]
round_trip_ms = 250

[session]
dir = "/var/tmp/sdv"
"#,
        )?;

        let config: SdvConfig = Figment::from(Serialized::defaults(SdvConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.sso.round_trip(), std::time::Duration::from_millis(250));
        assert_eq!(config.session.dir, "/var/tmp/sdv");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[portal]
base_url = "http://from-toml:5001"
"#,
        )?;
        jail.set_env("SDV_PORTAL__BASE_URL", "http://from-env:5001");

        let config: SdvConfig = Figment::from(Serialized::defaults(SdvConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("SDV_").split("__"))
            .extract()?;

        assert_eq!(config.portal.base_url, "http://from-env:5001");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sdv")?;
        jail.create_file(
            ".sdv/config.toml",
            r#"
[trial_site]
poll_interval_secs = 9
"#,
        )?;

        let config = SdvConfig::load().expect("config loads");
        assert_eq!(config.trial_site.poll_interval_secs, 9);
        Ok(())
    });
}

#[test]
fn load_rejects_invalid_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sdv")?;
        jail.create_file(
            ".sdv/config.toml",
            r#"
[portal]
base_url = "ftp://nope"
"#,
        )?;

        let err = SdvConfig::load().unwrap_err();
        assert!(err.to_string().contains("portal.base_url"));
        Ok(())
    });
}
