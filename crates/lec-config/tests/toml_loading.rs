//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use lec_config::{AiTransport, LecternConfig};

#[test]
fn loads_ai_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[ai]
enabled = true
transport = "direct"
api_key = "sk-or-toml"
base_url = "https://example.test/v1"
model = "meta-llama/llama-3-8b-instruct"
timeout_secs = 12
app_name = "Staff Room"
referer = "https://school.example"
"#,
        )?;

        let config: LecternConfig = Figment::from(Serialized::defaults(LecternConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.ai.enabled);
        assert_eq!(config.ai.transport, AiTransport::Direct);
        assert_eq!(config.ai.api_key, "sk-or-toml");
        assert_eq!(config.ai.model, "meta-llama/llama-3-8b-instruct");
        assert_eq!(config.ai.timeout_secs, 12);
        assert_eq!(config.ai.app_name, "Staff Room");
        assert_eq!(config.ai.referer.as_deref(), Some("https://school.example"));
        assert_eq!(
            config.ai.completions_url(),
            "https://example.test/v1/chat/completions"
        );
        assert!(config.ai.is_configured());
        Ok(())
    });
}

#[test]
fn loads_proxy_transport_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[ai]
enabled = true
transport = "proxy"
proxy_url = "http://localhost:9000/relay"
"#,
        )?;

        let config: LecternConfig = Figment::from(Serialized::defaults(LecternConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.ai.transport, AiTransport::Proxy);
        assert_eq!(config.ai.proxy_url, "http://localhost:9000/relay");
        assert!(config.ai.api_key.is_empty());
        assert!(config.ai.is_configured());
        Ok(())
    });
}

#[test]
fn loads_relay_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[relay]
bind_addr = "0.0.0.0:9999"
path = "/relay"
upstream_url = "https://upstream.test/v1/chat/completions"
api_key = "sk-upstream"
model = "gpt-4o"
timeout_secs = 5
"#,
        )?;

        let config: LecternConfig = Figment::from(Serialized::defaults(LecternConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.relay.bind_addr, "0.0.0.0:9999");
        assert_eq!(config.relay.path, "/relay");
        assert_eq!(config.relay.model, "gpt-4o");
        assert_eq!(config.relay.timeout_secs, 5);
        assert!(config.relay.is_configured());
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_grade_level = 4
"#,
        )?;

        let config: LecternConfig = Figment::from(Serialized::defaults(LecternConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.default_grade_level, 4);
        assert_eq!(config.general.default_duration_minutes, 40);
        assert!(!config.ai.enabled);
        assert_eq!(config.ai.base_url, "https://openrouter.ai/api/v1");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[ai]
enabled = false
model = "from-toml"
"#,
        )?;
        jail.set_env("LECTERN_AI__ENABLED", "true");
        jail.set_env("LECTERN_AI__MODEL", "from-env");

        let config: LecternConfig = Figment::from(Serialized::defaults(LecternConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("LECTERN_").split("__"))
            .extract()?;

        assert!(config.ai.enabled);
        assert_eq!(config.ai.model, "from-env");
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lectern")?;
        jail.create_file(
            ".lectern/config.toml",
            r#"
[general]
default_question_count = 25
"#,
        )?;

        let config = LecternConfig::load().expect("config loads");
        assert_eq!(config.general.default_question_count, 25);
        Ok(())
    });
}

#[test]
fn invalid_value_in_toml_is_rejected_on_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lectern")?;
        jail.create_file(
            ".lectern/config.toml",
            r#"
[ai]
timeout_secs = 0
"#,
        )?;

        let err = LecternConfig::load().unwrap_err();
        assert!(err.to_string().contains("ai.timeout_secs"));
        Ok(())
    });
}
