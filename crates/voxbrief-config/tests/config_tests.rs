// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the voxbrief configuration system.

use figment::Jail;
use serial_test::serial;
use voxbrief_config::diagnostic::ConfigError;
use voxbrief_config::model::VoxbriefConfig;
use voxbrief_config::{
    load_and_validate_path, load_and_validate_str, load_config, load_config_from_path,
    load_config_from_str,
};

#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[agent]
log_level = "debug"

[telegram]
bot_token = "123:ABC"
max_message_length = 2000
max_file_size_mb = 10

[gemini]
api_key = "AIza-test"
primary_model = "gemini-pro"
fallback_model = "gemini-lite"
primary_attempts = 2
fallback_attempts = 4
retry_delay_ms = 10

[transcoder]
ffmpeg_path = "/usr/local/bin/ffmpeg"
timeout_secs = 60

[dispatch]
max_concurrent_jobs = 4

[cache]
max_entries = 500
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.telegram.max_message_length, 2000);
    assert_eq!(config.telegram.max_file_size_bytes(), 10 * 1024 * 1024);
    assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-test"));
    assert_eq!(config.gemini.primary_model, "gemini-pro");
    assert_eq!(config.gemini.fallback_attempts, 4);
    assert_eq!(config.gemini.retry_delay().as_millis(), 10);
    assert_eq!(config.transcoder.ffmpeg_path, "/usr/local/bin/ffmpeg");
    assert_eq!(config.dispatch.max_concurrent_jobs, 4);
    assert_eq!(config.cache.max_entries, Some(500));
}

#[test]
fn empty_toml_yields_documented_defaults() {
    let config = load_config_from_str("").expect("empty config is valid");
    assert_eq!(config.gemini.primary_model, "gemini-2.5-flash");
    assert_eq!(config.gemini.fallback_model, "gemini-2.0-flash");
    assert_eq!(config.gemini.primary_attempts, 3);
    assert_eq!(config.gemini.fallback_attempts, 5);
    assert_eq!(config.gemini.retry_delay_ms, 3000);
    assert_eq!(config.telegram.max_message_length, 4096);
    assert_eq!(config.telegram.max_file_size_mb, 20);
    assert_eq!(config.transcoder.timeout_secs, 120);
    assert_eq!(config.dispatch.fetch_backoff_ms, 3000);
    assert_eq!(config.cache.max_entries, None);
}

#[test]
fn unknown_key_gets_suggestion() {
    let toml = r#"
[gemini]
primery_model = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "primery_model");
            assert_eq!(suggestion.as_deref(), Some("primary_model"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[anthropic]\napi_key = \"x\"\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::UnknownKey { key, .. } if key == "anthropic"));
}

#[test]
fn wrong_type_is_reported_with_path() {
    let errors = load_and_validate_str("[dispatch]\nmax_concurrent_jobs = \"many\"\n").unwrap_err();
    assert!(matches!(
        &errors[0],
        ConfigError::InvalidType { key, .. } if key.contains("max_concurrent_jobs")
    ));
}

#[test]
fn semantic_validation_runs_after_parse() {
    let errors = load_and_validate_str("[gemini]\nprimary_attempts = 0\n").unwrap_err();
    assert!(matches!(
        &errors[0],
        ConfigError::Validation { message } if message.contains("primary_attempts")
    ));
}

#[test]
fn config_round_trips_through_toml() {
    let original = VoxbriefConfig::default();
    let text = toml::to_string(&original).expect("serializes");
    let parsed = load_and_validate_str(&text).expect("round trip validates");
    assert_eq!(parsed.prompts.system, original.prompts.system);
    assert_eq!(parsed.prompts.user_template, original.prompts.user_template);
}

#[test]
#[serial]
fn prefixed_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "voxbrief.toml",
            "[gemini]\nprimary_model = \"from-file\"\nprimary_attempts = 2\n",
        )?;
        jail.set_env("VOXBRIEF_GEMINI_PRIMARY_MODEL", "from-env");
        jail.set_env("VOXBRIEF_DISPATCH_MAX_CONCURRENT_JOBS", "7");

        let config = load_config()?;
        assert_eq!(config.gemini.primary_model, "from-env");
        assert_eq!(config.gemini.primary_attempts, 2);
        assert_eq!(config.dispatch.max_concurrent_jobs, 7);
        Ok(())
    });
}

#[test]
#[serial]
fn legacy_env_vars_are_honored() {
    Jail::expect_with(|jail| {
        jail.set_env("BOT_TOKEN", "42:legacy");
        jail.set_env("GOOGLE_API_KEY", "legacy-key");
        jail.set_env("SHORT_PROMPT_TEMPLATE", "Коротко: %s");

        let config = load_config()?;
        assert_eq!(config.telegram.bot_token.as_deref(), Some("42:legacy"));
        assert_eq!(config.gemini.api_key.as_deref(), Some("legacy-key"));
        assert_eq!(config.prompts.short_prompt("текст"), "Коротко: текст");
        Ok(())
    });
}

#[test]
#[serial]
fn prefixed_env_wins_over_legacy_env() {
    Jail::expect_with(|jail| {
        jail.set_env("BOT_TOKEN", "1:stray");
        jail.set_env("VOXBRIEF_TELEGRAM_BOT_TOKEN", "2:explicit");
        jail.set_env("PRIMARY_MODEL", "legacy-model");

        let config = load_config()?;
        assert_eq!(config.telegram.bot_token.as_deref(), Some("2:explicit"));
        assert_eq!(config.gemini.primary_model, "legacy-model");

        let path = jail.directory().join("explicit.toml");
        std::fs::write(&path, "").expect("write config");
        let config = load_config_from_path(&path)?;
        assert_eq!(config.telegram.bot_token.as_deref(), Some("2:explicit"));
        Ok(())
    });
}

#[test]
#[serial]
fn explicit_path_is_loaded_and_validated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[cache]\nmax_entries = 0\n").expect("write config");

    let errors = load_and_validate_path(&path).unwrap_err();
    assert!(matches!(
        &errors[0],
        ConfigError::Validation { message } if message.contains("cache.max_entries")
    ));
}
