// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: retry budgets of at least one
//! attempt, non-zero limits, prompt templates that carry a placeholder.

use crate::diagnostic::ConfigError;
use crate::model::{VoxbriefConfig, has_placeholder};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Telegram refuses messages longer than this.
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &VoxbriefConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        fail(format!(
            "agent.log_level `{}` is not one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let telegram = &config.telegram;
    if telegram.max_message_length == 0 || telegram.max_message_length > TELEGRAM_MESSAGE_LIMIT {
        fail(format!(
            "telegram.max_message_length must be between 1 and {TELEGRAM_MESSAGE_LIMIT}, got {}",
            telegram.max_message_length
        ));
    }
    if telegram.max_file_size_mb == 0 {
        fail("telegram.max_file_size_mb must be at least 1".to_string());
    }
    if telegram.send_timeout_secs == 0 {
        fail("telegram.send_timeout_secs must be at least 1".to_string());
    }

    let gemini = &config.gemini;
    if gemini.primary_model.trim().is_empty() {
        fail("gemini.primary_model must not be empty".to_string());
    }
    if gemini.fallback_model.trim().is_empty() {
        fail("gemini.fallback_model must not be empty".to_string());
    }
    if gemini.primary_attempts < 1 {
        fail(format!(
            "gemini.primary_attempts must be at least 1, got {}",
            gemini.primary_attempts
        ));
    }
    if gemini.fallback_attempts < 1 {
        fail(format!(
            "gemini.fallback_attempts must be at least 1, got {}",
            gemini.fallback_attempts
        ));
    }
    if gemini.request_timeout_secs == 0 {
        fail("gemini.request_timeout_secs must be at least 1".to_string());
    }
    if !(gemini.base_url.starts_with("http://") || gemini.base_url.starts_with("https://")) {
        fail(format!(
            "gemini.base_url `{}` must start with http:// or https://",
            gemini.base_url
        ));
    }

    for (key, template) in [
        ("prompts.user_template", &config.prompts.user_template),
        ("prompts.short_template", &config.prompts.short_template),
    ] {
        if !has_placeholder(template) {
            fail(format!("{key} must contain a `{{text}}` placeholder"));
        }
    }

    if config.transcoder.ffmpeg_path.trim().is_empty() {
        fail("transcoder.ffmpeg_path must not be empty".to_string());
    }
    if config.transcoder.timeout_secs == 0 {
        fail("transcoder.timeout_secs must be at least 1".to_string());
    }

    if config.dispatch.max_concurrent_jobs == 0 {
        fail("dispatch.max_concurrent_jobs must be at least 1".to_string());
    }

    if config.cache.max_entries == Some(0) {
        fail("cache.max_entries must be at least 1 when set".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that the credentials `serve` needs are present.
pub fn validate_credentials(config: &VoxbriefConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    if config
        .telegram
        .bot_token
        .as_deref()
        .is_none_or(|t| t.trim().is_empty())
    {
        errors.push(ConfigError::MissingKey {
            key: "telegram.bot_token".to_string(),
        });
    }
    if config
        .gemini
        .api_key
        .as_deref()
        .is_none_or(|k| k.trim().is_empty())
    {
        errors.push(ConfigError::MissingKey {
            key: "gemini.api_key".to_string(),
        });
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
