// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/voxbrief/voxbrief.toml`, then
//! `~/.config/voxbrief/voxbrief.toml`, then `./voxbrief.toml`, then the bare
//! variables the bot has always honored (`BOT_TOKEN`, `GOOGLE_API_KEY`, ...),
//! then `VOXBRIEF_*` environment variables. Later layers win.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tracing::debug;

use crate::model::VoxbriefConfig;

/// Top-level sections reachable through `VOXBRIEF_<SECTION>_<KEY>`.
const SECTIONS: &[&str] = &[
    "agent",
    "telegram",
    "gemini",
    "prompts",
    "transcoder",
    "dispatch",
    "cache",
];

pub const SYSTEM_CONFIG_PATH: &str = "/etc/voxbrief/voxbrief.toml";
pub const LOCAL_CONFIG_PATH: &str = "voxbrief.toml";

/// `~/.config/voxbrief/voxbrief.toml`, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("voxbrief/voxbrief.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<VoxbriefConfig, figment::Error> {
    build_figment().extract()
}

/// Defaults plus a TOML string only. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<VoxbriefConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VoxbriefConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VoxbriefConfig, figment::Error> {
    debug!(path = %path.display(), "loading configuration from explicit path");
    Figment::new()
        .merge(Serialized::defaults(VoxbriefConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// The full layered Figment, before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(VoxbriefConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        debug!(path = %user.display(), "user configuration layer");
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(legacy_env_provider())
        .merge(env_provider())
}

/// Maps `VOXBRIEF_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `VOXBRIEF_TELEGRAM_BOT_TOKEN` lands on `telegram.bot_token`.
fn env_provider() -> Env {
    Env::prefixed("VOXBRIEF_").map(|key| map_section_key(key.as_str()).into())
}

fn map_section_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

/// Unprefixed variables from the bot's env-only deployments.
fn legacy_env_provider() -> Env {
    Env::raw().filter_map(|key| legacy_key(key.as_str()).map(Into::into))
}

fn legacy_key(key: &str) -> Option<&'static str> {
    match key.to_ascii_uppercase().as_str() {
        "BOT_TOKEN" => Some("telegram.bot_token"),
        "GOOGLE_API_KEY" => Some("gemini.api_key"),
        "PRIMARY_MODEL" => Some("gemini.primary_model"),
        "FALLBACK_MODEL" => Some("gemini.fallback_model"),
        "SYSTEM_PROMPT" => Some("prompts.system"),
        "USER_PROMPT_TEMPLATE" => Some("prompts.user_template"),
        "SHORT_PROMPT_TEMPLATE" => Some("prompts.short_template"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_keys_split_on_first_underscore_only() {
        assert_eq!(map_section_key("TELEGRAM_BOT_TOKEN"), "telegram.bot_token");
        assert_eq!(
            map_section_key("dispatch_max_concurrent_jobs"),
            "dispatch.max_concurrent_jobs"
        );
        assert_eq!(map_section_key("cache_max_entries"), "cache.max_entries");
    }

    #[test]
    fn unknown_section_is_left_flat() {
        assert_eq!(map_section_key("bogus_key"), "bogus_key");
    }

    #[test]
    fn legacy_keys_map_to_sections() {
        assert_eq!(legacy_key("BOT_TOKEN"), Some("telegram.bot_token"));
        assert_eq!(legacy_key("google_api_key"), Some("gemini.api_key"));
        assert_eq!(legacy_key("HOME"), None);
    }
}
