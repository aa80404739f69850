// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! voxbrief - transcribes and summarizes Telegram voice, video and audio.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use voxbrief_config::{ConfigError, VoxbriefConfig};

/// voxbrief - Telegram voice message transcription and summaries.
#[derive(Parser, Debug)]
#[command(name = "voxbrief", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the bot (default).
    Serve,
    /// Print the effective configuration with secrets redacted.
    Config,
}

fn load_config(path: Option<&Path>) -> Result<VoxbriefConfig, Vec<ConfigError>> {
    match path {
        Some(path) => voxbrief_config::load_and_validate_path(path),
        None => voxbrief_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config_path.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            voxbrief_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(errors) = voxbrief_config::validate_credentials(&config) {
                voxbrief_config::render_errors(&errors);
                return ExitCode::FAILURE;
            }
            match serve::run_serve(config).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("voxbrief: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Config => match toml::to_string_pretty(&config.redacted()) {
            Ok(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("voxbrief: failed to render configuration: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["voxbrief"]);
        assert!(cli.command.is_none());
        assert!(cli.config_path.is_none());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["voxbrief", "config", "--config", "/tmp/v.toml"]);
        assert!(matches!(cli.command, Some(Commands::Config)));
        assert_eq!(cli.config_path.as_deref(), Some(Path::new("/tmp/v.toml")));
    }

    #[test]
    fn redacted_config_renders_as_toml() {
        let mut config = VoxbriefConfig::default();
        config.gemini.api_key = Some("secret-key".into());
        let text = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!text.contains("secret-key"));
        assert!(text.contains("[gemini]"));
    }
}
