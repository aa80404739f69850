// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `voxbrief serve` command.

use std::sync::Arc;

use tracing::{info, warn};
use voxbrief_agent::{DispatchLoop, JobRunner, TranscriptCache, install_signal_handler};
use voxbrief_config::VoxbriefConfig;
use voxbrief_core::{HealthStatus, PluginAdapter, VoxbriefError};
use voxbrief_gemini::GeminiBackend;
use voxbrief_media::FfmpegTranscoder;
use voxbrief_telegram::TelegramTransport;

/// Wires the adapters, then polls Telegram until SIGINT or SIGTERM.
pub async fn run_serve(config: VoxbriefConfig) -> Result<(), VoxbriefError> {
    init_tracing(&config.agent.log_level);
    voxbrief_resilience::recording::register_metrics();
    voxbrief_agent::recording::register_metrics();

    info!(
        primary_model = config.gemini.primary_model.as_str(),
        fallback_model = config.gemini.fallback_model.as_str(),
        max_concurrent_jobs = config.dispatch.max_concurrent_jobs,
        "starting voxbrief serve"
    );

    let transport = Arc::new(TelegramTransport::new(&config.telegram)?);
    let backend = Arc::new(GeminiBackend::new(&config.gemini)?);
    let transcoder = Arc::new(FfmpegTranscoder::new(&config.transcoder));

    report_health(transport.as_ref()).await;
    report_health(backend.as_ref()).await;
    report_health(transcoder.as_ref()).await;

    let cache = Arc::new(TranscriptCache::new(config.cache.max_entries));
    let runner = Arc::new(JobRunner::new(
        &config,
        transport.clone(),
        backend.clone(),
        transcoder.clone(),
        cache,
    )?);

    let cancel = install_signal_handler();
    let cursor = DispatchLoop::new(transport.clone(), runner, &config.dispatch)
        .run(cancel)
        .await;

    let adapters: [&dyn PluginAdapter; 3] =
        [transport.as_ref(), backend.as_ref(), transcoder.as_ref()];
    for adapter in adapters {
        if let Err(e) = adapter.shutdown().await {
            warn!(adapter = adapter.name(), error = %e, "adapter shutdown failed");
        }
    }
    info!(cursor, "voxbrief stopped");
    Ok(())
}

/// Logs adapter health. Problems are reported but never stop startup.
async fn report_health(adapter: &dyn PluginAdapter) {
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => {
            info!(adapter = adapter.name(), "adapter healthy");
        }
        Ok(HealthStatus::Degraded(reason)) => {
            warn!(adapter = adapter.name(), reason = reason.as_str(), "adapter degraded");
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            warn!(adapter = adapter.name(), reason = reason.as_str(), "adapter unhealthy");
        }
        Err(e) => {
            warn!(adapter = adapter.name(), error = %e, "adapter health check failed");
        }
    }
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("voxbrief={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
