// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transcoder that records conversions instead of running ffmpeg.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use voxbrief_core::{
    AdapterType, HealthStatus, PluginAdapter, SourceKind, Transcoder, VoxbriefError,
};

/// Bytes written to every successful output file.
pub const FAKE_MP3: &[u8] = b"ID3fake-mp3";

/// One recorded conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeCall {
    pub input: PathBuf,
    /// Input file content at the time of the call.
    pub input_bytes: Vec<u8>,
    pub kind: SourceKind,
}

pub struct MockTranscoder {
    calls: Mutex<Vec<TranscodeCall>>,
    failure: Option<String>,
}

impl MockTranscoder {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// A transcoder whose every call fails with `stderr` as the ffmpeg output.
    pub fn failing(stderr: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(stderr.into()),
        }
    }

    pub async fn calls(&self) -> Vec<TranscodeCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

impl Default for MockTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTranscoder {
    fn name(&self) -> &str {
        "mock-transcoder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transcoder
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxbriefError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VoxbriefError> {
        Ok(())
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        kind: SourceKind,
    ) -> Result<(), VoxbriefError> {
        let input_bytes = tokio::fs::read(input).await.unwrap_or_default();
        self.calls.lock().await.push(TranscodeCall {
            input: input.to_path_buf(),
            input_bytes,
            kind,
        });

        if let Some(stderr) = &self.failure {
            return Err(VoxbriefError::Transcode {
                message: format!("ffmpeg exited with exit status: 1: {stderr}"),
                source: None,
            });
        }
        tokio::fs::write(output, FAKE_MP3)
            .await
            .map_err(|e| VoxbriefError::Media(format!("mock transcoder write failed: {e}")))
    }
}
