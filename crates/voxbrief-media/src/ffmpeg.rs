// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`Transcoder`] backed by an `ffmpeg` subprocess.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};
use voxbrief_config::model::TranscoderConfig;
use voxbrief_core::{
    AdapterType, HealthStatus, PluginAdapter, SourceKind, Transcoder, VoxbriefError,
};

/// Converts media to MP3 by shelling out to ffmpeg.
///
/// The child is killed if the deadline passes or the job is dropped.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
    timeout: Duration,
}

impl FfmpegTranscoder {
    pub fn new(config: &TranscoderConfig) -> Self {
        Self::with_binary(&config.ffmpeg_path, config.timeout())
    }

    pub fn with_binary(ffmpeg_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builds the ffmpeg argument list for `kind`.
///
/// Audio is re-encoded to mono 22.05 kHz VBR quality 3. Video has its video
/// stream dropped and the audio track encoded at VBR quality 2.
pub fn ffmpeg_args(input: &Path, output: &Path, kind: SourceKind) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into()];
    let codec: &[&str] = match kind {
        SourceKind::Audio => &["-c:a", "libmp3lame", "-q:a", "3", "-ac", "1", "-ar", "22050"],
        SourceKind::Video => &["-vn", "-acodec", "libmp3lame", "-q:a", "2"],
    };
    args.extend(codec.iter().map(OsString::from));
    args.push(output.into());
    args
}

#[async_trait]
impl PluginAdapter for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transcoder
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxbriefError> {
        let probe = Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();
        match tokio::time::timeout(Duration::from_secs(10), probe).await {
            Ok(Ok(status)) if status.success() => Ok(HealthStatus::Healthy),
            Ok(Ok(status)) => Ok(HealthStatus::Unhealthy(format!(
                "{} -version exited with {status}",
                self.ffmpeg_path.display()
            ))),
            Ok(Err(e)) => Ok(HealthStatus::Unhealthy(format!(
                "cannot run {}: {e}",
                self.ffmpeg_path.display()
            ))),
            Err(_) => Ok(HealthStatus::Degraded(
                "ffmpeg -version did not finish in time".into(),
            )),
        }
    }

    async fn shutdown(&self) -> Result<(), VoxbriefError> {
        Ok(())
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        kind: SourceKind,
    ) -> Result<(), VoxbriefError> {
        let args = ffmpeg_args(input, output, kind);
        debug!(
            ffmpeg = %self.ffmpeg_path.display(),
            input = %input.display(),
            output = %output.display(),
            %kind,
            "running ffmpeg"
        );

        let child = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VoxbriefError::Transcode {
                message: format!("failed to start {}: {e}", self.ffmpeg_path.display()),
                source: Some(Box::new(e)),
            })?;

        let result = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout = ?self.timeout, input = %input.display(), "ffmpeg timed out");
                return Err(VoxbriefError::Timeout {
                    duration: self.timeout,
                });
            }
        };
        let out = result.map_err(|e| VoxbriefError::Transcode {
            message: format!("failed to wait for ffmpeg: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(VoxbriefError::Transcode {
                message: format!("ffmpeg exited with {}: {}", out.status, stderr.trim()),
                source: None,
            });
        }
        Ok(())
    }
}
