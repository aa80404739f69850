// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-update job pipeline.
//!
//! A media job runs: size check, document extension check, status reply,
//! download and staging, transcoding, transcription, transcript reply,
//! summarization, summary reply. Every failure becomes a message to the
//! user and ends that job only.

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use voxbrief_config::model::{PromptsConfig, VoxbriefConfig};
use voxbrief_core::{
    GenerationBackend, GenerationRequest, MediaRef, Transcoder, Transport, Update, VoxbriefError,
};
use voxbrief_media::StagedMedia;
use voxbrief_resilience::{GenerationOrchestrator, RetryPolicy};
use voxbrief_telegram::{escape_html, render_markup};

use crate::cache::TranscriptCache;
use crate::job::{InboundJob, JobKind, passes_extension_check};
use crate::messages;
use crate::recording;
use crate::reply::Replier;

/// Executes jobs. Cheap to share behind an `Arc`; holds no per-job state.
pub struct JobRunner {
    transport: Arc<dyn Transport>,
    transcoder: Arc<dyn Transcoder>,
    orchestrator: GenerationOrchestrator,
    policy: RetryPolicy,
    cache: Arc<TranscriptCache>,
    replier: Replier,
    prompts: PromptsConfig,
    primary_model: String,
    fallback_model: String,
    max_file_size_bytes: u64,
    max_file_size_mb: u64,
    staging_dir: Option<PathBuf>,
}

impl JobRunner {
    /// Wires a runner from validated configuration and adapters.
    pub fn new(
        config: &VoxbriefConfig,
        transport: Arc<dyn Transport>,
        backend: Arc<dyn GenerationBackend>,
        transcoder: Arc<dyn Transcoder>,
        cache: Arc<TranscriptCache>,
    ) -> Result<Self, VoxbriefError> {
        let gemini = &config.gemini;
        let policy = RetryPolicy::from_parts(
            &gemini.primary_model,
            gemini.primary_attempts,
            &gemini.fallback_model,
            gemini.fallback_attempts,
            gemini.retry_delay(),
        )?;

        Ok(Self {
            replier: Replier::new(
                transport.clone(),
                config.telegram.max_message_length,
                config.telegram.send_timeout(),
            ),
            transport,
            transcoder,
            orchestrator: GenerationOrchestrator::new(backend, gemini.request_timeout()),
            policy,
            cache,
            prompts: config.prompts.clone(),
            primary_model: gemini.primary_model.clone(),
            fallback_model: gemini.fallback_model.clone(),
            max_file_size_bytes: config.telegram.max_file_size_bytes(),
            max_file_size_mb: config.telegram.max_file_size_mb,
            staging_dir: config.transcoder.staging_dir.as_ref().map(PathBuf::from),
        })
    }

    pub fn cache(&self) -> &Arc<TranscriptCache> {
        &self.cache
    }

    /// Runs the job for one update to completion.
    pub async fn handle_update(&self, update: Update, cancel: &CancellationToken) {
        let Some(message) = update.message else {
            debug!(update_id = update.id, "update without a message, ignoring");
            return;
        };
        let job = InboundJob::from_message(&message);
        recording::record_job(job.kind.label());
        debug!(
            update_id = update.id,
            message_id = job.message_id,
            chat_id = job.chat_id,
            sender_id = message.sender_id,
            kind = job.kind.label(),
            "running job"
        );
        self.run(job, cancel).await;
    }

    async fn run(&self, job: InboundJob, cancel: &CancellationToken) {
        match &job.kind {
            JobKind::Shorter { target } => self.shorten(&job, *target, cancel).await,
            JobKind::Start => {
                let text = messages::welcome(
                    &self.primary_model,
                    &self.fallback_model,
                    self.max_file_size_mb,
                );
                self.reply_plain(&job, &text).await;
            }
            JobKind::Unsupported => {
                self.reply_plain(&job, &messages::unsupported(self.max_file_size_mb))
                    .await;
            }
            JobKind::Media(media) => self.process_media(&job, media, cancel).await,
            JobKind::Ignore => {}
        }
    }

    async fn process_media(&self, job: &InboundJob, media: &MediaRef, cancel: &CancellationToken) {
        if media.file_size > self.max_file_size_bytes {
            info!(
                message_id = job.message_id,
                size = media.file_size,
                limit = self.max_file_size_bytes,
                "media exceeds size limit"
            );
            self.reply_plain(job, &messages::file_too_large(self.max_file_size_mb))
                .await;
            return;
        }
        if !passes_extension_check(media) {
            info!(
                message_id = job.message_id,
                file_name = media.file_name.as_deref().unwrap_or_default(),
                "document extension not supported"
            );
            self.reply_plain(job, messages::UNSUPPORTED_DOCUMENT).await;
            return;
        }

        self.reply_plain(job, messages::PROCESSING).await;

        let audio = match self.prepare_audio(media).await {
            Ok(audio) => audio,
            Err(e) => {
                error!(message_id = job.message_id, kind = %media.kind, error = %e, "media processing failed");
                self.reply_plain(job, &messages::media_failed(&e)).await;
                return;
            }
        };

        let request = GenerationRequest::transcription(self.prompts.transcription.as_str(), audio);
        let transcript = match self.orchestrator.generate(&request, &self.policy, cancel).await {
            Ok(text) => text,
            Err(e) if is_empty_exhaustion(&e) => {
                info!(message_id = job.message_id, "no speech recognized");
                self.reply_plain(job, messages::NO_SPEECH).await;
                return;
            }
            Err(VoxbriefError::Cancelled) => {
                warn!(message_id = job.message_id, "transcription cancelled by shutdown");
                return;
            }
            Err(e) => {
                error!(message_id = job.message_id, error = %e, "transcription failed");
                self.reply_plain(job, &messages::transcription_failed(&e)).await;
                return;
            }
        };
        if transcript.trim().is_empty() {
            self.reply_plain(job, messages::NO_SPEECH).await;
            return;
        }

        self.cache.put(job.message_id, transcript.as_str());
        self.replier
            .send_formatted(
                job.chat_id,
                job.reply_to,
                &escape_html(&transcript),
                messages::TITLE_TRANSCRIPTION,
                false,
            )
            .await;

        let request = self.summary_request(&self.prompts.user_prompt(&transcript));
        match self.orchestrator.generate(&request, &self.policy, cancel).await {
            Ok(summary) => {
                self.replier
                    .send_formatted(
                        job.chat_id,
                        job.reply_to,
                        &render_markup(&summary),
                        messages::TITLE_SUMMARY,
                        true,
                    )
                    .await;
                info!(message_id = job.message_id, "media job finished");
            }
            Err(VoxbriefError::Cancelled) => {
                warn!(message_id = job.message_id, "summarization cancelled by shutdown");
            }
            Err(e) => {
                error!(message_id = job.message_id, error = %e, "summarization failed");
                self.reply_plain(job, &messages::summary_failed(&e)).await;
            }
        }
    }

    async fn shorten(&self, job: &InboundJob, target: i64, cancel: &CancellationToken) {
        let Some(transcript) = self.cache.get(target) else {
            debug!(message_id = job.message_id, target, "no cached transcript for shorter request");
            return;
        };

        self.reply_plain(job, messages::SHORTER_PROGRESS).await;
        let request = self.summary_request(&self.prompts.short_prompt(&transcript));
        match self.orchestrator.generate(&request, &self.policy, cancel).await {
            Ok(summary) => {
                self.replier
                    .send_formatted(
                        job.chat_id,
                        job.reply_to,
                        &render_markup(&summary),
                        messages::TITLE_SHORT_SUMMARY,
                        false,
                    )
                    .await;
            }
            Err(VoxbriefError::Cancelled) => {
                warn!(message_id = job.message_id, "short summary cancelled by shutdown");
            }
            Err(e) => {
                error!(message_id = job.message_id, target, error = %e, "short summary failed");
                self.reply_plain(job, &messages::short_summary_failed(&e)).await;
            }
        }
    }

    /// Downloads, stages and converts `media`. The staging directory is
    /// removed before this returns.
    async fn prepare_audio(&self, media: &MediaRef) -> Result<Vec<u8>, VoxbriefError> {
        let staged = StagedMedia::create(self.staging_dir.as_deref(), media)?;
        let file = self.transport.resolve_file(&media.file_id).await?;
        let bytes = self.transport.download_file(&file).await?;
        debug!(file_id = %media.file_id, size = bytes.len(), "media downloaded");

        staged.write_input(&bytes).await?;
        self.transcoder
            .transcode(
                staged.input_path(),
                staged.output_path(),
                media.kind.source_kind(),
            )
            .await?;
        staged.read_output().await
    }

    fn summary_request(&self, prompt: &str) -> GenerationRequest {
        GenerationRequest::summarization(
            self.prompts.system.as_str(),
            self.prompts.acknowledgement.as_str(),
            prompt,
        )
    }

    async fn reply_plain(&self, job: &InboundJob, text: &str) {
        self.replier.send_plain(job.chat_id, job.reply_to, text).await;
    }
}

/// True when every attempt returned no text, i.e. nothing was recognized.
fn is_empty_exhaustion(err: &VoxbriefError) -> bool {
    matches!(
        err,
        VoxbriefError::GenerationExhausted { source } if matches!(**source, VoxbriefError::EmptyResponse)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_exhaustion_is_detected() {
        let empty = VoxbriefError::GenerationExhausted {
            source: Box::new(VoxbriefError::EmptyResponse),
        };
        assert!(is_empty_exhaustion(&empty));

        let other = VoxbriefError::GenerationExhausted {
            source: Box::new(VoxbriefError::Internal("x".into())),
        };
        assert!(!is_empty_exhaustion(&other));
        assert!(!is_empty_exhaustion(&VoxbriefError::EmptyResponse));
    }
}
