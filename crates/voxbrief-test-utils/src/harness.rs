// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end job tests.
//!
//! `TestHarness` wires a real `JobRunner` to mock transport, backend and
//! transcoder adapters, with a temporary staging directory. `deliver()`
//! runs one message through the full job pipeline.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use voxbrief_agent::{DispatchLoop, JobRunner, TranscriptCache};
use voxbrief_config::model::VoxbriefConfig;
use voxbrief_core::{IncomingMessage, Update, VoxbriefError};

use crate::mock_backend::MockBackend;
use crate::mock_transcoder::MockTranscoder;
use crate::mock_transport::MockTransport;

/// Builder for a [`TestHarness`].
pub struct TestHarnessBuilder {
    results: Vec<Result<String, VoxbriefError>>,
    backend_failure: Option<String>,
    transcoder_failure: Option<String>,
    first_call_delay: Option<Duration>,
    config: VoxbriefConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = VoxbriefConfig::default();
        // One attempt per tier and no delay keep call counts small and tests fast.
        config.gemini.primary_attempts = 1;
        config.gemini.fallback_attempts = 1;
        config.gemini.retry_delay_ms = 0;
        config.dispatch.fetch_backoff_ms = 10;
        config.dispatch.shutdown_grace_secs = 5;
        Self {
            results: Vec::new(),
            backend_failure: None,
            transcoder_failure: None,
            first_call_delay: None,
            config,
        }
    }

    /// Scripted backend results, consumed in call order.
    pub fn with_results(mut self, results: Vec<Result<String, VoxbriefError>>) -> Self {
        self.results = results;
        self
    }

    /// Scripted successful backend texts, consumed in call order.
    pub fn with_responses(mut self, responses: &[&str]) -> Self {
        self.results = responses.iter().map(|r| Ok(r.to_string())).collect();
        self
    }

    /// Once the script is spent, every backend call fails with `message`.
    pub fn with_backend_failure(mut self, message: impl Into<String>) -> Self {
        self.backend_failure = Some(message.into());
        self
    }

    /// Delays the first backend call after it takes its result.
    pub fn with_first_call_delay(mut self, delay: Duration) -> Self {
        self.first_call_delay = Some(delay);
        self
    }

    /// Every conversion fails with `stderr`.
    pub fn with_failing_transcoder(mut self, stderr: impl Into<String>) -> Self {
        self.transcoder_failure = Some(stderr.into());
        self
    }

    /// Adjusts the configuration before the runner is built.
    pub fn with_config(mut self, adjust: impl FnOnce(&mut VoxbriefConfig)) -> Self {
        adjust(&mut self.config);
        self
    }

    pub fn build(self) -> Result<TestHarness, VoxbriefError> {
        let staging = tempfile::TempDir::new()
            .map_err(|e| VoxbriefError::Internal(format!("failed to create staging dir: {e}")))?;
        let mut config = self.config;
        config.transcoder.staging_dir = Some(staging.path().to_string_lossy().into_owned());

        let transport = Arc::new(MockTransport::new());
        let mut backend = MockBackend::with_results(self.results);
        if let Some(message) = self.backend_failure {
            backend = backend.otherwise_fail(message);
        }
        if let Some(delay) = self.first_call_delay {
            backend = backend.with_delay_on_first(delay);
        }
        let backend = Arc::new(backend);
        let transcoder = Arc::new(match self.transcoder_failure {
            Some(stderr) => MockTranscoder::failing(stderr),
            None => MockTranscoder::new(),
        });
        let cache = Arc::new(TranscriptCache::new(config.cache.max_entries));

        let runner = Arc::new(JobRunner::new(
            &config,
            transport.clone(),
            backend.clone(),
            transcoder.clone(),
            cache.clone(),
        )?);

        Ok(TestHarness {
            transport,
            backend,
            transcoder,
            cache,
            runner,
            config,
            next_update_id: AtomicI64::new(1),
            staging,
        })
    }
}

/// Mock adapters around a real job runner.
pub struct TestHarness {
    pub transport: Arc<MockTransport>,
    pub backend: Arc<MockBackend>,
    pub transcoder: Arc<MockTranscoder>,
    pub cache: Arc<TranscriptCache>,
    pub runner: Arc<JobRunner>,
    pub config: VoxbriefConfig,
    next_update_id: AtomicI64,
    /// Kept alive so staged files can be inspected until drop.
    staging: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Runs `msg` through the job pipeline and waits for the job to finish.
    pub async fn deliver(&self, msg: IncomingMessage) {
        let update = Update {
            id: self.next_update_id.fetch_add(1, Ordering::SeqCst),
            message: Some(msg),
        };
        self.runner
            .handle_update(update, &CancellationToken::new())
            .await;
    }

    /// A dispatch loop polling the mock transport.
    pub fn dispatch_loop(&self) -> DispatchLoop {
        DispatchLoop::new(
            self.transport.clone(),
            self.runner.clone(),
            &self.config.dispatch,
        )
    }

    pub fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    /// Texts delivered so far, in send order.
    pub async fn sent_texts(&self) -> Vec<String> {
        self.transport.sent_texts().await
    }
}
