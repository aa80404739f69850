// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generation backend for deterministic testing.
//!
//! Results are popped from a FIFO script. When the script is empty the
//! configured fallback is used, which defaults to a "mock response" text.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use voxbrief_core::{
    AdapterType, GenerationBackend, GenerationRequest, HealthStatus, PluginAdapter,
    VoxbriefError,
};

/// One recorded call to [`MockBackend::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCall {
    pub model: String,
    pub request: GenerationRequest,
}

#[derive(Debug, Clone)]
enum Otherwise {
    Return(String),
    Fail(String),
}

/// A mock backend that returns scripted results and records every call.
pub struct MockBackend {
    script: Mutex<VecDeque<Result<String, VoxbriefError>>>,
    otherwise: Otherwise,
    first_delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<BackendCall>>,
}

impl MockBackend {
    /// A backend with an empty script.
    pub fn new() -> Self {
        Self::with_results(Vec::new())
    }

    /// A backend that returns `results` in order.
    pub fn with_results(results: Vec<Result<String, VoxbriefError>>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(results)),
            otherwise: Otherwise::Return("mock response".to_string()),
            first_delay: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Once the script runs out, fail every call with a backend error.
    pub fn otherwise_fail(mut self, message: impl Into<String>) -> Self {
        self.otherwise = Otherwise::Fail(message.into());
        self
    }

    /// Once the script runs out, return `text` for every call.
    pub fn otherwise_return(mut self, text: impl Into<String>) -> Self {
        self.otherwise = Otherwise::Return(text.into());
        self
    }

    /// Makes the first call sleep for `delay` after taking its result.
    pub fn with_delay_on_first(self, delay: Duration) -> Self {
        Self {
            first_delay: Mutex::new(Some(delay)),
            ..self
        }
    }

    /// Appends a result to the script.
    pub async fn push_result(&self, result: Result<String, VoxbriefError>) {
        self.script.lock().await.push_back(result);
    }

    pub async fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Models requested so far, in call order.
    pub async fn models(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .map(|c| c.model.clone())
            .collect()
    }

    async fn next_result(&self) -> Result<String, VoxbriefError> {
        if let Some(result) = self.script.lock().await.pop_front() {
            return result;
        }
        match &self.otherwise {
            Otherwise::Return(text) => Ok(text.clone()),
            Otherwise::Fail(message) => Err(VoxbriefError::Backend {
                message: message.clone(),
                source: None,
            }),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockBackend {
    fn name(&self) -> &str {
        "mock-backend"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Backend
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxbriefError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VoxbriefError> {
        Ok(())
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<String, VoxbriefError> {
        self.calls.lock().await.push(BackendCall {
            model: model.to_string(),
            request: request.clone(),
        });
        let result = self.next_result().await;
        let delay = self.first_delay.lock().await.take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }
}
