// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Primary/fallback generation with bounded retries.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use voxbrief_core::{GenerationBackend, GenerationRequest, VoxbriefError};

use crate::classify::is_retryable;
use crate::recording;
use crate::policy::RetryPolicy;

/// Runs generation requests against a shared backend under a [`RetryPolicy`].
///
/// Holds no mutable state, so one instance serves every concurrent job.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    backend: Arc<dyn GenerationBackend>,
    call_timeout: Duration,
}

impl GenerationOrchestrator {
    /// `call_timeout` bounds each individual backend call.
    pub fn new(backend: Arc<dyn GenerationBackend>, call_timeout: Duration) -> Self {
        Self {
            backend,
            call_timeout,
        }
    }

    /// Returns the first non-empty text produced by any attempt.
    ///
    /// Each tier is tried in order. Within a tier, a retryable failure with
    /// budget left waits `policy.delay()` and tries again; any other failure
    /// moves straight to the next tier. When every tier is spent the last
    /// observed error is returned inside [`VoxbriefError::GenerationExhausted`].
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        policy: &RetryPolicy,
        cancel: &CancellationToken,
    ) -> Result<String, VoxbriefError> {
        let mut last_error = VoxbriefError::Internal("no generation attempt was made".into());

        for (tier_name, tier) in policy.tiers() {
            let model = tier.model();
            for attempt in 1..=tier.max_attempts() {
                recording::record_attempt(model, tier_name);
                debug!(model, tier = tier_name, attempt, "calling generation backend");

                let error = match self.call(model, request, cancel).await {
                    Ok(text) if !text.is_empty() => {
                        if tier_name != "primary" || attempt > 1 {
                            info!(model, tier = tier_name, attempt, "generation recovered");
                        }
                        return Ok(text);
                    }
                    Ok(_) => VoxbriefError::EmptyResponse,
                    Err(VoxbriefError::Cancelled) => return Err(VoxbriefError::Cancelled),
                    Err(e) => e,
                };

                let retryable = is_retryable(&error);
                recording::record_failure(model, retryable);
                warn!(
                    model,
                    tier = tier_name,
                    attempt,
                    max_attempts = tier.max_attempts(),
                    retryable,
                    error = %error,
                    "generation attempt failed"
                );
                last_error = error;

                if !retryable || attempt >= tier.max_attempts() {
                    break;
                }
                tokio::select! {
                    _ = cancel.cancelled() => return Err(VoxbriefError::Cancelled),
                    _ = tokio::time::sleep(policy.delay()) => {}
                }
            }
        }

        recording::record_exhausted();
        warn!(error = %last_error, "all generation attempts failed");
        Err(VoxbriefError::GenerationExhausted {
            source: Box::new(last_error),
        })
    }

    async fn call(
        &self,
        model: &str,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<String, VoxbriefError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(VoxbriefError::Cancelled),
            outcome = tokio::time::timeout(self.call_timeout, self.backend.generate(model, request)) => {
                outcome.unwrap_or(Err(VoxbriefError::Timeout {
                    duration: self.call_timeout,
                }))
            }
        }
    }
}
