// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! One call is one attempt: retries and model fallback are handled by the
//! orchestrator, so this client never retries on its own.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;
use voxbrief_core::VoxbriefError;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Shared, read-only Gemini client. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, VoxbriefError> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| VoxbriefError::Config(format!("invalid Gemini API key header value: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| VoxbriefError::backend(format!("failed to build HTTP client: {e}"), e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}", self.base_url)
    }

    /// Sends one `generateContent` call for `model`.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, VoxbriefError> {
        let url = format!("{}:generateContent", self.model_url(model));
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        debug!(model, status = %status, "generateContent response received");

        let body = response.text().await.map_err(|e| self.request_error(e))?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            VoxbriefError::backend(format!("failed to parse Gemini response: {e}"), e)
        })
    }

    /// Fetches model metadata. Costs no tokens.
    pub async fn get_model(&self, model: &str) -> Result<(), VoxbriefError> {
        let response = self
            .client
            .get(self.model_url(model))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    fn request_error(&self, e: reqwest::Error) -> VoxbriefError {
        if e.is_timeout() {
            VoxbriefError::Timeout {
                duration: self.timeout,
            }
        } else {
            VoxbriefError::backend(format!("Gemini request failed: {e}"), e)
        }
    }
}

/// Error for a non-2xx status. The message always carries the numeric code.
fn status_error(status: reqwest::StatusCode, body: &str) -> VoxbriefError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api) if !api.error.status.is_empty() => format!(
            "Gemini returned {status} ({}): {}",
            api.error.status, api.error.message
        ),
        Ok(api) => format!("Gemini returned {status}: {}", api.error.message),
        Err(_) => format!("Gemini returned {status}: {body}"),
    };
    VoxbriefError::Backend {
        message,
        source: None,
    }
}
