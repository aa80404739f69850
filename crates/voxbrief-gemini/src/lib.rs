// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini backend for voxbrief.
//!
//! Implements [`GenerationBackend`] over the Gemini REST API. Audio blobs are
//! sent inline as base64, priming turns keep their `user`/`model` roles.

pub mod client;
pub mod types;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};
use voxbrief_config::model::GeminiConfig;
use voxbrief_core::{
    AdapterType, ContentPart, GenerationBackend, GenerationRequest, HealthStatus, PluginAdapter,
    VoxbriefError,
};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, Part};

/// Gemini generation backend.
pub struct GeminiBackend {
    client: GeminiClient,
    health_model: String,
}

impl GeminiBackend {
    /// Builds the backend from the `[gemini]` config section.
    ///
    /// Fails if no API key is configured.
    pub fn new(config: &GeminiConfig) -> Result<Self, VoxbriefError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| VoxbriefError::Config("gemini.api_key is not set".into()))?;
        let client = GeminiClient::new(api_key, &config.base_url, config.request_timeout())?;
        Ok(Self::with_client(client, config.primary_model.clone()))
    }

    pub fn with_client(client: GeminiClient, health_model: String) -> Self {
        Self {
            client,
            health_model,
        }
    }
}

/// Lays out a request as Gemini `contents`.
pub fn to_wire_request(request: &GenerationRequest) -> GenerateContentRequest {
    let contents = request
        .turns()
        .into_iter()
        .map(|turn| Content {
            role: turn.role.as_str().to_string(),
            parts: turn.parts.iter().map(to_wire_part).collect(),
        })
        .collect();
    GenerateContentRequest { contents }
}

fn to_wire_part(part: &ContentPart) -> Part {
    match part {
        ContentPart::Text(text) => Part::text(text.clone()),
        ContentPart::Blob { mime_type, data } => Part::inline(mime_type.clone(), STANDARD.encode(data)),
    }
}

#[async_trait]
impl PluginAdapter for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Backend
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxbriefError> {
        match self.client.get_model(&self.health_model).await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(model = %self.health_model, error = %e, "Gemini health check failed");
                Ok(HealthStatus::Degraded(e.to_string()))
            }
        }
    }

    async fn shutdown(&self) -> Result<(), VoxbriefError> {
        debug!("Gemini backend shutting down");
        Ok(())
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<String, VoxbriefError> {
        let response = self
            .client
            .generate_content(model, &to_wire_request(request))
            .await?;

        if let Some(reason) = response.block_reason() {
            return Err(VoxbriefError::Backend {
                message: format!("Gemini blocked the prompt: {reason}"),
                source: None,
            });
        }
        let text = response.text();
        if text.is_empty() {
            return Err(VoxbriefError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(base_url: &str) -> GeminiBackend {
        let client = GeminiClient::new("key", base_url, Duration::from_secs(5)).unwrap();
        GeminiBackend::with_client(client, "gemini-2.5-flash".into())
    }

    #[test]
    fn summarization_request_becomes_three_turns() {
        let req = GenerationRequest::summarization("rules", "understood", "text");
        let wire = serde_json::to_value(to_wire_request(&req)).unwrap();
        assert_eq!(
            wire,
            serde_json::json!({"contents": [
                {"role": "user", "parts": [{"text": "rules"}]},
                {"role": "model", "parts": [{"text": "understood"}]},
                {"role": "user", "parts": [{"text": "text"}]}
            ]})
        );
    }

    #[test]
    fn audio_blob_is_base64_inline_data() {
        let req = GenerationRequest::transcription("transcribe", vec![0u8, 1, 2]);
        let wire = serde_json::to_value(to_wire_request(&req)).unwrap();
        assert_eq!(
            wire["contents"][0]["parts"][1],
            serde_json::json!({"inlineData": {"mimeType": "audio/mpeg", "data": "AAEC"}})
        );
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = GeminiBackend::new(&GeminiConfig::default()).err().unwrap();
        assert!(matches!(err, VoxbriefError::Config(_)));
    }

    #[test]
    fn plugin_adapter_metadata() {
        let b = backend("http://localhost:1");
        assert_eq!(b.name(), "gemini");
        assert_eq!(b.version(), semver::Version::new(0, 1, 0));
        assert_eq!(b.adapter_type(), AdapterType::Backend);
    }

    #[tokio::test]
    async fn generate_returns_text_for_requested_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "transcribe"}, {"inlineData": {"mimeType": "audio/mpeg"}}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "привет мир"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let req = GenerationRequest::transcription("transcribe", vec![1u8, 2, 3]);
        let text = backend(&server.uri())
            .generate("gemini-2.0-flash", &req)
            .await
            .unwrap();
        assert_eq!(text, "привет мир");
    }

    #[tokio::test]
    async fn empty_candidate_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": []}, "finishReason": "STOP"}]
            })))
            .mount(&server)
            .await;

        let req = GenerationRequest::summarization("s", "a", "u");
        let err = backend(&server.uri())
            .generate("gemini-2.5-flash", &req)
            .await
            .unwrap_err();
        assert!(matches!(err, VoxbriefError::EmptyResponse));
    }

    #[tokio::test]
    async fn blocked_prompt_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "PROHIBITED_CONTENT"}
            })))
            .mount(&server)
            .await;

        let req = GenerationRequest::summarization("s", "a", "u");
        let err = backend(&server.uri())
            .generate("gemini-2.5-flash", &req)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("PROHIBITED_CONTENT"));
    }

    #[tokio::test]
    async fn health_check_degrades_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models/gemini-2.5-flash"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let status = backend(&server.uri()).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Degraded(msg) if msg.contains("403")));
    }
}
