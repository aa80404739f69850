// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation request model shared by the orchestrator and backends.
//!
//! A [`GenerationRequest`] is built once per call and never mutated. Backends
//! read it through [`GenerationRequest::turns`], which lays out the optional
//! priming exchange ahead of the user turn.

use bytes::Bytes;

/// MIME type used for normalized audio sent to the backend.
pub const AUDIO_MPEG: &str = "audio/mpeg";

/// One piece of content inside a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Blob { mime_type: String, data: Bytes },
}

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A turn as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<ContentPart>,
}

/// System-instruction turn plus the model's acknowledgement, sent before the user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Priming {
    pub instruction: String,
    pub acknowledgement: String,
}

/// Immutable request handed to the generation orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    priming: Option<Priming>,
    parts: Vec<ContentPart>,
}

impl GenerationRequest {
    /// Builds a request from explicit parts.
    pub fn new(priming: Option<Priming>, parts: Vec<ContentPart>) -> Self {
        Self { priming, parts }
    }

    /// `{prompt, audio}` request used for transcription.
    pub fn transcription(prompt: impl Into<String>, audio: impl Into<Bytes>) -> Self {
        Self::new(
            None,
            vec![
                ContentPart::Text(prompt.into()),
                ContentPart::Blob {
                    mime_type: AUDIO_MPEG.to_string(),
                    data: audio.into(),
                },
            ],
        )
    }

    /// Three-turn `{instruction, acknowledgement, prompt}` request used for summaries.
    pub fn summarization(
        instruction: impl Into<String>,
        acknowledgement: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self::new(
            Some(Priming {
                instruction: instruction.into(),
                acknowledgement: acknowledgement.into(),
            }),
            vec![ContentPart::Text(prompt.into())],
        )
    }

    pub fn priming(&self) -> Option<&Priming> {
        self.priming.as_ref()
    }

    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }

    /// Text of every text part of the user turn, joined by newlines.
    pub fn user_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text(t) => Some(t.as_str()),
                ContentPart::Blob { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Wire layout: priming turns (if any) followed by the user turn.
    pub fn turns(&self) -> Vec<Turn> {
        let mut turns = Vec::with_capacity(3);
        if let Some(priming) = &self.priming {
            turns.push(Turn {
                role: Role::User,
                parts: vec![ContentPart::Text(priming.instruction.clone())],
            });
            turns.push(Turn {
                role: Role::Model,
                parts: vec![ContentPart::Text(priming.acknowledgement.clone())],
            });
        }
        turns.push(Turn {
            role: Role::User,
            parts: self.parts.clone(),
        });
        turns
    }
}
