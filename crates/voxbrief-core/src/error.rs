// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for voxbrief.

use thiserror::Error;

/// The error type shared by every voxbrief adapter trait and core operation.
#[derive(Debug, Error)]
pub enum VoxbriefError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat transport errors (polling, file lookup, download, send).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generative backend errors (HTTP failure, rejected request, bad payload).
    #[error("backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered successfully but produced no text.
    #[error("backend returned an empty text response")]
    EmptyResponse,

    /// Every attempt on every model tier failed.
    #[error("all generation attempts failed, last error: {source}")]
    GenerationExhausted { source: Box<VoxbriefError> },

    /// Media rejected or unusable before transcoding (size, format, staging).
    #[error("media error: {0}")]
    Media(String),

    /// The transcoder subprocess failed or could not be started.
    #[error("transcode error: {message}")]
    Transcode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An operation exceeded its deadline.
    #[error("timeout: operation exceeded {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// The operation was abandoned because shutdown was requested.
    #[error("operation cancelled")]
    Cancelled,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VoxbriefError {
    /// Shorthand for a transport error that wraps an underlying cause.
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for a backend error that wraps an underlying cause.
    pub fn backend(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
