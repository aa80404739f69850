// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the voxbrief pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the role an adapter plays in the pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Transport,
    Backend,
    Transcoder,
}

// --- Transport types ---

/// One inbound update pulled from the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Platform-assigned, monotonically increasing update id.
    pub id: i64,
    /// The message carried by this update. `None` for edits, callbacks, etc.
    pub message: Option<IncomingMessage>,
}

/// A chat message in the shape the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub chat_id: i64,
    pub sender_id: Option<i64>,
    /// Text body, if the message has one.
    pub text: Option<String>,
    /// Id of the message this one replies to.
    pub reply_to_message_id: Option<i64>,
    pub attachment: Option<Attachment>,
}

impl IncomingMessage {
    /// Creates a plain text message with no attachment.
    pub fn text(message_id: i64, chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            message_id,
            chat_id,
            sender_id: None,
            text: Some(text.into()),
            reply_to_message_id: None,
            attachment: None,
        }
    }

    /// Creates a message carrying a single media attachment.
    pub fn media(message_id: i64, chat_id: i64, media: MediaRef) -> Self {
        Self {
            message_id,
            chat_id,
            sender_id: None,
            text: None,
            reply_to_message_id: None,
            attachment: Some(Attachment::Media(media)),
        }
    }

    /// Marks this message as a reply to `message_id`.
    pub fn replying_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }
}

/// Non-text payload attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Voice, audio, video, video note, or document.
    Media(MediaRef),
    /// GIF-style animation. Never processed.
    Animation,
    /// Sticker. Never processed.
    Sticker,
}

/// A reference to a downloadable media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub kind: MediaKind,
    pub file_id: String,
    /// Size reported by the platform, in bytes.
    pub file_size: u64,
    /// Original file name, when the platform provides one.
    pub file_name: Option<String>,
}

/// The platform-level kind of a media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MediaKind {
    Voice,
    Audio,
    Video,
    VideoNote,
    Document,
}

impl MediaKind {
    /// How the transcoder must treat this media.
    pub fn source_kind(self) -> SourceKind {
        match self {
            MediaKind::Video | MediaKind::VideoNote => SourceKind::Video,
            MediaKind::Voice | MediaKind::Audio | MediaKind::Document => SourceKind::Audio,
        }
    }
}

/// Transcoder input class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
    /// Re-encode the audio stream.
    Audio,
    /// Drop the video stream and encode the audio track.
    Video,
}

/// A resolved, downloadable file on the platform side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    pub size: u64,
}

/// Markup dialect for outbound text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ParseMode {
    #[strum(serialize = "HTML")]
    Html,
}

/// A text message to be delivered to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    pub reply_to: Option<i64>,
    /// `None` sends plain text.
    pub parse_mode: Option<ParseMode>,
}

impl OutboundMessage {
    /// A plain-text reply.
    pub fn plain(chat_id: i64, reply_to: Option<i64>, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to,
            parse_mode: None,
        }
    }

    /// An HTML reply.
    pub fn html(chat_id: i64, reply_to: Option<i64>, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to,
            parse_mode: Some(ParseMode::Html),
        }
    }

    /// The same message without markup.
    pub fn into_plain(self) -> Self {
        Self {
            parse_mode: None,
            ..self
        }
    }
}
