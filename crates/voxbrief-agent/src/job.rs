// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of inbound messages into jobs.

use voxbrief_core::{Attachment, IncomingMessage, MediaKind, MediaRef};

/// Reply text that asks for a terser summary of the replied-to transcript.
pub const SHORTER_KEYWORD: &str = "кратко";

pub const START_COMMAND: &str = "/start";

/// Extensions accepted for generic document uploads.
pub const DOCUMENT_EXTENSIONS: [&str; 3] = [".mp3", ".wav", ".oga"];

/// What a message asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    /// Shorten the cached transcript of message `target`.
    Shorter { target: i64 },
    /// Greet the user.
    Start,
    /// Text, animation or sticker: answer with the capabilities notice.
    Unsupported,
    /// Transcribe and summarize an attachment.
    Media(MediaRef),
    /// Nothing to do.
    Ignore,
}

impl JobKind {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            JobKind::Shorter { .. } => "shorter",
            JobKind::Start => "start",
            JobKind::Unsupported => "unsupported",
            JobKind::Media(_) => "media",
            JobKind::Ignore => "ignore",
        }
    }
}

/// One unit of work, owned by the task that runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundJob {
    pub message_id: i64,
    pub chat_id: i64,
    /// Message every reply is threaded under.
    pub reply_to: i64,
    pub kind: JobKind,
}

impl InboundJob {
    pub fn from_message(msg: &IncomingMessage) -> Self {
        Self {
            message_id: msg.message_id,
            chat_id: msg.chat_id,
            reply_to: msg.message_id,
            kind: classify(msg),
        }
    }
}

/// Decides what `msg` asks for. Checks run in priority order.
pub fn classify(msg: &IncomingMessage) -> JobKind {
    if let Some(target) = shorter_target(msg) {
        return JobKind::Shorter { target };
    }

    let text = msg.text.as_deref().unwrap_or_default();
    if text.starts_with(START_COMMAND) {
        return JobKind::Start;
    }

    match &msg.attachment {
        Some(Attachment::Animation | Attachment::Sticker) => JobKind::Unsupported,
        _ if !text.is_empty() => JobKind::Unsupported,
        Some(Attachment::Media(media)) => JobKind::Media(media.clone()),
        None => JobKind::Ignore,
    }
}

/// The replied-to message id when `msg` is a "shorter" request.
pub fn shorter_target(msg: &IncomingMessage) -> Option<i64> {
    let target = msg.reply_to_message_id?;
    let text = msg.text.as_deref()?;
    (text.trim().to_lowercase() == SHORTER_KEYWORD).then_some(target)
}

/// Whether a generic document may be processed, judged by its file name.
pub fn is_supported_document(file_name: Option<&str>) -> bool {
    let Some(name) = file_name else {
        return false;
    };
    let name = name.to_lowercase();
    DOCUMENT_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Whether `media` passes the extension allowlist. Only documents are checked.
pub fn passes_extension_check(media: &MediaRef) -> bool {
    media.kind != MediaKind::Document || is_supported_document(media.file_name.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(kind: MediaKind, name: Option<&str>) -> MediaRef {
        MediaRef {
            kind,
            file_id: "file".into(),
            file_size: 1024,
            file_name: name.map(str::to_string),
        }
    }

    #[test]
    fn shorter_requires_reply_and_keyword() {
        let msg = IncomingMessage::text(10, 1, "  КРАТКО \n").replying_to(7);
        assert_eq!(classify(&msg), JobKind::Shorter { target: 7 });

        let no_reply = IncomingMessage::text(10, 1, "кратко");
        assert_eq!(classify(&no_reply), JobKind::Unsupported);

        let other_text = IncomingMessage::text(10, 1, "короче").replying_to(7);
        assert_eq!(classify(&other_text), JobKind::Unsupported);
    }

    #[test]
    fn start_command_with_payload() {
        let msg = IncomingMessage::text(1, 1, "/start deep-link");
        assert_eq!(classify(&msg), JobKind::Start);
    }

    #[test]
    fn animations_and_stickers_are_unsupported() {
        let mut msg = IncomingMessage::text(1, 1, "");
        msg.text = None;
        msg.attachment = Some(Attachment::Sticker);
        assert_eq!(classify(&msg), JobKind::Unsupported);
        msg.attachment = Some(Attachment::Animation);
        assert_eq!(classify(&msg), JobKind::Unsupported);
    }

    #[test]
    fn media_message_is_a_media_job() {
        let voice = media(MediaKind::Voice, None);
        let msg = IncomingMessage::media(3, 9, voice.clone());
        assert_eq!(classify(&msg), JobKind::Media(voice));

        let job = InboundJob::from_message(&msg);
        assert_eq!(job.message_id, 3);
        assert_eq!(job.chat_id, 9);
        assert_eq!(job.reply_to, 3);
    }

    #[test]
    fn empty_message_is_ignored() {
        let mut msg = IncomingMessage::text(1, 1, "");
        msg.text = None;
        assert_eq!(classify(&msg), JobKind::Ignore);
    }

    #[test]
    fn document_allowlist_is_case_insensitive_suffix() {
        assert!(is_supported_document(Some("talk.MP3")));
        assert!(is_supported_document(Some("note.oga")));
        assert!(is_supported_document(Some("a.b.wav")));
        assert!(!is_supported_document(Some("clip.ogg")));
        assert!(!is_supported_document(Some("mp3")));
        assert!(!is_supported_document(None));
    }

    #[test]
    fn only_documents_are_extension_checked() {
        assert!(passes_extension_check(&media(MediaKind::Audio, Some("x.flac"))));
        assert!(passes_extension_check(&media(MediaKind::Video, None)));
        assert!(!passes_extension_check(&media(MediaKind::Document, Some("clip.ogg"))));
    }
}
