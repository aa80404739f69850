// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion from teloxide updates into transport-neutral [`Update`]s.

use teloxide::types::{FileMeta, Message, UpdateKind};
use voxbrief_core::{Attachment, IncomingMessage, MediaKind, MediaRef, Update};

/// Converts a teloxide update. Anything other than a new message carries no
/// message and is ignored downstream.
pub fn convert_update(update: &teloxide::types::Update) -> Update {
    let message = match &update.kind {
        UpdateKind::Message(msg) => Some(convert_message(msg)),
        _ => None,
    };
    Update {
        id: i64::from(update.id.0),
        message,
    }
}

/// Converts a single teloxide message.
pub fn convert_message(msg: &Message) -> IncomingMessage {
    IncomingMessage {
        message_id: i64::from(msg.id.0),
        chat_id: msg.chat.id.0,
        sender_id: msg.from.as_ref().and_then(|u| i64::try_from(u.id.0).ok()),
        text: msg.text().map(str::to_string),
        reply_to_message_id: msg.reply_to_message().map(|m| i64::from(m.id.0)),
        attachment: attachment_of(msg),
    }
}

fn attachment_of(msg: &Message) -> Option<Attachment> {
    // Animations also carry a document, so they are checked first.
    if msg.animation().is_some() {
        return Some(Attachment::Animation);
    }
    if msg.sticker().is_some() {
        return Some(Attachment::Sticker);
    }

    let media = if let Some(voice) = msg.voice() {
        media_ref(MediaKind::Voice, &voice.file, None)
    } else if let Some(audio) = msg.audio() {
        media_ref(MediaKind::Audio, &audio.file, audio.file_name.as_deref())
    } else if let Some(video) = msg.video() {
        media_ref(MediaKind::Video, &video.file, video.file_name.as_deref())
    } else if let Some(note) = msg.video_note() {
        media_ref(MediaKind::VideoNote, &note.file, None)
    } else if let Some(doc) = msg.document() {
        media_ref(MediaKind::Document, &doc.file, doc.file_name.as_deref())
    } else {
        return None;
    };
    Some(Attachment::Media(media))
}

fn media_ref(kind: MediaKind, file: &FileMeta, file_name: Option<&str>) -> MediaRef {
    MediaRef {
        kind,
        file_id: file.id.0.clone(),
        file_size: u64::from(file.size),
        file_name: file_name.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat() -> serde_json::Value {
        serde_json::json!({ "id": 4242i64, "type": "private", "first_name": "Test" })
    }

    fn from() -> serde_json::Value {
        serde_json::json!({ "id": 777u64, "is_bot": false, "first_name": "Test" })
    }

    fn message(extra: serde_json::Value) -> serde_json::Value {
        let mut json = serde_json::json!({
            "message_id": 31,
            "date": 1700000000i64,
            "chat": chat(),
            "from": from(),
        });
        if let (Some(obj), Some(extra)) = (json.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                obj.insert(k.clone(), v.clone());
            }
        }
        json
    }

    // teloxide's untagged update kinds only deserialize from text, not from a Value.
    fn parse_update(json: serde_json::Value) -> teloxide::types::Update {
        serde_json::from_str(&json.to_string()).expect("failed to deserialize mock update")
    }

    fn update(update_id: u32, body: serde_json::Value) -> teloxide::types::Update {
        let upd = parse_update(serde_json::json!({
            "update_id": update_id,
            "message": body,
        }));
        assert!(matches!(upd.kind, UpdateKind::Message(_)), "got {:?}", upd.kind);
        upd
    }

    #[test]
    fn voice_message_maps_to_media() {
        let upd = update(
            100,
            message(serde_json::json!({
                "voice": {
                    "file_id": "voice-file",
                    "file_unique_id": "u1",
                    "duration": 4,
                    "mime_type": "audio/ogg",
                    "file_size": 2048,
                }
            })),
        );
        let converted = convert_update(&upd);
        assert_eq!(converted.id, 100);
        let msg = converted.message.expect("message");
        assert_eq!(msg.message_id, 31);
        assert_eq!(msg.chat_id, 4242);
        assert_eq!(msg.sender_id, Some(777));
        match msg.attachment {
            Some(Attachment::Media(media)) => {
                assert_eq!(media.kind, MediaKind::Voice);
                assert_eq!(media.file_id, "voice-file");
                assert_eq!(media.file_size, 2048);
                assert!(media.file_name.is_none());
            }
            other => panic!("expected voice media, got {other:?}"),
        }
    }

    #[test]
    fn document_keeps_file_name() {
        let upd = update(
            5,
            message(serde_json::json!({
                "document": {
                    "file_id": "doc-file",
                    "file_unique_id": "u2",
                    "file_name": "clip.ogg",
                    "mime_type": "audio/ogg",
                    "file_size": 99,
                }
            })),
        );
        let msg = convert_update(&upd).message.expect("message");
        match msg.attachment {
            Some(Attachment::Media(media)) => {
                assert_eq!(media.kind, MediaKind::Document);
                assert_eq!(media.file_name.as_deref(), Some("clip.ogg"));
            }
            other => panic!("expected document media, got {other:?}"),
        }
    }

    #[test]
    fn text_reply_carries_reply_target() {
        let original = message(serde_json::json!({ "message_id": 12, "text": "original" }));
        let upd = update(
            7,
            message(serde_json::json!({
                "text": "Кратко",
                "reply_to_message": original,
            })),
        );
        let msg = convert_update(&upd).message.expect("message");
        assert_eq!(msg.text.as_deref(), Some("Кратко"));
        assert_eq!(msg.reply_to_message_id, Some(12));
        assert!(msg.attachment.is_none());
    }

    #[test]
    fn plain_text_has_no_reply_target() {
        let upd = update(8, message(serde_json::json!({ "text": "/start" })));
        let msg = convert_update(&upd).message.expect("message");
        assert_eq!(msg.text.as_deref(), Some("/start"));
        assert!(msg.reply_to_message_id.is_none());
    }

    #[test]
    fn edited_message_is_dropped() {
        let upd = parse_update(serde_json::json!({
            "update_id": 9,
            "edited_message": message(serde_json::json!({
                "text": "fixed typo",
                "edit_date": 1700000100i64,
            })),
        }));
        assert!(matches!(upd.kind, UpdateKind::EditedMessage(_)), "got {:?}", upd.kind);
        let converted = convert_update(&upd);
        assert_eq!(converted.id, 9);
        assert!(converted.message.is_none());
    }

    #[test]
    fn animation_wins_over_its_document() {
        let upd = update(
            10,
            message(serde_json::json!({
                "animation": {
                    "file_id": "gif-file",
                    "file_unique_id": "u3",
                    "width": 320,
                    "height": 240,
                    "duration": 2,
                    "file_name": "funny.mp4",
                    "mime_type": "video/mp4",
                    "file_size": 4096,
                },
                "document": {
                    "file_id": "gif-file",
                    "file_unique_id": "u3",
                    "file_name": "funny.mp4",
                    "mime_type": "video/mp4",
                    "file_size": 4096,
                }
            })),
        );
        let msg = convert_update(&upd).message.expect("message");
        assert_eq!(msg.attachment, Some(Attachment::Animation));
    }
}
