// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound delivery with chunking, send deadlines and plain-text fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};
use voxbrief_core::{OutboundMessage, Transport, VoxbriefError};
use voxbrief_telegram::{compose_reply, split_for_transport};

/// Sends replies on behalf of jobs. Failures are logged, never propagated.
#[derive(Clone)]
pub struct Replier {
    transport: Arc<dyn Transport>,
    max_message_length: usize,
    send_timeout: Duration,
}

impl Replier {
    pub fn new(transport: Arc<dyn Transport>, max_message_length: usize, send_timeout: Duration) -> Self {
        Self {
            transport,
            max_message_length,
            send_timeout,
        }
    }

    /// Sends `text` as a single plain message.
    pub async fn send_plain(&self, chat_id: i64, reply_to: i64, text: &str) {
        let msg = OutboundMessage::plain(chat_id, Some(reply_to), text);
        if let Err(e) = self.deliver(&msg).await {
            error!(chat_id, reply_to, error = %e, "failed to send reply");
        }
    }

    /// Sends HTML `body` under a bold `title`, split into transport-sized chunks.
    ///
    /// A chunk the platform refuses as HTML is retried once as plain text.
    pub async fn send_formatted(
        &self,
        chat_id: i64,
        reply_to: i64,
        body: &str,
        title: &str,
        spoiler: bool,
    ) {
        let full = compose_reply(Some(title), body, spoiler);
        let chunks = split_for_transport(&full, self.max_message_length);
        debug!(chat_id, chunks = chunks.len(), title, "sending formatted reply");

        for chunk in chunks {
            let msg = OutboundMessage::html(chat_id, Some(reply_to), chunk);
            let Err(e) = self.deliver(&msg).await else {
                continue;
            };
            warn!(chat_id, error = %e, "HTML send failed, retrying as plain text");
            if let Err(e) = self.deliver(&msg.into_plain()).await {
                error!(chat_id, error = %e, "failed to send reply chunk");
            }
        }
    }

    async fn deliver(&self, msg: &OutboundMessage) -> Result<(), VoxbriefError> {
        match tokio::time::timeout(self.send_timeout, self.transport.send_message(msg)).await {
            Ok(result) => result,
            Err(_) => Err(VoxbriefError::Timeout {
                duration: self.send_timeout,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use voxbrief_core::ParseMode;
    use voxbrief_test_utils::MockTransport;

    use super::*;

    fn replier(transport: &Arc<MockTransport>, max_len: usize) -> Replier {
        Replier::new(transport.clone(), max_len, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn plain_reply_threads_under_the_message() {
        let transport = Arc::new(MockTransport::new());
        replier(&transport, 4096).send_plain(5, 77, "hello").await;

        let sent = transport.sent_messages().await;
        assert_eq!(sent, vec![OutboundMessage::plain(5, Some(77), "hello")]);
    }

    #[tokio::test]
    async fn formatted_reply_is_titled_html() {
        let transport = Arc::new(MockTransport::new());
        replier(&transport, 4096)
            .send_formatted(5, 77, "body", "Summary", true)
            .await;

        let sent = transport.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].parse_mode, Some(ParseMode::Html));
        assert_eq!(sent[0].text, "<b>Summary</b>\n\n<tg-spoiler>body</tg-spoiler>");
    }

    #[tokio::test]
    async fn long_reply_is_chunked() {
        let transport = Arc::new(MockTransport::new());
        let body = "word ".repeat(40);
        replier(&transport, 50)
            .send_formatted(5, 77, body.trim(), "T", false)
            .await;

        let texts = transport.sent_texts().await;
        assert!(texts.len() > 1);
        assert!(texts.iter().all(|t| t.encode_utf16().count() <= 50));
    }

    #[tokio::test]
    async fn rejected_html_falls_back_to_plain_once_per_chunk() {
        let transport = Arc::new(MockTransport::new());
        transport.reject_html(true);
        replier(&transport, 4096)
            .send_formatted(5, 77, "a <b>", "Transcription", false)
            .await;

        assert_eq!(transport.rejected_messages().await.len(), 1);
        let sent = transport.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].parse_mode, None);
        assert_eq!(sent[0].text, "<b>Transcription</b>\n\na <b>");
    }
}
