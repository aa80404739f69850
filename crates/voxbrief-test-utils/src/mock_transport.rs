// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat transport for deterministic testing.
//!
//! `MockTransport` serves scripted update batches (or fetch failures),
//! hands out fake file contents, and captures every outbound message.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use voxbrief_core::{
    AdapterType, HealthStatus, OutboundMessage, PluginAdapter, RemoteFile, Transport, Update,
    VoxbriefError,
};

/// Bytes returned for files without explicit content.
pub const DEFAULT_FILE_CONTENT: &[u8] = b"fake-media";

/// How long an unscripted fetch idles before returning an empty batch.
const IDLE_POLL: Duration = Duration::from_millis(20);

/// A mock transport with scripted input and captured output.
pub struct MockTransport {
    batches: Mutex<VecDeque<Result<Vec<Update>, String>>>,
    offsets: Mutex<Vec<i64>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    sent: Mutex<Vec<OutboundMessage>>,
    rejected: Mutex<Vec<OutboundMessage>>,
    reject_html: AtomicBool,
    fail_downloads: AtomicBool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(VecDeque::new()),
            offsets: Mutex::new(Vec::new()),
            files: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            rejected: Mutex::new(Vec::new()),
            reject_html: AtomicBool::new(false),
            fail_downloads: AtomicBool::new(false),
        }
    }

    /// Queues a batch for the next `fetch_updates` call.
    pub async fn push_batch(&self, updates: Vec<Update>) {
        self.batches.lock().await.push_back(Ok(updates));
    }

    /// Queues a fetch failure.
    pub async fn push_fetch_error(&self, message: impl Into<String>) {
        self.batches.lock().await.push_back(Err(message.into()));
    }

    /// Sets the content served for `file_id`.
    pub async fn set_file(&self, file_id: impl Into<String>, content: Vec<u8>) {
        self.files.lock().await.insert(file_id.into(), content);
    }

    /// Makes every HTML send fail so callers exercise their plain fallback.
    pub fn reject_html(&self, reject: bool) {
        self.reject_html.store(reject, Ordering::SeqCst);
    }

    pub fn fail_downloads(&self, fail: bool) {
        self.fail_downloads.store(fail, Ordering::SeqCst);
    }

    /// Offsets passed to `fetch_updates`, in call order.
    pub async fn offsets(&self) -> Vec<i64> {
        self.offsets.lock().await.clone()
    }

    /// Messages that were delivered.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    /// Texts of delivered messages.
    pub async fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .map(|m| m.text.clone())
            .collect()
    }

    /// Messages whose delivery was refused.
    pub async fn rejected_messages(&self) -> Vec<OutboundMessage> {
        self.rejected.lock().await.clone()
    }

    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
        self.rejected.lock().await.clear();
    }

    /// Waits until at least `count` messages were delivered or `timeout` passes.
    pub async fn wait_for_sent(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.sent.lock().await.len() >= count {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTransport {
    fn name(&self) -> &str {
        "mock-transport"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxbriefError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VoxbriefError> {
        Ok(())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch_updates(&self, offset: i64) -> Result<Vec<Update>, VoxbriefError> {
        self.offsets.lock().await.push(offset);
        let next = self.batches.lock().await.pop_front();
        match next {
            Some(Ok(updates)) => Ok(updates),
            Some(Err(message)) => Err(VoxbriefError::Transport {
                message,
                source: None,
            }),
            None => {
                tokio::time::sleep(IDLE_POLL).await;
                Ok(Vec::new())
            }
        }
    }

    async fn resolve_file(&self, file_id: &str) -> Result<RemoteFile, VoxbriefError> {
        let files = self.files.lock().await;
        let size = files
            .get(file_id)
            .map_or(DEFAULT_FILE_CONTENT.len(), Vec::len);
        Ok(RemoteFile {
            path: file_id.to_string(),
            size: size as u64,
        })
    }

    async fn download_file(&self, file: &RemoteFile) -> Result<Vec<u8>, VoxbriefError> {
        if self.fail_downloads.load(Ordering::SeqCst) {
            return Err(VoxbriefError::Transport {
                message: format!("download of {} refused", file.path),
                source: None,
            });
        }
        let files = self.files.lock().await;
        Ok(files
            .get(&file.path)
            .cloned()
            .unwrap_or_else(|| DEFAULT_FILE_CONTENT.to_vec()))
    }

    async fn send_message(&self, msg: &OutboundMessage) -> Result<(), VoxbriefError> {
        if msg.parse_mode.is_some() && self.reject_html.load(Ordering::SeqCst) {
            self.rejected.lock().await.push(msg.clone());
            return Err(VoxbriefError::Transport {
                message: "Bad Request: can't parse entities".into(),
                source: None,
            });
        }
        self.sent.lock().await.push(msg.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn batches_are_served_in_order_and_offsets_recorded() {
        let transport = MockTransport::new();
        transport
            .push_batch(vec![Update { id: 1, message: None }])
            .await;
        transport.push_fetch_error("connection reset").await;

        assert_eq!(transport.fetch_updates(0).await.unwrap().len(), 1);
        assert!(transport.fetch_updates(2).await.is_err());
        assert!(transport.fetch_updates(2).await.unwrap().is_empty());
        assert_eq!(transport.offsets().await, vec![0, 2, 2]);
    }

    #[tokio::test]
    async fn html_rejection_records_and_fails() {
        let transport = MockTransport::new();
        transport.reject_html(true);

        let html = OutboundMessage::html(1, Some(2), "<b>x</b>");
        assert!(transport.send_message(&html).await.is_err());
        transport.send_message(&html.clone().into_plain()).await.unwrap();

        assert_eq!(transport.rejected_messages().await.len(), 1);
        assert_eq!(transport.sent_texts().await, vec!["<b>x</b>"]);
    }

    #[tokio::test]
    async fn files_default_to_fake_content() {
        let transport = MockTransport::new();
        transport.set_file("known", b"abc".to_vec()).await;

        let known = transport.resolve_file("known").await.unwrap();
        assert_eq!(known.size, 3);
        assert_eq!(transport.download_file(&known).await.unwrap(), b"abc");

        let other = transport.resolve_file("other").await.unwrap();
        assert_eq!(
            transport.download_file(&other).await.unwrap(),
            DEFAULT_FILE_CONTENT
        );
    }
}
