// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat transport trait (Telegram long polling and file delivery).

use async_trait::async_trait;

use crate::error::VoxbriefError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{OutboundMessage, RemoteFile, Update};

/// Pull-based chat platform connection.
///
/// Implementations must be safe to call from many concurrent jobs.
#[async_trait]
pub trait Transport: PluginAdapter {
    /// Long-polls for updates with id `>= offset`.
    ///
    /// Passing an offset acknowledges every earlier update.
    async fn fetch_updates(&self, offset: i64) -> Result<Vec<Update>, VoxbriefError>;

    /// Looks up download metadata for a platform file id.
    async fn resolve_file(&self, file_id: &str) -> Result<RemoteFile, VoxbriefError>;

    /// Downloads the full content of a resolved file.
    async fn download_file(&self, file: &RemoteFile) -> Result<Vec<u8>, VoxbriefError>;

    /// Delivers one text message.
    async fn send_message(&self, msg: &OutboundMessage) -> Result<(), VoxbriefError>;
}
