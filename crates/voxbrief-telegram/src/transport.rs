// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`Transport`] implementation over the Telegram Bot API.

use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, ChatId, FileId, MessageId, ReplyParameters};
use tracing::{debug, warn};
use voxbrief_config::model::TelegramConfig;
use voxbrief_core::{
    AdapterType, HealthStatus, OutboundMessage, ParseMode, PluginAdapter, RemoteFile, Transport,
    Update, VoxbriefError,
};

use crate::convert::convert_update;

/// Long-polling Telegram transport backed by a teloxide [`Bot`].
///
/// The bot is cheap to clone and safe to share between jobs.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
    poll_timeout_secs: u32,
}

impl TelegramTransport {
    /// Creates a transport from config. Requires `telegram.bot_token`.
    pub fn new(config: &TelegramConfig) -> Result<Self, VoxbriefError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            VoxbriefError::Config("telegram.bot_token is required for the Telegram transport".into())
        })?;
        if token.is_empty() {
            return Err(VoxbriefError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let mut bot = Bot::new(token);
        if let Some(api_url) = config.api_url.as_deref() {
            let url = reqwest::Url::parse(api_url).map_err(|e| {
                VoxbriefError::Config(format!("telegram.api_url is not a valid URL: {e}"))
            })?;
            bot = bot.set_api_url(url);
        }

        Ok(Self {
            bot,
            poll_timeout_secs: config.poll_timeout_secs,
        })
    }
}

#[async_trait]
impl PluginAdapter for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }

    async fn health_check(&self) -> Result<HealthStatus, VoxbriefError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), VoxbriefError> {
        debug!("Telegram transport shutting down");
        Ok(())
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn fetch_updates(&self, offset: i64) -> Result<Vec<Update>, VoxbriefError> {
        let offset = i32::try_from(offset)
            .map_err(|_| VoxbriefError::Internal(format!("update offset {offset} out of range")))?;

        let updates = self
            .bot
            .get_updates()
            .offset(offset)
            .timeout(self.poll_timeout_secs)
            .allowed_updates(vec![AllowedUpdate::Message])
            .await
            .map_err(|e| VoxbriefError::transport(format!("failed to fetch updates: {e}"), e))?;

        Ok(updates.iter().map(convert_update).collect())
    }

    async fn resolve_file(&self, file_id: &str) -> Result<RemoteFile, VoxbriefError> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| VoxbriefError::transport(format!("failed to get file info: {e}"), e))?;

        Ok(RemoteFile {
            path: file.path,
            size: u64::from(file.meta.size),
        })
    }

    async fn download_file(&self, file: &RemoteFile) -> Result<Vec<u8>, VoxbriefError> {
        let mut buf = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(|e| VoxbriefError::transport(format!("failed to download file: {e}"), e))?;

        debug!(path = %file.path, size = buf.len(), "downloaded file from Telegram");
        Ok(buf)
    }

    async fn send_message(&self, msg: &OutboundMessage) -> Result<(), VoxbriefError> {
        let mut request = self.bot.send_message(ChatId(msg.chat_id), &msg.text);

        if let Some(reply_to) = msg.reply_to {
            match i32::try_from(reply_to) {
                Ok(id) => {
                    request = request.reply_parameters(
                        ReplyParameters::new(MessageId(id)).allow_sending_without_reply(),
                    );
                }
                Err(_) => warn!(reply_to, "reply target out of range, sending without reply"),
            }
        }

        if let Some(ParseMode::Html) = msg.parse_mode {
            request = request.parse_mode(teloxide::types::ParseMode::Html);
        }

        request
            .await
            .map_err(|e| VoxbriefError::transport(format!("failed to send message: {e}"), e))?;
        Ok(())
    }
}
