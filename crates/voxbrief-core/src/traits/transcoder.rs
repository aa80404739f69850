// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media transcoder trait.

use std::path::Path;

use async_trait::async_trait;

use crate::error::VoxbriefError;
use crate::traits::adapter::PluginAdapter;
use crate::types::SourceKind;

/// Normalizes arbitrary audio or video into mono MP3.
#[async_trait]
pub trait Transcoder: PluginAdapter {
    /// Reads `input` and writes MP3 audio to `output`, overwriting it.
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        kind: SourceKind,
    ) -> Result<(), VoxbriefError>;
}
