// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative model backend trait.

use async_trait::async_trait;

use crate::error::VoxbriefError;
use crate::generation::GenerationRequest;
use crate::traits::adapter::PluginAdapter;

/// A remote generative model reachable by model name.
///
/// One call is one attempt. Retries and model fallback live above this trait.
#[async_trait]
pub trait GenerationBackend: PluginAdapter {
    /// Runs `request` against `model` and returns the concatenated text output.
    ///
    /// Returns [`VoxbriefError::EmptyResponse`] when the model answers without text.
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<String, VoxbriefError>;
}
