// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the voxbrief pipeline.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod backend;
pub mod transcoder;
pub mod transport;

pub use adapter::PluginAdapter;
pub use backend::GenerationBackend;
pub use transcoder::Transcoder;
pub use transport::Transport;
