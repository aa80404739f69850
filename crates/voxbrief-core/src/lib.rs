// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for voxbrief.
//!
//! Provides the adapter traits, error type, and shared data types used by
//! every other crate in the workspace.

pub mod error;
pub mod generation;
pub mod traits;
pub mod types;

pub use error::VoxbriefError;
pub use generation::{ContentPart, GenerationRequest, Priming, Role, Turn};
pub use types::{
    AdapterType, Attachment, HealthStatus, IncomingMessage, MediaKind, MediaRef,
    OutboundMessage, ParseMode, RemoteFile, SourceKind, Update,
};

pub use traits::{GenerationBackend, PluginAdapter, Transcoder, Transport};
