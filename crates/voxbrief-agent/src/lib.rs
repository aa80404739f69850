// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update dispatch and job execution for voxbrief.
//!
//! The [`DispatchLoop`] is the long-lived driver that:
//! - Long-polls the transport with a monotonic [`ResumeCursor`]
//! - Spawns one tracked, semaphore-bounded job per update
//! - Drains in-flight jobs on shutdown
//!
//! Each job is run by the [`JobRunner`], which shares the
//! [`TranscriptCache`] used by "shorter" follow-ups.

pub mod cache;
pub mod cursor;
pub mod dispatch;
pub mod job;
pub mod messages;
pub mod pipeline;
pub mod recording;
pub mod reply;
pub mod shutdown;

pub use cache::TranscriptCache;
pub use cursor::ResumeCursor;
pub use dispatch::DispatchLoop;
pub use job::{InboundJob, JobKind, classify};
pub use pipeline::JobRunner;
pub use reply::Replier;
pub use shutdown::install_signal_handler;
