// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for voxbrief integration tests.
//!
//! Provides mock adapters and a job harness for fast, deterministic tests
//! that need neither Telegram, Gemini nor ffmpeg.
//!
//! # Components
//!
//! - [`MockTransport`] - scripted update batches, captured outbound messages
//! - [`MockBackend`] - scripted generation results with call recording
//! - [`MockTranscoder`] - records conversions and writes a fake MP3
//! - [`TestHarness`] - a `JobRunner` wired to all three mocks

pub mod harness;
pub mod mock_backend;
pub mod mock_transcoder;
pub mod mock_transport;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_backend::{BackendCall, MockBackend};
pub use mock_transcoder::{MockTranscoder, TranscodeCall};
pub use mock_transport::MockTransport;
