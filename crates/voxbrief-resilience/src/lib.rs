// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilience primitives for voxbrief generation requests.
//!
//! - [`is_retryable`]: textual transient-failure classification
//! - [`RetryPolicy`]: primary and fallback tiers with fixed delay
//! - [`GenerationOrchestrator`]: executes a request under a policy

pub mod classify;
pub mod orchestrator;
pub mod policy;
pub mod recording;

pub use classify::{RETRYABLE_MARKERS, is_retryable, is_retryable_message};
pub use orchestrator::GenerationOrchestrator;
pub use policy::{RetryPolicy, Tier};
