// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transient-failure classification.
//!
//! A failure is retryable iff its lowercased description contains one of
//! [`RETRYABLE_MARKERS`]. Classification is purely textual so it works the
//! same for HTTP status errors, timeouts and synthesized failures.

use voxbrief_core::VoxbriefError;

/// Substrings marking a failure as transient.
pub const RETRYABLE_MARKERS: &[&str] = &[
    "503",
    "429",
    "500",
    "overloaded",
    "unavailable",
    "timeout",
    "deadline exceeded",
];

/// Whether another attempt against the same model may succeed.
///
/// [`VoxbriefError::EmptyResponse`] is always retryable.
pub fn is_retryable(err: &VoxbriefError) -> bool {
    match err {
        VoxbriefError::EmptyResponse => true,
        VoxbriefError::Cancelled => false,
        other => is_retryable_message(&other.to_string()),
    }
}

/// Textual form of [`is_retryable`].
pub fn is_retryable_message(description: &str) -> bool {
    let lowered = description.to_lowercase();
    RETRYABLE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
