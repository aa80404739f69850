// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media handling for voxbrief.
//!
//! Downloads are staged into a per-job temporary directory, then converted
//! to MP3 by an ffmpeg subprocess before transcription.

pub mod ffmpeg;
pub mod staging;

pub use ffmpeg::{FfmpegTranscoder, ffmpeg_args};
pub use staging::{StagedMedia, staged_file_name};
