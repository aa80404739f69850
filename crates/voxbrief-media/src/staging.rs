// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-job temporary storage for downloaded and converted media.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use voxbrief_core::{MediaKind, MediaRef, VoxbriefError};

const OUTPUT_FILE: &str = "output.mp3";

/// Local file name for a downloaded attachment.
///
/// Voice notes arrive as Ogg/Opus and video notes as MP4 without a name;
/// everything else keeps the extension of its original file name.
pub fn staged_file_name(media: &MediaRef) -> String {
    match media.kind {
        MediaKind::Voice => "voice.oga".to_string(),
        MediaKind::VideoNote => "video_note.mp4".to_string(),
        _ => {
            let ext = media
                .file_name
                .as_deref()
                .and_then(|name| Path::new(name).extension())
                .and_then(|ext| ext.to_str())
                .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
            match ext {
                Some(ext) => format!("input.{ext}"),
                None => "input".to_string(),
            }
        }
    }
}

/// A temporary directory holding one job's input and output files.
///
/// Both files are removed when the value is dropped.
#[derive(Debug)]
pub struct StagedMedia {
    dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

impl StagedMedia {
    /// Creates the staging directory under `root`, or the system temp dir.
    pub fn create(root: Option<&Path>, media: &MediaRef) -> Result<Self, VoxbriefError> {
        let builder = {
            let mut b = tempfile::Builder::new();
            b.prefix("voxbrief-");
            b
        };
        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| VoxbriefError::Media(format!("failed to create staging directory: {e}")))?;

        let input = dir.path().join(staged_file_name(media));
        let output = dir.path().join(OUTPUT_FILE);
        Ok(Self { dir, input, output })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> &Path {
        &self.input
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Writes the downloaded bytes to the input file.
    pub async fn write_input(&self, bytes: &[u8]) -> Result<(), VoxbriefError> {
        tokio::fs::write(&self.input, bytes)
            .await
            .map_err(|e| VoxbriefError::Media(format!("failed to write staged input: {e}")))
    }

    /// Reads the converted MP3.
    pub async fn read_output(&self) -> Result<Vec<u8>, VoxbriefError> {
        tokio::fs::read(&self.output)
            .await
            .map_err(|e| VoxbriefError::Media(format!("failed to read converted audio: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(kind: MediaKind, name: Option<&str>) -> MediaRef {
        MediaRef {
            kind,
            file_id: "f".into(),
            file_size: 1,
            file_name: name.map(str::to_string),
        }
    }

    #[test]
    fn voice_and_video_notes_use_fixed_names() {
        assert_eq!(staged_file_name(&media(MediaKind::Voice, None)), "voice.oga");
        assert_eq!(
            staged_file_name(&media(MediaKind::VideoNote, Some("x.webm"))),
            "video_note.mp4"
        );
    }

    #[test]
    fn other_media_keep_their_extension() {
        assert_eq!(
            staged_file_name(&media(MediaKind::Audio, Some("song.MP3"))),
            "input.MP3"
        );
        assert_eq!(
            staged_file_name(&media(MediaKind::Document, Some("talk.final.wav"))),
            "input.wav"
        );
        assert_eq!(staged_file_name(&media(MediaKind::Video, None)), "input");
    }

    #[test]
    fn odd_extensions_are_dropped() {
        assert_eq!(
            staged_file_name(&media(MediaKind::Document, Some("evil.m p3"))),
            "input"
        );
        assert_eq!(staged_file_name(&media(MediaKind::Audio, Some("noext"))), "input");
    }

    #[tokio::test]
    async fn files_live_in_dir_and_are_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let staged = StagedMedia::create(Some(root.path()), &media(MediaKind::Voice, None)).unwrap();
        let dir = staged.dir().to_path_buf();

        assert!(dir.starts_with(root.path()));
        assert_eq!(staged.input_path(), dir.join("voice.oga"));
        assert_eq!(staged.output_path(), dir.join("output.mp3"));

        staged.write_input(b"OggS").await.unwrap();
        assert_eq!(std::fs::read(staged.input_path()).unwrap(), b"OggS");
        std::fs::write(staged.output_path(), b"ID3").unwrap();
        assert_eq!(staged.read_output().await.unwrap(), b"ID3");

        drop(staged);
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn missing_output_is_a_media_error() {
        let staged = StagedMedia::create(None, &media(MediaKind::Audio, Some("a.mp3"))).unwrap();
        assert!(matches!(
            staged.read_output().await,
            Err(VoxbriefError::Media(_))
        ));
    }
}
