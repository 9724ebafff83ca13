//! Artifact writing.
//!
//! Publishes the merged byte buffer to its final path. Writes are atomic:
//! the bytes land in a sibling temp file first and are renamed into place,
//! so a crash mid-write never leaves a truncated output.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::{PdfMeldError, Result};

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteStatistics {
    /// Time taken to write the file.
    #[serde(skip)]
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

/// Writer that publishes merged bytes to disk.
#[derive(Debug, Clone, Default)]
pub struct ArtifactWriter;

impl ArtifactWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `bytes` to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMeldError::FailedToWrite`] if the temp file cannot be
    /// written or renamed into place.
    pub async fn save(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        let tmp_path = path.with_extension("tmp");
        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|e| PdfMeldError::FailedToWrite {
                path: tmp_path.clone(),
                source: e,
            })?;

        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| PdfMeldError::FailedToWrite {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size: bytes.len() as u64,
            output_path: path.to_path_buf(),
        })
    }

    /// Check that `path` can plausibly be written, without writing.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory is missing or read-only.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            if !parent.exists() {
                return Err(PdfMeldError::other(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }

            let metadata =
                tokio::fs::metadata(parent)
                    .await
                    .map_err(|e| PdfMeldError::FileNotAccessible {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;

            if metadata.permissions().readonly() {
                return Err(PdfMeldError::other(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if the output file already exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}
