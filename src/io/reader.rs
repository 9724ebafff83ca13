//! Raw file loading.
//!
//! Reads the bytes of every selected file, dispatching reads concurrently
//! and re-joining the results in input order, so downstream page copying
//! sees files exactly as the selection lists them.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmeld::io::FileReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = FileReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (loaded, stats) = reader.read_all(&paths).await?;
//! println!("Read {} files ({} bytes)", loaded.len(), stats.total_size);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::error::{PdfMeldError, Result};
use crate::utils::display_name;

/// The raw content of one loaded file.
#[derive(Debug)]
pub struct LoadedFile {
    /// Path the bytes were read from.
    pub path: PathBuf,

    /// Display name (final path component).
    pub name: String,

    /// The file's content.
    pub bytes: Vec<u8>,

    /// Time taken to read the file.
    pub load_time: Duration,
}

impl LoadedFile {
    /// Size of the loaded content in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Aggregate metrics for a batch load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStatistics {
    /// Number of files read.
    pub files_read: usize,

    /// Combined size of all files in bytes.
    pub total_size: u64,

    /// Wall-clock time for the whole batch.
    #[serde(skip)]
    pub total_time: Duration,
}

/// Reader with configurable load concurrency.
#[derive(Debug, Clone)]
pub struct FileReader {
    jobs: usize,
}

impl FileReader {
    /// Create a reader with concurrency matched to the machine.
    pub fn new() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { jobs }
    }

    /// Create a reader with an explicit concurrency limit.
    pub fn with_jobs(jobs: usize) -> Self {
        Self { jobs: jobs.max(1) }
    }

    /// Read a single file's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMeldError::FileNotFound`] for missing paths,
    /// [`PdfMeldError::NotAFile`] for directories, and
    /// [`PdfMeldError::FileNotAccessible`] for everything else.
    pub async fn read(&self, path: &Path) -> Result<LoadedFile> {
        let start = Instant::now();

        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfMeldError::file_not_found(path.to_path_buf())
            } else {
                PdfMeldError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if !metadata.is_file() {
            return Err(PdfMeldError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let bytes =
            tokio::fs::read(path)
                .await
                .map_err(|e| PdfMeldError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        Ok(LoadedFile {
            path: path.to_path_buf(),
            name: display_name(path),
            bytes,
            load_time: start.elapsed(),
        })
    }

    /// Read multiple files sequentially, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable file.
    pub async fn read_sequential(&self, paths: &[PathBuf]) -> Result<Vec<LoadedFile>> {
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            results.push(self.read(path).await?);
        }
        Ok(results)
    }

    /// Read multiple files concurrently.
    ///
    /// Reads are dispatched with bounded concurrency and the results are
    /// re-joined in input order, so callers can rely on position.
    ///
    /// # Errors
    ///
    /// Fails if any file is unreadable.
    pub async fn read_concurrent(&self, paths: &[PathBuf]) -> Result<Vec<LoadedFile>> {
        let tasks = paths.iter().enumerate().map(|(idx, path)| {
            let path = path.clone();
            let reader = self.clone();
            async move { (idx, reader.read(&path).await) }
        });

        let mut indexed: Vec<(usize, Result<LoadedFile>)> = stream::iter(tasks)
            .buffer_unordered(self.jobs)
            .collect::<Vec<_>>()
            .await;

        indexed.sort_by_key(|(idx, _)| *idx);

        let mut results = Vec::with_capacity(paths.len());
        for (_, result) in indexed {
            results.push(result?);
        }
        Ok(results)
    }

    /// Read all files, choosing sequential or concurrent loading by batch
    /// size, and report aggregate statistics.
    ///
    /// # Errors
    ///
    /// Fails if any file is unreadable.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Result<(Vec<LoadedFile>, LoadStatistics)> {
        let start = Instant::now();

        // Sequential loading avoids task overhead for small batches
        let results = if paths.len() <= 3 {
            self.read_sequential(paths).await?
        } else {
            self.read_concurrent(paths).await?
        };

        let stats = LoadStatistics {
            files_read: results.len(),
            total_size: results.iter().map(LoadedFile::size).sum(),
            total_time: start.elapsed(),
        };

        Ok((results, stats))
    }
}

impl Default for FileReader {
    fn default() -> Self {
        Self::new()
    }
}
