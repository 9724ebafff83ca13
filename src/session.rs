//! The merge session: selection, previews, reorder, and merge.
//!
//! [`MergeSession`] owns everything the merge workflow touches: the ordered
//! pending selection, the preview file backing each entry, the drag-state
//! counter, the busy flag, the last user-visible error, and the merged
//! artifact. Intake replaces the selection wholesale; reordering swaps
//! neighbours in place; merging concatenates pages in list order through
//! the engine seam.
//!
//! Resource discipline: every preview handle and the artifact handle are
//! revoked when superseded, on [`clear`](MergeSession::clear), and on drop.
//! A handle never outlives the state that references it.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::engine::{LopdfEngine, PdfEngine};
use crate::error::{ErrorKind, PdfMeldError, Result};
use crate::intake::{self, DragTracker};
use crate::io::FileReader;
use crate::preview::{PreviewHandle, PreviewStore};
use crate::utils::{display_name, format_file_size};

/// File name under which the merged artifact is published.
pub const MERGED_FILE_NAME: &str = "merged.pdf";

/// One entry of the pending selection.
///
/// The id is stable for the lifetime of the entry: reordering never changes
/// it, so it can serve as a render key in any embedding UI.
#[derive(Debug)]
pub struct SelectedItem {
    id: u64,
    name: String,
    path: PathBuf,
    size: u64,
    preview: PreviewHandle,
}

impl SelectedItem {
    /// Stable identity of this entry.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name (final path component).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the source file in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Preview handle backing this entry.
    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }
}

/// Statistics about a completed merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStatistics {
    /// Number of documents merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Combined size of the input files in bytes.
    pub input_size: u64,

    /// Time spent reading input bytes.
    #[serde(skip)]
    pub load_time: Duration,

    /// Total time for the merge, reads included.
    #[serde(skip)]
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as a human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// The merged document, held until superseded or the session is dropped.
#[derive(Debug)]
pub struct MergeArtifact {
    /// Number of pages in the merged document.
    pub page_count: usize,

    /// Statistics about the merge that produced this artifact.
    pub statistics: MergeStatistics,

    bytes: Vec<u8>,
    handle: PreviewHandle,
}

impl MergeArtifact {
    /// The merged document's serialized bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Revocable handle to the materialized `merged.pdf`.
    pub fn handle(&self) -> &PreviewHandle {
        &self.handle
    }
}

/// The user-visible error state of the session.
///
/// `message` is the single line shown to the user; `detail` carries the
/// underlying cause for diagnostics only.
#[derive(Debug, Clone)]
pub struct SessionError {
    /// Which of the two user-visible kinds occurred.
    pub kind: ErrorKind,
    /// Single-line message for display.
    pub message: String,
    /// Full diagnostic detail, never shown directly.
    pub detail: String,
}

impl SessionError {
    fn from_error(err: &PdfMeldError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
            detail: err.to_string(),
        }
    }
}

/// Stateful controller for selecting, reordering, and merging PDFs.
pub struct MergeSession {
    items: Vec<SelectedItem>,
    result: Option<MergeArtifact>,
    error: Option<SessionError>,
    merging: bool,
    drag: DragTracker,
    previews: PreviewStore,
    engine: LopdfEngine,
    reader: FileReader,
    next_item_id: u64,
}

impl MergeSession {
    /// Create a session with concurrency matched to the machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview directory cannot be created.
    pub fn new() -> Result<Self> {
        Self::build(FileReader::new())
    }

    /// Create a session with an explicit file-read concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview directory cannot be created.
    pub fn with_jobs(jobs: usize) -> Result<Self> {
        Self::build(FileReader::with_jobs(jobs))
    }

    fn build(reader: FileReader) -> Result<Self> {
        Ok(Self {
            items: Vec::new(),
            result: None,
            error: None,
            merging: false,
            drag: DragTracker::new(),
            previews: PreviewStore::new()?,
            engine: LopdfEngine::new(),
            reader,
            next_item_id: 0,
        })
    }

    /// The pending selection, in merge order.
    pub fn items(&self) -> &[SelectedItem] {
        &self.items
    }

    /// The current merge result, if one exists.
    pub fn result(&self) -> Option<&MergeArtifact> {
        self.result.as_ref()
    }

    /// The current user-visible error, if any.
    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// Whether a merge is currently in flight.
    pub fn is_merging(&self) -> bool {
        self.merging
    }

    /// Whether a drag is currently over the intake surface.
    pub fn is_drag_active(&self) -> bool {
        self.drag.is_active()
    }

    /// Directory where previews and the merged artifact are materialized.
    pub fn preview_dir(&self) -> &Path {
        self.previews.root()
    }

    /// Picker intake: replace the selection with the given batch, as-is.
    ///
    /// Every previous preview handle is revoked, the prior result and error
    /// are cleared, and each incoming file gets a fresh id and preview in
    /// the supplied order.
    ///
    /// Returns the number of selected files.
    ///
    /// # Errors
    ///
    /// Fails if any file is missing, unreadable, or cannot be previewed.
    /// On failure the previous selection is left untouched.
    pub fn select(&mut self, paths: &[PathBuf]) -> Result<usize> {
        self.replace_selection(paths)
    }

    /// Drop intake: filter the batch to declared PDFs, then replace.
    ///
    /// The drag state ends unconditionally. If the filtered set is empty
    /// the drop is a complete no-op: selection, result, and error all stay
    /// as they were, and `Ok(0)` is returned. Otherwise behaves exactly
    /// like [`select`](Self::select), returning the number of accepted
    /// files.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`select`](Self::select).
    pub fn drop_files(&mut self, paths: &[PathBuf]) -> Result<usize> {
        self.drag.drop_received();

        let accepted: Vec<PathBuf> = paths
            .iter()
            .filter(|path| intake::is_pdf(path))
            .cloned()
            .collect();

        if accepted.is_empty() {
            return Ok(0);
        }

        self.replace_selection(&accepted)
    }

    /// Record a drag entering the intake surface.
    pub fn drag_enter(&mut self) {
        self.drag.enter();
    }

    /// Record a drag leaving the intake surface.
    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Move the entry at `index` one position towards the front.
    ///
    /// No-op (returning false) at index 0 or out of range. The swap is
    /// purely positional: ids and preview handles are untouched.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.items.len() {
            return false;
        }
        self.items.swap(index, index - 1);
        true
    }

    /// Move the entry at `index` one position towards the back.
    ///
    /// No-op (returning false) at the last index or out of range.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.items.len() {
            return false;
        }
        self.items.swap(index, index + 1);
        true
    }

    /// Merge the pending selection into a single document.
    ///
    /// Requires at least two entries. Reads every file's bytes (joined in
    /// list order), parses each document, copies all pages of each source
    /// in order into a fresh output, serializes it, and publishes the
    /// artifact, available through [`result`](Self::result). The busy state
    /// is exited on both success and failure.
    ///
    /// # Errors
    ///
    /// - [`PdfMeldError::MergeInProgress`] while a merge is in flight; the
    ///   session state is not touched.
    /// - [`PdfMeldError::TooFewDocuments`] below two entries; sets the
    ///   validation error, leaves the result unchanged.
    /// - Any pipeline failure sets the merge error; the selection survives.
    pub async fn merge(&mut self) -> Result<MergeStatistics> {
        if self.merging {
            // The in-flight merge owns the error slot and the result.
            return Err(PdfMeldError::MergeInProgress);
        }

        if self.items.len() < 2 {
            let err = PdfMeldError::TooFewDocuments {
                count: self.items.len(),
            };
            self.error = Some(SessionError::from_error(&err));
            return Err(err);
        }

        self.merging = true;
        self.error = None;
        if let Some(previous) = self.result.take() {
            self.previews.revoke(&previous.handle);
        }

        let outcome = self.run_merge().await;
        self.merging = false;

        match outcome {
            Ok(artifact) => {
                let statistics = artifact.statistics.clone();
                self.result = Some(artifact);
                Ok(statistics)
            }
            Err(err) => {
                self.error = Some(SessionError::from_error(&err));
                Err(err)
            }
        }
    }

    /// Clear the selection, releasing every preview and the result.
    pub fn clear(&mut self) {
        self.release_all();
        self.items.clear();
        self.error = None;
    }

    async fn run_merge(&mut self) -> Result<MergeArtifact> {
        let merge_start = Instant::now();

        let paths: Vec<PathBuf> = self.items.iter().map(|item| item.path.clone()).collect();
        let (loaded, load_stats) = self.reader.read_all(&paths).await?;

        // Page copying is strictly sequential in list order: the output
        // document is a single shared accumulator.
        let mut output = self.engine.create_document();
        for file in &loaded {
            let doc = self.engine.parse_document(&file.bytes, &file.name)?;
            let pages = self.engine.copy_all_pages(&doc, &mut output)?;
            for page in pages {
                self.engine.append_page(&mut output, page)?;
            }
        }

        let total_pages = self.engine.page_count(&output);
        let bytes = self.engine.serialize(&mut output)?;
        let handle = self.previews.publish_bytes(MERGED_FILE_NAME, &bytes)?;

        Ok(MergeArtifact {
            page_count: total_pages,
            statistics: MergeStatistics {
                files_merged: loaded.len(),
                total_pages,
                input_size: load_stats.total_size,
                load_time: load_stats.total_time,
                merge_time: merge_start.elapsed(),
            },
            bytes,
            handle,
        })
    }

    fn replace_selection(&mut self, paths: &[PathBuf]) -> Result<usize> {
        // Build the replacement first so a failure leaves the current
        // selection (and its live previews) intact.
        let mut new_items = Vec::with_capacity(paths.len());
        for path in paths {
            match self.build_item(path) {
                Ok(item) => new_items.push(item),
                Err(err) => {
                    for item in &new_items {
                        self.previews.revoke(&item.preview);
                    }
                    return Err(err);
                }
            }
        }

        self.release_all();
        self.error = None;

        let count = new_items.len();
        self.items = new_items;
        Ok(count)
    }

    fn build_item(&mut self, path: &Path) -> Result<SelectedItem> {
        let name = display_name(path);

        let metadata = std::fs::metadata(path).map_err(|e| {
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

        let preview = self.previews.publish_file(&name, path)?;
        let id = self.next_item_id;
        self.next_item_id += 1;

        Ok(SelectedItem {
            id,
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
            preview,
        })
    }

    fn release_all(&mut self) {
        for item in &self.items {
            self.previews.revoke(&item.preview);
        }
        if let Some(result) = self.result.take() {
            self.previews.revoke(&result.handle);
        }
    }
}

impl Drop for MergeSession {
    fn drop(&mut self) {
        // Walks the current list and result, not a snapshot captured at
        // construction time.
        self.release_all();
    }
}
