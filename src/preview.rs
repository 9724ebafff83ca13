//! Session-scoped preview store.
//!
//! Every selected file gets a locally renderable copy in a temporary
//! directory owned by the store, addressed by a revocable [`PreviewHandle`].
//! The store hands out handles; the session decides when to revoke them.
//! Revoking deletes the backing file, and dropping the store removes the
//! whole directory, so a handle never outlives the session that created it.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{PdfMeldError, Result};

/// A revocable reference to a locally renderable copy of a file.
///
/// The handle stays valid until the owning store revokes it or is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    id: u64,
    path: PathBuf,
}

impl PreviewHandle {
    /// Unique id of this handle within its store.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file still exists.
    pub fn is_live(&self) -> bool {
        self.path.exists()
    }
}

/// Store materializing preview files in a session-scoped temp directory.
pub struct PreviewStore {
    root: TempDir,
    next_id: u64,
}

impl PreviewStore {
    /// Create a store backed by a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let root = TempDir::with_prefix("pdfmeld-")?;
        Ok(Self { root, next_id: 0 })
    }

    /// Directory all previews live under.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Materialize a preview by copying an existing file into the store.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMeldError::PreviewFailed`] if the copy fails.
    pub fn publish_file(&mut self, name: &str, source: &Path) -> Result<PreviewHandle> {
        let handle = self.next_handle(name);
        fs::copy(source, &handle.path).map_err(|e| PdfMeldError::PreviewFailed {
            name: name.to_string(),
            source: e,
        })?;
        Ok(handle)
    }

    /// Materialize a preview from an in-memory byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMeldError::PreviewFailed`] if the write fails.
    pub fn publish_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<PreviewHandle> {
        let handle = self.next_handle(name);
        fs::write(&handle.path, bytes).map_err(|e| PdfMeldError::PreviewFailed {
            name: name.to_string(),
            source: e,
        })?;
        Ok(handle)
    }

    /// Revoke a handle, deleting its backing file.
    ///
    /// Idempotent: revoking an already-revoked handle is a no-op.
    pub fn revoke(&self, handle: &PreviewHandle) {
        // Removal failure means the file is already gone or the directory
        // is being torn down; either way the handle is dead.
        let _ = fs::remove_file(&handle.path);
    }

    fn next_handle(&mut self, name: &str) -> PreviewHandle {
        let id = self.next_id;
        self.next_id += 1;
        let file_name = format!("{id:04}-{}", sanitize_file_name(name));
        PreviewHandle {
            id,
            path: self.root.path().join(file_name),
        }
    }
}

/// Strip path separators and other hostile characters from a display name
/// so it can be used as a file name inside the store.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}
