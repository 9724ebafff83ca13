//! Path expansion and small shared helpers.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PdfMeldError, Result};
use crate::intake;

/// Final path component as a display name.
///
/// Falls back to the full path text when there is no file name (e.g. `..`).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

/// Expand CLI input arguments into concrete file paths.
///
/// Each argument is handled by shape:
/// - an existing directory expands recursively to the PDF files inside it,
///   in lexical order;
/// - an argument containing glob metacharacters expands through `glob`;
/// - anything else passes through as a literal path.
///
/// Expansion never filters literal paths; rejecting non-PDF files is the
/// intake layer's job.
///
/// # Errors
///
/// Propagates glob parse errors and filesystem errors from traversal.
pub fn expand_inputs<T>(args: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved = Vec::new();

    for arg in args {
        let arg = arg.as_ref();
        let path = Path::new(arg);

        if path.is_dir() {
            resolved.extend(collect_pdfs_in_dir(path)?);
        } else if arg.contains(['*', '?', '[']) {
            resolved.extend(collect_paths_for_pattern(arg)?);
        } else {
            resolved.push(path.to_path_buf());
        }
    }

    Ok(resolved)
}

/// Recursively collect the PDF files under a directory, sorted by path.
fn collect_pdfs_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|err| PdfMeldError::Other {
            message: err.to_string(),
        })?;
        if entry.file_type().is_file() && intake::is_pdf(entry.path()) {
            paths.push(entry.path().to_path_buf());
        }
    }

    Ok(paths)
}

/// Expand a single glob pattern into filesystem paths.
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| PdfMeldError::Other {
        message: err.to_string(),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| PdfMeldError::Other {
            message: err.to_string(),
        })?;
        resolved.push(path);
    }

    Ok(resolved)
}
