//! Error types for pdfmeld.
//!
//! All failures funnel into [`PdfMeldError`]. Internally the variants stay
//! specific (file access, parse, preview store, write, ...) so diagnostics
//! keep their context; towards the user every error collapses into one of
//! two kinds, [`ErrorKind::Validation`] and [`ErrorKind::Merge`], each with
//! a single-line message. The full detail is only ever logged, never shown.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfmeld operations.
pub type Result<T> = std::result::Result<T, PdfMeldError>;

/// User-visible classification of an error.
///
/// The session surfaces exactly two kinds of failure; everything more
/// specific is diagnostic detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The selection does not satisfy the preconditions for merging.
    Validation,
    /// The load/parse/copy/serialize pipeline failed.
    Merge,
}

/// Main error type for pdfmeld operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfMeldError {
    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file exists but cannot be read.
    #[error("Cannot access file: {}", .path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Path points at something that is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// The bytes of an input could not be parsed as a PDF document.
    #[error("Failed to parse PDF '{name}': {reason}")]
    ParseFailed {
        /// Display name of the input.
        name: String,
        /// Reason reported by the engine.
        reason: String,
    },

    /// The input is an encrypted PDF and cannot be processed.
    #[error("PDF '{name}' is encrypted and cannot be merged")]
    EncryptedDocument {
        /// Display name of the input.
        name: String,
    },

    /// Fewer than two documents were selected at merge time.
    #[error("Need at least 2 PDF files to merge, got {count}")]
    TooFewDocuments {
        /// Number of documents currently selected.
        count: usize,
    },

    /// A merge was invoked while another merge is still in flight.
    #[error("A merge is already in progress")]
    MergeInProgress,

    /// The page-copy or serialization step failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// A preview file could not be materialized or the store is unusable.
    #[error("Failed to create preview for '{name}': {source}")]
    PreviewFailed {
        /// Display name of the input being previewed.
        name: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error("Output file already exists: {}", .path.display())]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to write the merged document.
    #[error("Failed to write output: {}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfMeldError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfMeldError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfMeldError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a ParseFailed error.
    pub fn parse_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error for user-facing display.
    ///
    /// Precondition failures (too few documents, busy session) are
    /// validation errors; everything that can surface from the merge
    /// pipeline itself is a merge error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooFewDocuments { .. } | Self::MergeInProgress => ErrorKind::Validation,
            _ => ErrorKind::Merge,
        }
    }

    /// Single-line message suitable for direct display.
    ///
    /// Deliberately coarse for pipeline failures: the user sees that the
    /// merge failed and what to do about it, not the underlying cause.
    /// Intake and output errors name the offending path, never the source
    /// error.
    pub fn user_message(&self) -> String {
        match self {
            Self::TooFewDocuments { .. } => "Select at least two PDF files to merge.".to_string(),
            Self::MergeInProgress => "A merge is already in progress.".to_string(),
            Self::FileNotFound { path } => format!("File not found: {}", path.display()),
            Self::NotAFile { path } => format!("Not a file: {}", path.display()),
            Self::FileNotAccessible { path, .. } => {
                format!("Cannot access file: {}", path.display())
            }
            Self::OutputExists { path } => format!(
                "Output file already exists: {} (use --force to overwrite)",
                path.display()
            ),
            Self::FailedToWrite { path, .. } => {
                format!("Failed to write output: {}", path.display())
            }
            Self::Cancelled => "Operation cancelled.".to_string(),
            Self::Other { message } => message.clone(),
            // The merge pipeline proper: parse, encryption, page copy,
            // serialization, preview publication, raw I/O.
            _ => "Failed to merge the PDFs. Check the selected files and try again.".to_string(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } | Self::FileNotAccessible { .. } | Self::NotAFile { .. } => 2,
            Self::ParseFailed { .. } | Self::EncryptedDocument { .. } => 3,
            Self::TooFewDocuments { .. } | Self::MergeInProgress => 1,
            Self::OutputExists { .. } => 4,
            Self::PreviewFailed { .. } | Self::FailedToWrite { .. } | Self::Io(_) => 5,
            Self::MergeFailed { .. } => 6,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Other { .. } => 1,
        }
    }
}
