//! pdfmeld - Gather, reorder, and merge PDF files into a single document.
//!
//! Everything happens on the local machine: files are selected, previewed,
//! reordered, and concatenated without touching the network. The crate is
//! built around a stateful [`session::MergeSession`] that owns the pending
//! selection, the preview files backing it, and the merged artifact. The
//! heavy lifting (parsing, cross-document page copying, serialization) is
//! delegated to `lopdf` behind the [`engine::PdfEngine`] seam.
//!
//! # Examples
//!
//! ## Merging a selection
//!
//! ```no_run
//! use pdfmeld::session::MergeSession;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = MergeSession::new()?;
//! session.select(&[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")])?;
//! session.move_up(1); // b.pdf first
//!
//! let stats = session.merge().await?;
//! println!("Merged into {} pages", stats.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using individual components
//!
//! ```no_run
//! use pdfmeld::engine::{LopdfEngine, PdfEngine};
//! use pdfmeld::io::FileReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = FileReader::new();
//! let loaded = reader.read(Path::new("input.pdf")).await?;
//!
//! let engine = LopdfEngine::new();
//! let doc = engine.parse_document(&loaded.bytes, &loaded.name)?;
//! println!("PDF has {} pages", engine.page_count(&doc));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod intake;
pub mod io;
pub mod output;
pub mod preview;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use error::{PdfMeldError, Result};
pub use session::MergeSession;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
