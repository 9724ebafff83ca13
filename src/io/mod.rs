//! File reading and artifact writing.
//!
//! The reader loads the raw bytes of selected files, concurrently when the
//! batch is large enough to benefit; parsing happens elsewhere, behind the
//! engine seam. The writer publishes the merged byte buffer to its final
//! path atomically.

pub mod reader;
pub mod writer;

pub use reader::{FileReader, LoadStatistics, LoadedFile};
pub use writer::{ArtifactWriter, WriteStatistics};
