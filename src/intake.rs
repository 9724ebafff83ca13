//! File intake: content-type filtering and drag-state tracking.
//!
//! Two intake paths feed the session: an explicit pick, which accepts the
//! batch as given, and a drop, which first filters the batch down to files
//! whose declared content type is `application/pdf`. The declared type is
//! derived from the file extension alone; the file is never sniffed here.

use std::path::Path;

/// Content type accepted by drop intake.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Declared content type of a path, derived from its extension.
///
/// Returns `None` for unknown extensions. Matching is case-insensitive,
/// so `report.PDF` is still a PDF.
pub fn declared_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some(PDF_CONTENT_TYPE),
        _ => None,
    }
}

/// Check whether a path declares itself as a PDF.
pub fn is_pdf(path: &Path) -> bool {
    declared_content_type(path) == Some(PDF_CONTENT_TYPE)
}

/// Tracks nested drag-enter/leave pairs to derive a stable "drag active"
/// state.
///
/// Enter/leave events fire once per nested element the cursor crosses, so a
/// plain boolean flickers. The counter increments on enter, decrements on
/// leave with a floor of zero, and is force-reset on drop.
#[derive(Debug, Default)]
pub struct DragTracker {
    depth: u32,
}

impl DragTracker {
    /// Create a tracker with no drag in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a drag entering a tracked region.
    pub fn enter(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    /// Record a drag leaving a tracked region.
    ///
    /// Never goes below zero, even on unbalanced leave events.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Record a drop: drag state ends unconditionally.
    pub fn drop_received(&mut self) {
        self.depth = 0;
    }

    /// Whether a drag is currently over the tracked region.
    pub fn is_active(&self) -> bool {
        self.depth > 0
    }
}
