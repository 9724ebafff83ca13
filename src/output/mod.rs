//! User-facing output for the pdfmeld CLI.
//!
//! All console output flows through [`OutputFormatter`]: status messages,
//! warnings, the single-line user errors, and verbose diagnostics.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::session::MergeSession;
use crate::utils::format_file_size;

/// Display the pending selection to the user.
pub fn display_selection(formatter: &OutputFormatter, session: &MergeSession) {
    formatter.info(&format!("Selected {} file(s):", session.items().len()));
    for (index, item) in session.items().iter().enumerate() {
        formatter.info(&format!(
            "  {}. {} ({})",
            index + 1,
            item.name(),
            format_file_size(item.size())
        ));
    }
}
