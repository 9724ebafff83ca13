//! CLI argument parsing for pdfmeld.
//!
//! Defines the command-line interface structure using `clap`: argument
//! parsing, validation, and help text generation.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmeld::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = cli.to_config().expect("Invalid configuration");
//! println!("Merging {} files", config.inputs.len());
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, OverwriteMode};
use crate::error::Result;
use crate::utils;

/// Merge PDF files into a single document, entirely on your machine.
///
/// pdfmeld gathers the given PDFs, previews them in a session directory,
/// and concatenates their pages in the order supplied. Non-PDF inputs are
/// filtered out the way a drop onto the tool would filter them.
#[derive(Parser, Debug)]
#[command(name = "pdfmeld")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to merge (in order)
    ///
    /// Files, directories, or glob patterns. Directories expand
    /// recursively to the PDFs inside them; files are merged in the
    /// order provided.
    ///
    /// Examples:
    ///   pdfmeld file1.pdf file2.pdf -o combined.pdf
    ///   pdfmeld chapters/ -o book.pdf
    ///   pdfmeld 'scan-*.pdf'
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// The merged PDF will be written to this location.
    /// Use --force to overwrite existing files without confirmation.
    #[arg(short, long, value_name = "FILE", default_value = "merged.pdf")]
    pub output: PathBuf,

    /// Dry run - show the pending selection without merging
    ///
    /// Expands and filters the inputs, displays the files that would be
    /// merged and in which order, then stops.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show timing, sizes, and failure diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    ///
    /// If the output file already exists, exit with an error instead of
    /// prompting or overwriting.
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Number of concurrent file reads
    ///
    /// Default is the number of CPU cores. Use 1 for sequential reads.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Emit a machine-readable JSON summary on success
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated [`Config`].
    ///
    /// Expands directory and glob inputs, resolves the overwrite mode,
    /// and validates the resulting configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if input expansion fails or the configuration is
    /// inconsistent.
    pub fn to_config(&self) -> Result<Config> {
        let inputs = utils::expand_inputs(&self.inputs)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            inputs,
            output: self.output.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
            jobs: self.jobs,
            json: self.json,
        };

        config.validate()?;
        Ok(config)
    }
}
