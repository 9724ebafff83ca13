//! pdfmeld - Merge PDF files into a single document.
//!
//! CLI surface over the merge session: expands inputs, filters them the
//! way drop intake filters a dropped batch, merges, and writes the result.

use clap::Parser;
use std::process;

use pdfmeld::cli::Cli;
use pdfmeld::config::{Config, OverwriteMode};
use pdfmeld::error::PdfMeldError;
use pdfmeld::io::ArtifactWriter;
use pdfmeld::output::{self, OutputFormatter};
use pdfmeld::session::MergeSession;
use pdfmeld::utils::format_file_size;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err.user_message());
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfMeldError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfmeld::NAME, pdfmeld::VERSION));
        formatter.blank_line();
    }

    let mut session = MergeSession::with_jobs(config.effective_jobs())?;

    // CLI inputs go through drop-style intake so non-PDF arguments are
    // filtered exactly like a dropped batch.
    let accepted = session.drop_files(&config.inputs)?;
    let ignored = config.inputs.len() - accepted;
    if ignored > 0 {
        formatter.warning(&format!("Ignored {ignored} non-PDF input(s)"));
    }
    if accepted == 0 {
        return Err(PdfMeldError::TooFewDocuments { count: 0 });
    }

    output::display_selection(&formatter, &session);

    if config.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    handle_output_overwrite(&config, &formatter).await?;

    formatter.blank_line();
    formatter.info("Merging documents...");

    let stats = match session.merge().await {
        Ok(stats) => stats,
        Err(err) => {
            // The single-line message reaches the user via main; the
            // underlying cause only surfaces in verbose diagnostics.
            if let Some(session_err) = session.error() {
                formatter.debug(&format!("Cause: {}", session_err.detail));
            }
            return Err(err);
        }
    };

    let artifact = session
        .result()
        .ok_or_else(|| PdfMeldError::merge_failed("merge produced no artifact"))?;

    let writer = ArtifactWriter::new();
    writer.can_write(&config.output).await?;
    let write_stats = writer.save(artifact.bytes(), &config.output).await?;

    formatter.blank_line();
    formatter.success(&format!(
        "Successfully created {} ({})",
        config.output.display(),
        format_file_size(write_stats.file_size)
    ));

    if formatter.is_verbose() {
        formatter.blank_line();
        formatter.section("Statistics");
        formatter.detail("Input files", &stats.files_merged.to_string());
        formatter.detail("Total pages", &stats.total_pages.to_string());
        formatter.detail("Input size", &stats.format_input_size());
        formatter.detail("Output size", &format_file_size(write_stats.file_size));
        formatter.detail(
            "Load time",
            &format!("{:.2}s", stats.load_time.as_secs_f64()),
        );
        formatter.detail(
            "Merge time",
            &format!("{:.2}s", stats.merge_time.as_secs_f64()),
        );
        formatter.detail(
            "Write time",
            &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
        );
        formatter.detail(
            "Preview dir",
            &session.preview_dir().display().to_string(),
        );
    }

    if config.json {
        let summary = serde_json::json!({
            "output": config.output,
            "statistics": stats,
            "write": write_stats,
        });
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| PdfMeldError::other(e.to_string()))?;
        println!("{rendered}");
    }

    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfMeldError> {
    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfMeldError::OutputExists {
            path: config.output.clone(),
        }),
        OverwriteMode::Prompt => {
            // In quiet mode there is nobody to ask; treat as no-clobber
            if formatter.is_quiet() {
                return Err(PdfMeldError::OutputExists {
                    path: config.output.clone(),
                });
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfMeldError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfMeldError::Cancelled)
            }
        }
    }
}
