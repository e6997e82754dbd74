//! Sort command implementation
//!
//! Copies every file of a directory tree into extension-named folders.

use crate::config::SiftConfig;
use crate::error::{ErrorCode, SiftError};
use crate::organizer::{FileOrganizer, OrganizeOptions, OrganizeOutcome, OrganizeReport};
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

/// Parameters for the sort command
#[derive(Debug, Clone)]
pub struct SortParams {
    pub source_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub show_progress: bool,
}

pub async fn run_sort_command(params: SortParams, settings: SiftConfig) -> Result<()> {
    let options = OrganizeOptions {
        source: params.source_dir,
        output: params.output_dir.unwrap_or(settings.sort.output_dir),
        concurrency: params.jobs.unwrap_or(settings.sort.copy_concurrency),
        show_progress: params.show_progress,
    };
    debug!("Sort options: {:?}", options);

    let organizer = FileOrganizer::new(options)?;
    match organizer.run().await? {
        OrganizeOutcome::SourceMissing(path) => {
            println!("Source directory {} does not exist", path.display());
            Ok(())
        }
        OrganizeOutcome::SourceEmpty(path) => {
            println!("Source directory {} is empty", path.display());
            Ok(())
        }
        OrganizeOutcome::Completed(report) => {
            print!("{}", format_sort_report(&report));
            if report.has_failures() {
                return Err(SiftError::io_with_code(
                    ErrorCode::IO_COPY_FAILED,
                    format!(
                        "{} of {} files could not be copied",
                        report.failures.len(),
                        report.discovered
                    ),
                    None,
                )
                .into());
            }
            Ok(())
        }
    }
}

/// Render the per-file lines and the final count
pub fn format_sort_report(report: &OrganizeReport) -> String {
    let mut out = String::new();
    for record in &report.copied {
        out.push_str(&format!(
            "Copied: {} -> {}\n",
            record.source.display(),
            record.destination.display()
        ));
    }
    for failure in &report.failures {
        out.push_str(&format!(
            "Error copying {}: {}\n",
            failure.source.display(),
            failure.reason
        ));
    }
    out.push_str(&format!("Processed {} files\n", report.discovered));
    out
}
