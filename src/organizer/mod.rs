//! Extension-based file organizer
//!
//! Walks a source tree, assigns every file to an extension bucket and copies
//! it into `output/<bucket>/`. Copies run concurrently behind a semaphore;
//! a failed copy is recorded and never cancels the others.

use crate::core::classify::{bucket_summary, classify, FileRecord};
use crate::error::{common, ErrorCode, ErrorExt, Result, SiftError};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Maximum number of copies in flight
    pub concurrency: usize,
    pub show_progress: bool,
}

/// A copy that did not complete
#[derive(Debug, Clone, Serialize)]
pub struct CopyFailure {
    pub source: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizeReport {
    pub discovered: usize,
    pub copied: Vec<FileRecord>,
    pub failures: Vec<CopyFailure>,
    /// Files per bucket, sorted by bucket name
    pub buckets: Vec<(String, usize)>,
}

impl OrganizeReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug)]
pub enum OrganizeOutcome {
    SourceMissing(PathBuf),
    SourceEmpty(PathBuf),
    Completed(OrganizeReport),
}

pub struct FileOrganizer {
    options: OrganizeOptions,
}

impl FileOrganizer {
    pub fn new(options: OrganizeOptions) -> Result<Self> {
        if options.concurrency == 0 {
            return Err(common::out_of_range(
                "concurrency",
                "at least one copy must be allowed in flight",
            ));
        }
        Ok(Self { options })
    }

    pub async fn run(&self) -> Result<OrganizeOutcome> {
        let source = &self.options.source;
        if !source.is_dir() {
            return Ok(OrganizeOutcome::SourceMissing(source.clone()));
        }

        let mut entries = tokio::fs::read_dir(source).await?;
        if entries.next_entry().await?.is_none() {
            return Ok(OrganizeOutcome::SourceEmpty(source.clone()));
        }

        tokio::fs::create_dir_all(&self.options.output)
            .await
            .to_io_error(
                ErrorCode::IO_GENERIC,
                &self.options.output,
                "cannot create output directory",
            )?;

        let source_root = tokio::fs::canonicalize(source).await?;
        let output_root = tokio::fs::canonicalize(&self.options.output).await?;
        if source_root.starts_with(&output_root) {
            return Err(SiftError::validation_with_code(
                ErrorCode::VALIDATION_INVALID_INPUT,
                format!(
                    "output directory {} contains the source directory",
                    self.options.output.display()
                ),
                Some("output_dir".to_string()),
            ));
        }

        let walk_root = source_root.clone();
        let skip_root = output_root.clone();
        let files = tokio::task::spawn_blocking(move || collect_files(&walk_root, &skip_root))
            .await
            .to_io_error(
                ErrorCode::IO_WALK_FAILED,
                &source_root,
                "directory walk did not complete",
            )?;

        let records: Vec<FileRecord> = files
            .into_iter()
            .filter_map(|path| classify(path, &output_root))
            .collect();
        info!(
            "Found {} files under {}",
            records.len(),
            source_root.display()
        );

        let report = self.copy_all(records, &output_root).await;
        Ok(OrganizeOutcome::Completed(report))
    }

    async fn copy_all(&self, records: Vec<FileRecord>, output_root: &Path) -> OrganizeReport {
        let discovered = records.len();
        let buckets = bucket_summary(&records, output_root);

        let progress = if self.options.show_progress {
            create_progress_bar(discovered)
        } else {
            ProgressBar::hidden()
        };
        progress.set_message("Copying files");

        let semaphore = Arc::new(Semaphore::new(self.options.concurrency));
        debug!("Copying with concurrency {}", self.options.concurrency);

        let futures = records.into_iter().map(|record| {
            let semaphore = Arc::clone(&semaphore);
            let progress = progress.clone();
            async move {
                // The semaphore is never closed, so acquire only fails if it were.
                let _permit = semaphore.acquire_owned().await.ok();
                let result = copy_file(&record).await;
                progress.inc(1);
                (record, result)
            }
        });

        let mut report = OrganizeReport {
            discovered,
            buckets,
            ..OrganizeReport::default()
        };

        for (record, result) in join_all(futures).await {
            match result {
                Ok(bytes) => {
                    debug!(
                        "Copied {} ({} bytes) -> {}",
                        record.source.display(),
                        bytes,
                        record.destination.display()
                    );
                    report.copied.push(record);
                }
                Err(e) => {
                    error!("Error copying {}: {}", record.source.display(), e);
                    report.failures.push(CopyFailure {
                        source: record.source,
                        reason: e.user_message(),
                    });
                }
            }
        }

        progress.finish_and_clear();
        report
    }
}

/// Every regular file under `root`, skipping anything inside `skip`
///
/// Symlinks to files are included and resolve to their target when copied.
/// Symlinked directories are not descended into.
pub fn collect_files(root: &Path, skip: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !entry.path().starts_with(skip))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| {
            if entry.file_type().is_file() {
                return true;
            }
            let linked_file = entry.path_is_symlink() && entry.path().is_file();
            if entry.path_is_symlink() && !linked_file {
                debug!("Skipping symlink {}", entry.path().display());
            }
            linked_file
        })
        .map(|entry| entry.into_path())
        .collect()
}

async fn copy_file(record: &FileRecord) -> Result<u64> {
    if let Some(parent) = record.destination.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| common::copy_failed(record.source.clone(), e))?;
    }

    tokio::fs::copy(&record.source, &record.destination)
        .await
        .map_err(|e| common::copy_failed(record.source.clone(), e))
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    pb.set_style(style);
    pb
}
