//! Pure extension-bucket logic for the file organizer

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Bucket name for files without an extension
pub const NO_EXTENSION_BUCKET: &str = "no_extension";

/// A file scheduled for copying and where it goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Lowercased extension of `path`, or [`NO_EXTENSION_BUCKET`]
///
/// Only the last extension counts, so `archive.tar.gz` lands in `gz`.
/// Dotfiles like `.bashrc` have no extension.
pub fn bucket_for(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| NO_EXTENSION_BUCKET.to_string())
}

/// Destination `output_root/<bucket>/<file name>` for `source`
///
/// Returns `None` for paths without a file name (`/`, `..`).
pub fn destination_for(source: &Path, output_root: &Path) -> Option<PathBuf> {
    let name = source.file_name()?;
    Some(output_root.join(bucket_for(source)).join(name))
}

/// Pair `source` with its destination
pub fn classify(source: PathBuf, output_root: &Path) -> Option<FileRecord> {
    let destination = destination_for(&source, output_root)?;
    Some(FileRecord {
        source,
        destination,
    })
}

/// Count records per bucket, sorted by bucket name
pub fn bucket_summary(records: &[FileRecord], output_root: &Path) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let bucket = record
            .destination
            .strip_prefix(output_root)
            .ok()
            .and_then(|rel| rel.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .unwrap_or_else(|| NO_EXTENSION_BUCKET.to_string());
        *counts.entry(bucket).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}
