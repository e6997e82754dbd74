//! Common test utilities and helpers

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// `sift` command running in `dir` with no user configuration leaking in
pub fn sift_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sift").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("SIFT_FETCH_TIMEOUT")
        .env_remove("SIFT_FETCH_RETRIES")
        .env_remove("SIFT_WORKER_THREADS")
        .env_remove("SIFT_TOP_N")
        .env_remove("SIFT_CHART_PATH")
        .env_remove("SIFT_COPY_CONCURRENCY");
    cmd
}

/// Create `files` (relative path, contents) under `root`
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}
