//! Configuration for sift
//!
//! Settings are layered, lowest priority first: built-in defaults, the global
//! `config.toml`, the project `sift.toml` (or an explicit `--config` file),
//! `SIFT_*` environment variables, and finally command-line flags.

use crate::error::{common, ErrorCode, Result, SiftError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub mod loader;

#[cfg(test)]
mod tests;

pub use loader::ConfigLoader;

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "sift.toml";

/// Page counted when `sift words` gets no location
pub const DEFAULT_URL: &str = "https://docs.python.org/3/library/asyncio.html";

/// Path of the global configuration file
pub fn global_config_path() -> Result<PathBuf> {
    ProjectDirs::from("com", "sift", "sift")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or_else(|| {
            SiftError::config_with_code(
                ErrorCode::CONFIG_PATH_ERROR,
                "Could not determine home directory",
                None,
            )
        })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiftConfig {
    pub fetch: FetchSettings,
    pub words: WordSettings,
    pub sort: SortSettings,
}

/// How text is retrieved over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Extra attempts after the first failed request
    pub retries: u32,
    /// Base delay for exponential backoff between attempts
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retries: 2,
            retry_delay_ms: 500,
            user_agent: format!("sift/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSettings {
    pub default_url: String,
    pub top_n: usize,
    /// Size of the map/reduce worker pool; `None` means one per CPU
    pub worker_threads: Option<usize>,
    pub chart_path: PathBuf,
}

impl Default for WordSettings {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_URL.to_string(),
            top_n: 10,
            worker_threads: None,
            chart_path: PathBuf::from("word_frequency.svg"),
        }
    }
}

impl WordSettings {
    pub fn effective_worker_threads(&self) -> usize {
        self.worker_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettings {
    pub output_dir: PathBuf,
    /// Maximum number of copies in flight
    pub copy_concurrency: usize,
}

impl Default for SortSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("sorted_files"),
            copy_concurrency: 16,
        }
    }
}

impl SiftConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_vars_from(|key| std::env::var(key).ok())
    }

    /// Apply `SIFT_*` overrides read through `lookup`
    pub fn merge_env_vars_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SIFT_FETCH_TIMEOUT") {
            self.fetch.timeout = humantime_serde::re::humantime::parse_duration(&value)
                .map_err(|e| invalid_env("SIFT_FETCH_TIMEOUT", &value).with_source(e))?;
        }

        if let Some(value) = lookup("SIFT_FETCH_RETRIES") {
            self.fetch.retries = parse_env("SIFT_FETCH_RETRIES", &value)?;
        }

        if let Some(value) = lookup("SIFT_WORKER_THREADS") {
            self.words.worker_threads = Some(parse_env("SIFT_WORKER_THREADS", &value)?);
        }

        if let Some(value) = lookup("SIFT_TOP_N") {
            self.words.top_n = parse_env("SIFT_TOP_N", &value)?;
        }

        if let Some(value) = lookup("SIFT_CHART_PATH") {
            self.words.chart_path = PathBuf::from(value);
        }

        if let Some(value) = lookup("SIFT_COPY_CONCURRENCY") {
            self.sort.copy_concurrency = parse_env("SIFT_COPY_CONCURRENCY", &value)?;
        }

        Ok(())
    }

    /// Reject settings that would stall or break a run
    pub fn validate(&self) -> Result<()> {
        if self.words.worker_threads == Some(0) {
            return Err(common::out_of_range(
                "words.worker_threads",
                "worker pool needs at least one thread",
            ));
        }

        if self.sort.copy_concurrency == 0 {
            return Err(common::out_of_range(
                "sort.copy_concurrency",
                "at least one copy must be allowed in flight",
            ));
        }

        if self.words.chart_path.as_os_str().is_empty() {
            return Err(SiftError::validation_with_code(
                ErrorCode::VALIDATION_INVALID_INPUT,
                "chart path must not be empty",
                Some("words.chart_path".to_string()),
            ));
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| invalid_env(key, value).with_source(e))
}

fn invalid_env(key: &str, value: &str) -> SiftError {
    SiftError::config_with_code(
        ErrorCode::CONFIG_INVALID_VALUE,
        format!("{} has invalid value '{}'", key, value),
        None,
    )
}
