use super::{global_config_path, SiftConfig, PROJECT_CONFIG_FILE};
use crate::error::{common, ErrorCode, ErrorExt, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Reads the configuration layers and merges them into one [`SiftConfig`]
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
    project_dir: PathBuf,
    explicit_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_path: global_config_path().ok(),
            project_dir: project_dir.into(),
            explicit_path: None,
        }
    }

    /// Override (or disable, with `None`) the global config location
    pub fn with_global_path(mut self, path: Option<PathBuf>) -> Self {
        self.global_path = path;
        self
    }

    /// Use `path` instead of the project `sift.toml`; it must exist
    pub fn with_explicit_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_path = path;
        self
    }

    pub async fn load(&self) -> Result<SiftConfig> {
        let mut merged = toml::Table::new();

        if let Some(global) = &self.global_path {
            if global.exists() {
                merge_tables(&mut merged, read_table(global).await?);
            }
        }

        match &self.explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(common::config_not_found(path));
                }
                merge_tables(&mut merged, read_table(path).await?);
            }
            None => {
                let project = self.project_dir.join(PROJECT_CONFIG_FILE);
                if project.exists() {
                    merge_tables(&mut merged, read_table(&project).await?);
                }
            }
        }

        let mut config: SiftConfig = toml::Value::Table(merged).try_into()?;
        config.merge_env_vars()?;
        config.validate()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

async fn read_table(path: &Path) -> Result<toml::Table> {
    debug!("Reading configuration from {}", path.display());
    let content = fs::read_to_string(path).await.to_config_error(
        ErrorCode::CONFIG_GENERIC,
        path,
        "Failed to read configuration file",
    )?;

    toml::from_str(&content).to_config_error(
        ErrorCode::CONFIG_INVALID_TOML,
        path,
        "Invalid TOML syntax",
    )
}

/// Deep-merge `overlay` into `base`; nested tables merge key by key
pub fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, incoming);
                    continue;
                }
                base.insert(key, toml::Value::Table(incoming));
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}
