use super::{ErrorCode, SiftError};
use std::path::{Path, PathBuf};

/// Wraps foreign errors into a coded [`SiftError`], keeping them as the source
pub trait ErrorExt<T> {
    fn to_config_error(self, code: u16, path: &Path, message: &str) -> Result<T, SiftError>;
    fn to_fetch_error(self, code: u16, location: &str, message: String) -> Result<T, SiftError>;
    fn to_io_error(self, code: u16, path: &Path, message: &str) -> Result<T, SiftError>;
    fn to_stage_error(self, code: u16, stage: &str, message: String) -> Result<T, SiftError>;
    fn to_render_error(self, code: u16, message: String) -> Result<T, SiftError>;
    fn to_other_error(self, message: &str) -> Result<T, SiftError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_config_error(self, code: u16, path: &Path, message: &str) -> Result<T, SiftError> {
        self.map_err(|e| {
            SiftError::config_with_code(code, message, Some(path.to_path_buf())).with_source(e)
        })
    }

    fn to_fetch_error(self, code: u16, location: &str, message: String) -> Result<T, SiftError> {
        self.map_err(|e| {
            SiftError::fetch_with_code(code, message, Some(location.to_string())).with_source(e)
        })
    }

    fn to_io_error(self, code: u16, path: &Path, message: &str) -> Result<T, SiftError> {
        self.map_err(|e| {
            SiftError::io_with_code(code, message, Some(path.to_path_buf())).with_source(e)
        })
    }

    fn to_stage_error(self, code: u16, stage: &str, message: String) -> Result<T, SiftError> {
        self.map_err(|e| SiftError::stage_with_code(code, stage, message).with_source(e))
    }

    fn to_render_error(self, code: u16, message: String) -> Result<T, SiftError> {
        self.map_err(|e| SiftError::render_with_code(code, message).with_source(e))
    }

    fn to_other_error(self, message: &str) -> Result<T, SiftError> {
        self.map_err(|e| SiftError::other(message).with_source(e))
    }
}

/// Helper functions for common error scenarios
pub mod common {
    use super::*;

    /// Create a not found error for configuration
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> SiftError {
        SiftError::config_with_code(
            ErrorCode::CONFIG_NOT_FOUND,
            format!("Configuration file not found: {}", path.as_ref().display()),
            Some(path.as_ref().to_path_buf()),
        )
    }

    /// Create an error for a non-2xx HTTP response
    pub fn http_status(location: &str, status: u16) -> SiftError {
        SiftError::fetch_with_code(
            ErrorCode::FETCH_STATUS,
            format!("server responded with status {}", status),
            Some(location.to_string()),
        )
        .with_status(status)
    }

    /// Create a copy failure for a single file
    pub fn copy_failed(source: PathBuf, reason: impl std::fmt::Display) -> SiftError {
        SiftError::io_with_code(
            ErrorCode::IO_COPY_FAILED,
            format!("copy failed: {}", reason),
            Some(source),
        )
    }

    /// Create an out-of-range validation error for a named setting
    pub fn out_of_range(field: &str, message: impl Into<String>) -> SiftError {
        SiftError::validation_with_code(
            ErrorCode::VALIDATION_OUT_OF_RANGE,
            message,
            Some(field.to_string()),
        )
    }
}
