use std::path::PathBuf;
use thiserror::Error;

pub mod codes;
pub mod helpers;


pub use codes::{describe_error_code, ErrorCode};
pub use helpers::{common, ErrorExt};

/// The unified error type for the sift library
#[derive(Error, Debug)]
pub enum SiftError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Fetch failed: {message}")]
    Fetch {
        code: u16,
        message: String,
        location: Option<String>,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Filesystem error: {message}")]
    Io {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] No words found: {message}")]
    EmptyInput { code: u16, message: String },

    #[error("[E{code:04}] Pipeline stage '{stage}' failed: {message}")]
    Stage {
        code: u16,
        message: String,
        stage: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Chart rendering failed: {message}")]
    Render {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        field: Option<String>,
    },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SiftError {
    /// Create a configuration error with specific code and file path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a fetch error with specific code and location
    pub fn fetch_with_code(
        code: u16,
        message: impl Into<String>,
        location: Option<String>,
    ) -> Self {
        Self::Fetch {
            code,
            message: message.into(),
            location,
            status: None,
            source: None,
        }
    }

    /// Create a filesystem error with specific code and path
    pub fn io_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Io {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            code: ErrorCode::STAGE_EMPTY_INPUT,
            message: message.into(),
        }
    }

    /// Create a stage error; these signal a broken pipeline invariant
    pub fn stage_with_code(
        code: u16,
        stage: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Stage {
            code,
            message: message.into(),
            stage: stage.into(),
            source: None,
        }
    }

    pub fn render_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Render {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error with specific code and field
    pub fn validation_with_code(
        code: u16,
        message: impl Into<String>,
        field: Option<String>,
    ) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            field,
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    ///
    /// Variants without a source slot are returned unchanged.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Fetch { source: src, .. }
            | Self::Io { source: src, .. }
            | Self::Stage { source: src, .. }
            | Self::Render { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::EmptyInput { .. } | Self::Validation { .. } => {}
        }
        self
    }

    /// Attach the HTTP status that caused a fetch error
    pub fn with_status(mut self, status: u16) -> Self {
        if let Self::Fetch {
            status: ref mut s, ..
        } = self
        {
            *s = Some(status);
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Fetch { .. } => 3,
            Self::Io { .. } => 4,
            Self::EmptyInput { .. } => 7,
            Self::Stage { .. } => 5,
            Self::Render { .. } => 6,
            Self::Validation { .. } => 8,
            Self::Other { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Fetch { code, .. }
            | Self::Io { code, .. }
            | Self::EmptyInput { code, .. }
            | Self::Stage { code, .. }
            | Self::Render { code, .. }
            | Self::Validation { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => match path {
                Some(p) => format!("Configuration problem in {}: {}", p.display(), message),
                None => format!("Configuration problem: {}", message),
            },
            Self::Fetch {
                message,
                location,
                status,
                ..
            } => {
                let mut msg = String::from("Could not fetch text");
                if let Some(loc) = location {
                    msg.push_str(&format!(" from {}", loc));
                }
                if let Some(s) = status {
                    msg.push_str(&format!(" (HTTP {})", s));
                }
                format!("{}: {}", msg, message)
            }
            Self::Io { message, path, .. } => match path {
                Some(p) => format!("Filesystem error at {}: {}", p.display(), message),
                None => format!("Filesystem error: {}", message),
            },
            Self::EmptyInput { message, .. } => format!("No words found: {}", message),
            Self::Stage { message, stage, .. } => {
                format!("Internal error in {} stage: {}", stage, message)
            }
            Self::Render { message, .. } => format!("Could not draw chart: {}", message),
            Self::Validation { message, field, .. } => match field {
                Some(f) => format!("Validation error for '{}': {}", f, message),
                None => format!("Validation error: {}", message),
            },
            Self::Other { message, .. } => message.clone(),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let code = self.code();
        let mut msg = format!("{}\n  code E{:04}: {}", self, code, describe_error_code(code));
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            msg.push_str(&format!("\n  caused by: {}", cause));
            current = cause.source();
        }
        msg
    }

    /// Whether repeating the operation may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch { code, status, .. } => match status {
                Some(s) => *s == 429 || *s >= 500,
                None => *code == ErrorCode::FETCH_TRANSPORT || *code == ErrorCode::FETCH_TIMEOUT,
            },
            _ => false,
        }
    }
}

/// Type alias for Results using SiftError
pub type Result<T> = std::result::Result<T, SiftError>;

impl From<std::io::Error> for SiftError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::IO_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => (ErrorCode::IO_PERMISSION_DENIED, "Permission denied"),
            ErrorKind::AlreadyExists => (ErrorCode::IO_ALREADY_EXISTS, "Already exists"),
            _ => (ErrorCode::IO_GENERIC, "IO operation failed"),
        };

        SiftError::io_with_code(code, message, None).with_source(err)
    }
}

impl From<reqwest::Error> for SiftError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::FETCH_TIMEOUT
        } else if err.is_status() {
            ErrorCode::FETCH_STATUS
        } else if err.is_body() || err.is_decode() {
            ErrorCode::FETCH_BODY
        } else if err.is_builder() {
            ErrorCode::FETCH_CLIENT_BUILD
        } else {
            ErrorCode::FETCH_TRANSPORT
        };
        let location = err.url().map(|u| u.to_string());
        let status = err.status().map(|s| s.as_u16());

        let mut error = SiftError::fetch_with_code(code, "HTTP request failed", location);
        if let Some(s) = status {
            error = error.with_status(s);
        }
        error.with_source(err)
    }
}

impl From<toml::de::Error> for SiftError {
    fn from(err: toml::de::Error) -> Self {
        SiftError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax", None)
            .with_source(err)
    }
}

impl From<tera::Error> for SiftError {
    fn from(err: tera::Error) -> Self {
        SiftError::render_with_code(ErrorCode::RENDER_TEMPLATE, "Chart template failed")
            .with_source(err)
    }
}
