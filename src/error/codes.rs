/// Error code registry for sift
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Fetch errors
/// - 3000-3999: Filesystem errors
/// - 4000-4999: Pipeline stage errors
/// - 5000-5999: Chart rendering errors
/// - 7000-7999: Validation errors
/// - 9000-9999: Other errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_PATH_ERROR: u16 = 1006;

    // Fetch errors (2000-2999)
    pub const FETCH_GENERIC: u16 = 2000;
    pub const FETCH_TRANSPORT: u16 = 2001;
    pub const FETCH_STATUS: u16 = 2002;
    pub const FETCH_TIMEOUT: u16 = 2003;
    pub const FETCH_BODY: u16 = 2004;
    pub const FETCH_CLIENT_BUILD: u16 = 2005;
    pub const FETCH_LOCAL_FILE: u16 = 2006;

    // Filesystem errors (3000-3999)
    pub const IO_GENERIC: u16 = 3000;
    pub const IO_NOT_FOUND: u16 = 3001;
    pub const IO_PERMISSION_DENIED: u16 = 3002;
    pub const IO_ALREADY_EXISTS: u16 = 3003;
    pub const IO_WALK_FAILED: u16 = 3004;
    pub const IO_COPY_FAILED: u16 = 3005;

    // Pipeline stage errors (4000-4999)
    pub const STAGE_GENERIC: u16 = 4000;
    pub const STAGE_DUPLICATE_KEY: u16 = 4001;
    pub const STAGE_POOL_BUILD: u16 = 4002;
    pub const STAGE_JOIN_FAILED: u16 = 4003;
    pub const STAGE_EMPTY_INPUT: u16 = 4010;

    // Chart rendering errors (5000-5999)
    pub const RENDER_GENERIC: u16 = 5000;
    pub const RENDER_TEMPLATE: u16 = 5001;
    pub const RENDER_WRITE: u16 = 5002;

    // Validation errors (7000-7999)
    pub const VALIDATION_GENERIC: u16 = 7000;
    pub const VALIDATION_INVALID_INPUT: u16 = 7001;
    pub const VALIDATION_OUT_OF_RANGE: u16 = 7002;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "Generic configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_INVALID_TOML => "Invalid TOML syntax in configuration",
        ErrorCode::CONFIG_INVALID_VALUE => "Invalid configuration value",
        ErrorCode::CONFIG_PATH_ERROR => "Configuration path could not be resolved",

        ErrorCode::FETCH_GENERIC => "Generic fetch error",
        ErrorCode::FETCH_TRANSPORT => "Network transport failure",
        ErrorCode::FETCH_STATUS => "Server returned a non-success status",
        ErrorCode::FETCH_TIMEOUT => "Request timed out",
        ErrorCode::FETCH_BODY => "Response body could not be read",
        ErrorCode::FETCH_CLIENT_BUILD => "HTTP client could not be created",
        ErrorCode::FETCH_LOCAL_FILE => "Local text file could not be read",

        ErrorCode::IO_GENERIC => "Generic filesystem error",
        ErrorCode::IO_NOT_FOUND => "File or directory not found",
        ErrorCode::IO_PERMISSION_DENIED => "Permission denied",
        ErrorCode::IO_ALREADY_EXISTS => "File or directory already exists",
        ErrorCode::IO_WALK_FAILED => "Directory traversal failed",
        ErrorCode::IO_COPY_FAILED => "File copy failed",

        ErrorCode::STAGE_GENERIC => "Pipeline stage failed",
        ErrorCode::STAGE_DUPLICATE_KEY => "Reduce produced a duplicate word",
        ErrorCode::STAGE_POOL_BUILD => "Worker pool could not be created",
        ErrorCode::STAGE_JOIN_FAILED => "Worker task did not complete",
        ErrorCode::STAGE_EMPTY_INPUT => "Input text contains no words",

        ErrorCode::RENDER_GENERIC => "Chart rendering failed",
        ErrorCode::RENDER_TEMPLATE => "Chart template error",
        ErrorCode::RENDER_WRITE => "Chart file could not be written",

        ErrorCode::VALIDATION_GENERIC => "Validation failed",
        ErrorCode::VALIDATION_INVALID_INPUT => "Invalid input",
        ErrorCode::VALIDATION_OUT_OF_RANGE => "Value out of range",

        ErrorCode::OTHER_GENERIC => "Unknown error",
        _ => "Unrecognized error code",
    }
}
