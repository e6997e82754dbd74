//! Error handling utilities
//!
//! This module provides centralized error handling for the application.

use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// - For `SiftError`: Shows user message always, developer message in verbose mode
/// - For other errors: Shows error message and the cause chain in verbose mode
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    use crate::error::SiftError;

    error!("Fatal error: {}", error);

    let exit_code = if let Some(sift_err) = error.downcast_ref::<SiftError>() {
        eprintln!("Error: {}", sift_err.user_message());

        if verbose >= 1 {
            eprintln!("\nContext Chain:\n{}", sift_err.developer_message());
        }

        sift_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    };

    std::process::exit(exit_code)
}
