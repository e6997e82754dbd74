//! Command implementation modules
//!
//! Each command is implemented as a separate module.

pub mod sort;
pub mod words;

// Re-export command execution functions
pub use sort::{run_sort_command, SortParams};
pub use words::{run_words_command, WordsParams};
