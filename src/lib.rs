//! # sift
//!
//! Two small command-line utilities sharing one binary.
//!
//! ## Usage
//!
//! ```bash
//! sift sort <source_dir> [output_dir] [-j jobs]
//! sift words [url-or-file] [-n top] [-o chart.svg] [--json]
//! ```
//!
//! ## Modules
//!
//! - `analyzer` - Word frequency pipeline: fetch, count on a worker pool, chart
//! - `app` - Logging, configuration access and fatal error handling
//! - `chart` - SVG bar chart rendering for the top-N words
//! - `cli` - Argument parsing and command implementations
//! - `config` - Layered configuration (defaults, files, environment)
//! - `core` - Pure tokenize/map/shuffle/reduce and extension classification
//! - `error` - Unified error type with codes and exit statuses
//! - `fetch` - HTTP and local-file text sources
//! - `organizer` - Concurrent copy of files into extension folders
pub mod analyzer;
pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod organizer;
