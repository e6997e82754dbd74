//! CLI argument structures
//!
//! This module defines all command-line interface structures used by sift.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sort files by extension and count the words of a web page
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "sift - Sort files by extension and chart word frequencies", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (defaults to ./sift.toml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy files into subfolders named after their extension
    #[command(name = "sort")]
    Sort {
        /// Directory to read files from (searched recursively)
        source_dir: PathBuf,

        /// Directory to copy into (default: sorted_files)
        output_dir: Option<PathBuf>,

        /// Maximum number of files copied at once
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Do not draw a progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Count word frequencies of a web page or text file
    #[command(name = "words")]
    Words {
        /// URL or local file to read (default: the asyncio documentation page)
        location: Option<String>,

        /// Number of most frequent words to show
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Where to write the bar chart (default: word_frequency.svg)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Skip writing the bar chart
        #[arg(long)]
        no_chart: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Worker threads for the map and reduce stages
        #[arg(long)]
        threads: Option<usize>,
    },
}
