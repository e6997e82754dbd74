//! Command routing and execution
//!
//! This module handles routing CLI commands to their respective implementations.

use crate::app::AppConfig;
use crate::cli::args::{Cli, Commands};
use crate::cli::commands::*;
use anyhow::Result;
use clap::CommandFactory;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Option<Commands>, app: &AppConfig) -> Result<()> {
    match command {
        Some(Commands::Sort {
            source_dir,
            output_dir,
            jobs,
            no_progress,
        }) => {
            let settings = app.load_settings().await?;
            run_sort_command(
                SortParams {
                    source_dir,
                    output_dir,
                    jobs,
                    show_progress: !no_progress,
                },
                settings,
            )
            .await
        }
        Some(Commands::Words {
            location,
            top,
            output,
            no_chart,
            json,
            threads,
        }) => {
            let settings = app.load_settings().await?;
            run_words_command(
                WordsParams {
                    location,
                    top,
                    output,
                    no_chart,
                    json,
                    threads,
                },
                settings,
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
