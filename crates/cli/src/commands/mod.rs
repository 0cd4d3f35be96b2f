//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

pub mod completions;
pub mod publish;
mod regions;

/// release-fanout - publish a release artifact to every regional bucket
///
/// Reads AWS_ACCESS_KEY, AWS_SECRET_KEY, FOLDER_NAME, VERSION_NUMBER and
/// PATH_TO_FILE from the environment and uploads the file, publicly readable,
/// to one bucket per region. A file named sam-template.yaml is rendered per
/// region first.
#[derive(Parser, Debug)]
#[command(name = "release-fanout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish the configured artifact to every region
    Publish(publish::PublishArgs),

    /// List the target regions and their buckets
    Regions,

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Publish(args) => publish::execute(args, output_config).await,
        Commands::Regions => regions::execute(output_config),
        Commands::Completions(args) => completions::execute(args),
    }
}
