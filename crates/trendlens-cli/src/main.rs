mod commands;
mod input;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendlens_core::Platform;

use crate::input::{parse_input_spec, InputSpec};

#[derive(Debug, Parser)]
#[command(name = "trendlens")]
#[command(about = "Detect trending content across social platforms")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize raw platform dumps and print the trend analysis as JSON
    Analyze {
        /// Raw items as `<platform>=<file.json>`; repeat to mix platforms
        #[arg(
            long = "input",
            value_name = "PLATFORM=FILE",
            required = true,
            value_parser = parse_input_spec
        )]
        inputs: Vec<InputSpec>,
    },
    /// Normalize one raw platform dump and print the records as JSON
    Normalize {
        /// Platform the raw items came from (instagram, tiktok)
        #[arg(long)]
        platform: Platform,

        /// JSON array of raw items
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = trendlens_core::load_app_config()?;

    // Logs go to stderr; stdout carries the JSON output.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Analyze { inputs }) => commands::run_analyze(&inputs, &config)?,
        Some(Commands::Normalize { platform, input }) => {
            commands::run_normalize(platform, input, &config)?;
        }
        None => println!(
            "trendlens: run `trendlens analyze --input <platform>=<file>` or `trendlens --help`"
        ),
    }

    Ok(())
}
