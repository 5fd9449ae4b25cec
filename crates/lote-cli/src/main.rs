//! Back-office spreadsheet import CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod logging;
mod reader;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{run_entities, run_import};
use crate::logging::{LogConfig, LogFormat, init_logging};
use crate::summary::print_summary;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Import(args) => match run_import(args).await {
            Ok(outcome) => {
                print_summary(&outcome);
                if outcome.result.success { 0 } else { 1 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Entities => {
            run_entities();
            0
        }
    };
    std::process::exit(exit_code);
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present();
    LogConfig {
        level_filter: if explicit {
            cli.verbosity.tracing_level_filter()
        } else {
            LevelFilter::INFO
        },
        use_env_filter: !explicit,
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        log_file: cli.log_file.clone(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        },
    }
}
