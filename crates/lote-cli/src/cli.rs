//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lote",
    version,
    about = "Import back-office spreadsheets through the validation pipeline",
    long_about = "Convert spreadsheet/CSV exports into validated back-office \
                  entities.\n\n\
                  Rows are header-mapped, normalized, validated, resolved \
                  against related entities, deduplicated, and committed to \
                  the API, falling back to a local outbox when the server \
                  is unreachable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a CSV export into one entity type.
    Import(ImportArgs),

    /// List the built-in entity schemas.
    Entities,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the CSV export.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Target entity type (name, endpoint, or Portuguese synonym).
    #[arg(long = "entity", value_name = "NAME")]
    pub entity: String,

    /// Base URL of the persistence API.
    #[arg(long = "api-url", value_name = "URL", default_value = "http://localhost:3000")]
    pub api_url: String,

    /// Directory for the local durable outbox used when the API fails.
    #[arg(long = "outbox", value_name = "DIR", default_value = "outbox")]
    pub outbox: PathBuf,

    /// CSV field delimiter (Brazilian exports often use ';').
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",")]
    pub delimiter: char,

    /// Run the whole pipeline against an in-memory store; nothing leaves
    /// the machine.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Treat unmatched foreign-key references as row errors instead of
    /// defaulting to the first active candidate.
    #[arg(long = "no-fk-fallback")]
    pub no_fk_fallback: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
