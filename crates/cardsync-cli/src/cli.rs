//! CLI argument definitions for cardsync.

use std::path::PathBuf;

use cardsync_cli::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cardsync",
    version,
    about = "Mirror board cards into a record store table",
    long_about = "Mirror the cards of one board list into a record store table.\n\n\
                  Every cycle re-reads the target list, converts each card's custom\n\
                  fields into a typed record and appends it to the destination table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the TOML configuration file.
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH,
        global = true
    )]
    pub config: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
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
    /// Run the sync loop.
    Run(RunArgs),

    /// List the board's custom field definitions and how they are mapped.
    Fields,

    /// Show the destination table's columns.
    Schema,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Run a single cycle, print its summary and exit.
    #[arg(long = "once")]
    pub once: bool,

    /// Build and log records without submitting them.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Seconds between cycles (overrides sync.interval_secs).
    #[arg(long = "interval", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Skip logging the destination table's columns at the start of each cycle.
    #[arg(long = "no-schema-check")]
    pub no_schema_check: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
