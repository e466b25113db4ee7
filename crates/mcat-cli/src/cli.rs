//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mcat",
    version,
    about = "Clean music catalog and chart exports and summarize audio features by year",
    long_about = "Clean music catalog and chart exports and summarize audio features by year.\n\n\
                  Catalog records are repaired field by field, chart records are validated\n\
                  and rejected as a whole. Every decision is counted in quality counters."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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

    /// Include raw record text in debug logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Repair catalog records field by field.
    CleanCatalog(JobArgs),

    /// Validate weekly chart records.
    CleanChart(JobArgs),

    /// Average audio features per release year.
    Aggregate(AggregateArgs),

    /// Print the effective catalog rule table.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct JobArgs {
    /// Input file (delimited text, one record per line).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Job configuration file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field delimiter (overrides the configuration file).
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Lines per parallel work unit (overrides the configuration file).
    #[arg(long = "chunk-size", value_name = "LINES")]
    pub chunk_size: Option<usize>,

    /// Worker threads (overrides the configuration file).
    #[arg(long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Write the quality counters as JSON.
    #[arg(long = "counters-out", value_name = "PATH")]
    pub counters_out: Option<PathBuf>,
}

#[derive(Parser)]
pub struct AggregateArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// Run every line through the catalog cleaner before aggregating.
    ///
    /// Without this flag, lines with a missing or unparsable feature are
    /// skipped and counted as FEATURE_PARSE_ERR.
    #[arg(long = "sanitize")]
    pub sanitize: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Job configuration file whose rule overrides are applied.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
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
