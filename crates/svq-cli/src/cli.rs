//! CLI argument definitions for the survey quality screener.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "svq",
    version,
    about = "Survey quality screener - flag low-quality survey respondents",
    long_about = "Flag low-quality survey respondents from a CSV export.\n\n\
                  Detects speeders, nonsense open-ended answers, and\n\
                  straight-lining across rating batteries, then generates an\n\
                  exclusion syntax script and a JSON report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a survey export and flag low-quality respondents.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the survey data CSV export.
    #[arg(value_name = "DATA_CSV")]
    pub data_file: PathBuf,

    /// Questionnaire structure as extracted plain text. Without it, open
    /// questions and rating batteries are discovered heuristically.
    #[arg(long = "questionnaire", value_name = "TXT")]
    pub questionnaire: Option<PathBuf>,

    /// Output directory for generated files (default: next to the data file).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip writing the exclusion syntax file.
    #[arg(long = "no-syntax")]
    pub no_syntax: bool,

    /// Skip writing the JSON report.
    #[arg(long = "no-json")]
    pub no_json: bool,

    /// Downgrade straight-lining-only respondents to low risk when the
    /// longest battery is shorter than N items.
    #[arg(long = "battery-tier-min", value_name = "N")]
    pub battery_tier_min: Option<usize>,
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
