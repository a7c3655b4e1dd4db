//! CLI definitions for xs.
//!
//! Uses clap for argument parsing with derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// xs - Live X post collection with sentiment scoring
#[derive(Parser, Debug)]
#[command(name = "xs")]
#[command(author = "Jeffrey Emanuel <jeff@jeffreyemanuel.dev>")]
#[command(version)]
#[command(about = "Stream keyword-matched X posts, score their sentiment, store them in SQLite")]
#[command(long_about = r#"
xs (x_stream) - A command-line tool for collecting live posts that match a
keyword, scoring each post's sentiment, and persisting the enriched records
to a local SQLite database.

Features:
  - Keyword-filtered live streaming via the configured feed endpoint
  - VADER sentiment polarity per post, rounded to two decimals
  - Append-only SQLite storage with a fixed schema
  - JSON and human-readable output formats

Quick start:
  1. Run: xs config --init
  2. Set your bearer token in the config file (or XS_BEARER_TOKEN)
  3. Collect: xs stream "your keyword"
  4. Inspect: xs stats
"#)]
pub struct Cli {
    /// Path to the database file
    #[arg(long, env = "XS_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Be verbose (show debug info)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Be quiet (suppress non-error output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect live posts matching a keyword
    Stream(StreamArgs),

    /// Show statistics over the collected posts
    Stats,

    /// Export collected posts in various formats
    Export(ExportArgs),

    /// Show or manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Keyword to filter the feed by (prompted for interactively if omitted)
    pub keyword: Option<String>,

    /// Number of posts to collect before stopping
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Feed endpoint URL override
    #[arg(long, env = "XS_ENDPOINT")]
    pub endpoint: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (stdout if not specified)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(long, short = 'f', default_value = "json")]
    pub format: ExportFormat,

    /// Limit number of rows
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Write a default config file to the standard location
    #[arg(long)]
    pub init: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
    Csv,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Jsonl,
    Csv,
}
