//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// popchart - population data loader, query service and bar chart viewer
#[derive(Parser, Debug)]
#[command(name = "popchart")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: popchart.yml in the working directory, if present)
    #[arg(short, long, global = true, env = "POPCHART_CONFIG")]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the CSV file, then serve GET /population
    Serve(ServeArgs),

    /// Load the CSV file into the database and exit
    Ingest(IngestArgs),

    /// Fetch the dataset and play it back as a bar chart
    View(ViewArgs),
}

/// Store location and input file, shared by serve and ingest
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// DuckDB database path (or :memory:)
    #[arg(long, env = "POPCHART_DATABASE")]
    pub database: Option<String>,

    /// CSV file to ingest
    #[arg(long, env = "POPCHART_CSV_PATH")]
    pub csv_path: Option<String>,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, env = "POPCHART_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "POPCHART_PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Serve what is already stored without loading the CSV file
    #[arg(long)]
    pub skip_ingest: bool,
}

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the view command
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Base URL of the query service
    #[arg(long, env = "POPCHART_API_URL")]
    pub url: Option<String>,

    /// Year to show first (default: earliest year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Start playing immediately
    #[arg(long)]
    pub play: bool,

    /// Milliseconds between years while playing
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ViewFormat,

    /// Columns used by the longest bar
    #[arg(long, default_value_t = 50)]
    pub width: usize,

    /// Disable ANSI colours and screen clearing
    #[arg(long)]
    pub no_color: bool,
}

/// View output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFormat {
    /// Coloured bars drawn in the terminal
    Text,
    /// One Chart.js configuration per redraw (JSON lines)
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
