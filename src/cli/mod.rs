//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use stockdash_core::Timeframe;

#[derive(Parser)]
#[command(name = "stockdash")]
#[command(author, version, about = "Market data engine for an equity dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate candlestick bars for a symbol
    Candles(CandlesArgs),
    /// Generate market index lines
    Indices(IndicesArgs),
    /// Generate actual vs predicted prices with a recommendation
    Predict(PredictArgs),
    /// Poll live quotes for a watchlist
    Watch(WatchArgs),
    /// Search for symbols
    Search(SearchArgs),
    /// Validate configuration
    ValidateConfig,
}

/// Options shared by the series generators.
#[derive(clap::Args)]
pub struct GenerationArgs {
    /// Timeframe (1D, 1W, 1M, 1Y)
    #[arg(short, long, default_value = "1D")]
    pub timeframe: Timeframe,

    /// Seed for a reproducible series
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reference time in RFC 3339 (defaults to the local clock)
    #[arg(long)]
    pub at: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct CandlesArgs {
    /// Symbol to chart (defaults to the last one viewed)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Starting price (defaults to the symbol's reference price)
    #[arg(long)]
    pub base_price: Option<f64>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

#[derive(clap::Args)]
pub struct IndicesArgs {
    /// Keep regenerating the lines on an interval
    #[arg(short, long)]
    pub watch: bool,

    /// Seconds between regenerations in watch mode
    #[arg(short, long, default_value_t = 60)]
    pub interval: u64,

    /// Stop watching after this many refreshes
    #[arg(long)]
    pub cycles: Option<usize>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

#[derive(clap::Args)]
pub struct PredictArgs {
    /// Symbol to predict (defaults to the last one viewed)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Starting price (defaults to a random price between 100 and 300)
    #[arg(long)]
    pub base_price: Option<f64>,

    /// Further timeframes, each continuing from the previous current price
    #[arg(long, value_delimiter = ',')]
    pub then: Vec<Timeframe>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

#[derive(clap::Args)]
pub struct WatchArgs {
    /// Symbols to watch (comma-separated, defaults to the configured watchlist)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Poll interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Stop after this many updates
    #[arg(long)]
    pub cycles: Option<usize>,

    /// Use generated quotes instead of the live provider
    #[arg(long)]
    pub offline: bool,

    /// Seed for offline quotes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format (text or json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct SearchArgs {
    /// Company name or symbol fragment
    pub query: String,

    /// Search the built-in directory instead of the live provider
    #[arg(long)]
    pub offline: bool,

    /// Output format (text or json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}
