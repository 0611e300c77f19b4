use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the supported courts.
    Courts,
    /// Scrape one court's opinion listing into JSON Lines.
    Scrape(ScrapeArgs),
    /// Pull citation metadata out of an opinion's plain text.
    ExtractText(ExtractTextArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Court id (see `courts`).
    #[arg(long)]
    pub court: String,

    /// Read the listing page from this file instead of the network.
    #[arg(long)]
    pub fixture: Option<String>,

    /// Decision year for courts that filter by year (default: current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Output file for case records (JSON Lines). Defaults to stdout.
    #[arg(long)]
    pub out: Option<String>,

    /// User-Agent header sent with every request.
    #[arg(long, default_value = crate::http::DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Keep every case without checking that its document is reachable.
    #[arg(long)]
    pub skip_link_check: bool,
}

#[derive(Debug, Args)]
pub struct ExtractTextArgs {
    /// Court id (see `courts`).
    #[arg(long)]
    pub court: String,

    /// Plain-text opinion to read.
    #[arg(long)]
    pub input: String,
}
