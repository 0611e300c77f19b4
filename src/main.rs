use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    let cli = opinionscrape::cli::Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    opinionscrape::logging::init(level).context("init logging")?;
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        opinionscrape::cli::Command::Courts => {
            opinionscrape::scrape::list_courts().context("courts")?;
        }
        opinionscrape::cli::Command::Scrape(args) => {
            opinionscrape::scrape::run(args).context("scrape")?;
        }
        opinionscrape::cli::Command::ExtractText(args) => {
            opinionscrape::extract_text::run(args).context("extract-text")?;
        }
    }

    Ok(())
}
