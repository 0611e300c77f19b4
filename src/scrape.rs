use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;

use crate::cli::ScrapeArgs;
use crate::formats::CaseRecord;
use crate::http::{AssumeReachable, HttpConfig};
use crate::site::{ScrapeConfig, SiteContext};

pub fn run(args: ScrapeArgs) -> anyhow::Result<()> {
    let site = crate::courts::by_id(&args.court)?;

    let mut config = ScrapeConfig {
        fixture: args.fixture.as_deref().map(PathBuf::from),
        http: HttpConfig {
            user_agent: args.user_agent.clone(),
            timeout: Duration::from_secs(args.timeout_secs),
        },
        ..ScrapeConfig::default()
    };
    if let Some(year) = args.year {
        config.year = year;
    }

    let mut ctx = SiteContext::new(config).context("build scrape context")?;
    if args.skip_link_check {
        ctx = ctx.with_link_checker(AssumeReachable);
    }

    tracing::info!(
        court = site.court_id(),
        test_mode = ctx.config.test_mode(),
        year = ctx.config.year,
        "scrape"
    );
    let records = crate::site::scrape(site.as_ref(), &ctx)?;

    match args.out.as_deref() {
        Some(out) => {
            let out_path = PathBuf::from(out);
            let mut file = OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&out_path)
                .with_context(|| format!("create case output: {}", out_path.display()))?;
            write_records(&mut file, &records)?;
            file.flush().context("flush case output")?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_records(&mut lock, &records)?;
            lock.flush().context("flush stdout")?;
        }
    }
    Ok(())
}

pub fn write_records(out: &mut impl Write, records: &[CaseRecord]) -> anyhow::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record).context("serialize case record")?;
        out.write_all(b"\n").context("write case record newline")?;
    }
    Ok(())
}

pub fn list_courts() -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    for site in crate::courts::all() {
        writeln!(lock, "{}\t{}", site.court_id(), site.court_name()).context("write court")?;
    }
    Ok(())
}
