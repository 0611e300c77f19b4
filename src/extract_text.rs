use std::path::PathBuf;

use anyhow::Context as _;

use crate::cli::ExtractTextArgs;

pub fn run(args: ExtractTextArgs) -> anyhow::Result<()> {
    let site = crate::courts::by_id(&args.court)?;
    let input = PathBuf::from(&args.input);
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("read opinion text: {}", input.display()))?;

    let metadata = site.extract_from_text(&text);
    if metadata.is_empty() {
        tracing::info!(court = site.court_id(), input = %input.display(), "no metadata found");
    }
    let json = serde_json::to_string_pretty(&metadata).context("serialize opinion metadata")?;
    println!("{json}");
    Ok(())
}
