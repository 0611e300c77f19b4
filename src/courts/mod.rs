//! One adapter per court, plus the registry the CLI resolves ids through.

use scraper::{ElementRef, Selector};

use crate::site::Site;

pub mod coloctapp;
pub mod mdag;
pub mod ohio;
pub mod wva;

pub fn all() -> Vec<Box<dyn Site>> {
    vec![
        Box::new(coloctapp::ColoCtApp::default()),
        Box::new(mdag::MdAg::default()),
        Box::new(ohio::Ohio::default()),
        Box::new(wva::Wva::default()),
    ]
}

pub fn by_id(id: &str) -> anyhow::Result<Box<dyn Site>> {
    let sites = all();
    let known = sites
        .iter()
        .map(|site| site.court_id())
        .collect::<Vec<_>>()
        .join(", ");
    sites
        .into_iter()
        .find(|site| site.court_id() == id)
        .ok_or_else(|| anyhow::anyhow!("unknown court id: {id} (known: {known})"))
}

pub(crate) fn selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow::anyhow!("parse selector {css:?}: {err}"))
}

/// All descendant text, concatenated.
pub(crate) fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// First non-blank descendant text node, trimmed.
pub(crate) fn first_text(element: ElementRef<'_>) -> Option<String> {
    element
        .text()
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_every_court() -> anyhow::Result<()> {
        for id in ["coloctapp", "mdag", "ohio", "wva"] {
            assert_eq!(by_id(id)?.court_id(), id);
        }
        Ok(())
    }

    #[test]
    fn registry_rejects_unknown_ids() {
        let err = by_id("scotus").err().map(|err| err.to_string());
        let err = err.unwrap_or_default();
        assert!(err.contains("unknown court id: scotus"));
        assert!(err.contains("coloctapp, mdag, ohio, wva"));
    }
}
