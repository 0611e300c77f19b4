//! Supreme Court of Appeals of West Virginia.
//!
//! The opinions page is one table; each row fills the case columns. Status
//! and nature-of-suit cells hold short codes that the page's own script
//! expands. Some listed PDFs 404 for a while after posting, so the newest
//! entries are checked before they are handed on.

use scraper::{ElementRef, Selector};

use crate::columns::CaseColumns;
use crate::formats::PrecedentialStatus;
use crate::http::{LinkChecker, PageFormat, PageRequest};
use crate::site::{Page, ScrapeConfig, Site, SiteContext};
use crate::text::{clean_string, parse_date};

pub const OPINIONS_URL: &str = "http://www.courtswv.gov/supreme-court/opinions.html";

const LINK_CHECK_LIMIT: usize = 50;
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct Wva {
    url: String,
}

impl Default for Wva {
    fn default() -> Self {
        Self::with_url(OPINIONS_URL)
    }
}

impl Wva {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

pub fn decode_status(code: &str) -> PrecedentialStatus {
    match code {
        "MD" | "SO" | "PC" => PrecedentialStatus::Published,
        "SEP" => PrecedentialStatus::Separate,
        _ => PrecedentialStatus::Unknown,
    }
}

pub fn decode_nature_of_suit(code: &str) -> &'static str {
    match code {
        "CR-F" => "Felony (non-Death Penalty)",
        "CR-M" => "Misdemeanor",
        "CR-O" => "Criminal-Other",
        "TCR" => "Tort, Contract, and Real Property",
        "PR" => "Probate",
        "FAM" => "Family",
        "JUV" => "Juvenile",
        "CIV-O" => "Civil-Other",
        "WC" => "Workers Compensation",
        "TAX" => "Revenue (Tax)",
        "ADM" => "Administrative Agency-Other",
        "MISC" => "Appeal by Right-Other",
        "OJ-H" => "Habeas Corpus",
        "OJ-M" | "OJ-P" => "Writ Application-Other",
        "L-ADM" => "Bar Admission",
        "L-DISC" => "Bar Discipline/Eligibility",
        "L-DISC-O" | "J-DISC" => "Bar/Judiciary Proceeding-Other",
        "CERQ" => "Certified Question",
        "OJ-O" => "Original Proceeding/Appellate Matter-Other",
        "POST" => "Post-Conviction Appeal",
        _ => UNKNOWN,
    }
}

struct RowSelectors {
    rows: Selector,
    date: Selector,
    docket: Selector,
    anchor: Selector,
    nature_of_suit: Selector,
    status: Selector,
}

impl RowSelectors {
    fn new() -> anyhow::Result<Self> {
        Ok(Self {
            rows: super::selector("table > tbody > tr")?,
            date: super::selector("td:nth-of-type(1)")?,
            docket: super::selector("td:nth-of-type(2)")?,
            anchor: super::selector("td:nth-of-type(3) > a:nth-of-type(1)")?,
            nature_of_suit: super::selector("td:nth-of-type(4)")?,
            status: super::selector("td:nth-of-type(5)")?,
        })
    }

    fn cell_text(&self, row: ElementRef<'_>, selector: &Selector) -> String {
        row.select(selector)
            .next()
            .map(|cell| super::text_content(cell).trim().to_owned())
            .unwrap_or_default()
    }
}

/// Drops every case among the first fifty whose document is not reachable.
/// Returns how many were dropped.
pub fn drop_unreachable(
    columns: &mut CaseColumns,
    links: &dyn LinkChecker,
) -> anyhow::Result<usize> {
    let mut unreachable = Vec::new();
    for (index, url) in columns.urls.iter().take(LINK_CHECK_LIMIT).enumerate() {
        if !links.is_reachable(url)? {
            tracing::debug!(url = %url, "dropping case with unreachable document");
            unreachable.push(index);
        }
    }
    columns.remove_indices(&unreachable);
    Ok(unreachable.len())
}

impl Site for Wva {
    fn court_id(&self) -> &'static str {
        "wva"
    }

    fn court_name(&self) -> &'static str {
        "Supreme Court of Appeals of West Virginia"
    }

    fn request(&self, _config: &ScrapeConfig) -> PageRequest {
        PageRequest::get(&self.url, PageFormat::Html)
    }

    fn extract(&self, page: &Page) -> anyhow::Result<CaseColumns> {
        let cells = RowSelectors::new()?;
        let mut columns = CaseColumns::default();
        let mut natures_of_suit = Vec::new();

        for row in page.html()?.select(&cells.rows) {
            let Some(anchor) = row.select(&cells.anchor).next() else {
                tracing::debug!(url = %page.url, "skipping opinion row without a link");
                continue;
            };
            let Some(href) = anchor.value().attr("href") else {
                tracing::debug!(url = %page.url, "skipping opinion link without href");
                continue;
            };

            columns.names.push(clean_string(&super::text_content(anchor)));
            columns.urls.push(page.resolve(href));
            columns
                .dates
                .push(parse_date(&cells.cell_text(row, &cells.date)));
            columns
                .dockets
                .push(cells.cell_text(row, &cells.docket).to_lowercase());
            columns
                .statuses
                .push(decode_status(&cells.cell_text(row, &cells.status)));
            natures_of_suit.push(
                decode_nature_of_suit(&cells.cell_text(row, &cells.nature_of_suit)).to_owned(),
            );
        }

        columns.natures_of_suit = Some(natures_of_suit);
        Ok(columns)
    }

    fn post_process(&self, columns: &mut CaseColumns, ctx: &SiteContext) -> anyhow::Result<()> {
        let dropped = drop_unreachable(columns, ctx.links())?;
        if dropped > 0 {
            tracing::info!(dropped, "dropped cases with unreachable documents");
        }
        Ok(())
    }
}
