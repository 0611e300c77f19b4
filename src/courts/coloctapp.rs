//! Colorado Court of Appeals.
//!
//! The case announcements page lists opinions as bare paragraphs with no
//! links. Published opinions sit between the `PUBLISHED OPINIONS` and
//! `UNPUBLISHED OPINIONS` headings; their PDF location is derived from the
//! docket number.

use std::sync::LazyLock;

use chrono::Datelike as _;
use regex::Regex;

use crate::columns::CaseColumns;
use crate::formats::{
    CaseRecord, CitationMetadata, ClusterMetadata, OpinionMetadata, PrecedentialStatus,
};
use crate::http::{PageFormat, PageRequest};
use crate::site::{Page, ScrapeConfig, Site};
use crate::text::{clean_string, parse_date, same_ignoring_whitespace};

pub const CASE_ANNOUNCEMENTS_URL: &str =
    "https://www.courts.state.co.us/Courts/Court_of_Appeals/Case_Announcements/";
const OPINION_BASE_URL: &str = "https://www.courts.state.co.us/Courts/Court_of_Appeals/Opinion";

const PUBLISHED_MARKER: &str = "PUBLISHED OPINIONS";
const UNPUBLISHED_MARKER: &str = "UNPUBLISHED OPINIONS";

const REPORTER: &str = "COA";
const STATE_CITATION_TYPE: u8 = 2;

static OPINION_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ms)The.*SUMMARY.*?(?P<citation>\d{4}COA\d+).*?No\. (?P<docket>\d+CA\d+), (?P<headnotes>.*?)\n{2,}(?P<summary>.*?)COLORADO COURT OF APPEALS",
    )
    .expect("opinion summary pattern")
});

#[derive(Debug, Clone)]
pub struct ColoCtApp {
    url: String,
}

impl Default for ColoCtApp {
    fn default() -> Self {
        Self::with_url(CASE_ANNOUNCEMENTS_URL)
    }
}

impl ColoCtApp {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// PDF location of a published opinion.
///
/// `-PD` appears to stand for "published decision". It has held for every
/// bulletin seen so far, but nothing on the court's side promises it.
pub fn opinion_url(year: i32, docket: &str) -> String {
    format!("{OPINION_BASE_URL}/{year}/{docket}-PD.pdf")
}

impl Site for ColoCtApp {
    fn court_id(&self) -> &'static str {
        "coloctapp"
    }

    fn court_name(&self) -> &'static str {
        "Colorado Court of Appeals"
    }

    fn request(&self, _config: &ScrapeConfig) -> PageRequest {
        PageRequest::get(&self.url, PageFormat::Html)
    }

    fn extract(&self, page: &Page) -> anyhow::Result<CaseColumns> {
        let paragraph = super::selector("p")?;
        let rows = page
            .html()?
            .select(&paragraph)
            .map(|row| clean_string(&super::text_content(row)))
            .collect::<Vec<_>>();

        let mut columns = CaseColumns::default();
        let Some(bulletin) = rows.first() else {
            tracing::debug!(url = %page.url, "announcement page has no paragraphs");
            return Ok(columns);
        };
        let Some(date) = parse_date(bulletin) else {
            tracing::warn!(bulletin = %bulletin, "could not read bulletin date");
            return Ok(columns);
        };
        if !rows
            .get(1)
            .is_some_and(|row| same_ignoring_whitespace(row, PUBLISHED_MARKER))
        {
            tracing::debug!(url = %page.url, "no published opinions heading");
            return Ok(columns);
        }

        for row in &rows[2..] {
            if same_ignoring_whitespace(row, UNPUBLISHED_MARKER) {
                break;
            }
            let Some((docket, name)) = row.split_once(' ') else {
                tracing::debug!(row = %row, "skipping row without docket and name");
                continue;
            };
            columns.push(CaseRecord::new(
                docket,
                name,
                Some(date),
                opinion_url(date.year(), docket),
                PrecedentialStatus::Published,
            ));
        }
        Ok(columns)
    }

    fn extract_from_text(&self, text: &str) -> OpinionMetadata {
        let Some(caps) = OPINION_SUMMARY.captures(text) else {
            return OpinionMetadata::default();
        };
        let Some((volume, page)) = caps["citation"].split_once(REPORTER) else {
            return OpinionMetadata::default();
        };

        OpinionMetadata {
            cluster: Some(ClusterMetadata {
                docket_number: caps["docket"].to_owned(),
                headnotes: clean_string(&caps["headnotes"]),
                summary: clean_string(&caps["summary"]),
            }),
            citation: Some(CitationMetadata {
                volume: volume.to_owned(),
                reporter: REPORTER.to_owned(),
                page: page.to_owned(),
                citation_type: STATE_CITATION_TYPE,
            }),
        }
    }
}
