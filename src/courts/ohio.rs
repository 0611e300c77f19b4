//! Supreme Court of Ohio, via the ASP.NET "Reporter of Decisions" search.
//!
//! The results only appear after posting the search form back with its
//! `__VIEWSTATE` and `__EVENTVALIDATION` tokens, so a live run is a GET of the
//! form followed by a POST to the results endpoint.

use scraper::{ElementRef, Html, Selector};

use crate::columns::CaseColumns;
use crate::formats::{CaseRecord, PrecedentialStatus};
use crate::http::{PageFormat, PageRequest};
use crate::site::{Page, ScrapeConfig, Site, SiteContext};
use crate::text::{clean_string, parse_date};

pub const FORM_URL: &str = "https://www.supremecourtofohio.gov/rod/docs/";
pub const RESULTS_URL: &str = "https://www.supremecourt.ohio.gov/rod/docs/";

const HEADER_ROWS: usize = 3;
const FOOTER_ROWS: usize = 2;
const ROWS_PER_PAGE: &str = "50";

#[derive(Debug, Clone)]
pub struct Ohio {
    court_index: u32,
    form_url: String,
    results_url: String,
}

impl Default for Ohio {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Ohio {
    /// `court_index` selects the court in the search form; 0 is the Supreme Court.
    pub fn new(court_index: u32) -> Self {
        Self {
            court_index,
            form_url: FORM_URL.to_owned(),
            results_url: RESULTS_URL.to_owned(),
        }
    }

    pub fn with_urls(mut self, form_url: impl Into<String>, results_url: impl Into<String>) -> Self {
        self.form_url = form_url.into();
        self.results_url = results_url.into();
        self
    }

    fn search_fields(&self, year: i32) -> Vec<(String, String)> {
        let year = year.to_string();
        [
            ("__VIEWSTATEENCRYPTED", String::new()),
            ("ctl00$MainContent$ddlCourt", self.court_index.to_string()),
            ("ctl00$MainContent$ddlDecidedYearMin", year.clone()),
            ("ctl00$MainContent$ddlDecidedYearMax", year),
            ("ctl00$MainContent$ddlCounty", "0".to_owned()),
            ("ctl00$MainContent$btnSubmit", "Submit".to_owned()),
            ("ctl00$MainContent$ddlRowsPerPage", ROWS_PER_PAGE.to_owned()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
    }

    /// The POST that turns the search form into a results page.
    pub fn search_request(&self, year: i32, tokens: ViewStateTokens) -> PageRequest {
        PageRequest::post(&self.results_url, PageFormat::Html)
            .with_form(self.search_fields(year))
            .with_form([
                ("__EVENTVALIDATION", tokens.event_validation),
                ("__VIEWSTATE", tokens.view_state),
            ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStateTokens {
    pub event_validation: String,
    pub view_state: String,
}

pub fn view_state_tokens(html: &Html) -> anyhow::Result<Option<ViewStateTokens>> {
    let event_validation = super::selector("input#__EVENTVALIDATION")?;
    let view_state = super::selector("input#__VIEWSTATE")?;
    let value = |selector: &Selector| {
        html.select(selector)
            .next()
            .and_then(|input| input.value().attr("value"))
            .map(str::to_owned)
    };
    Ok(value(&event_validation)
        .zip(value(&view_state))
        .map(|(event_validation, view_state)| ViewStateTokens {
            event_validation,
            view_state,
        }))
}

struct RowSelectors {
    judge: Selector,
    docket: Selector,
    date: Selector,
    neutral_citation: Selector,
    summary: Selector,
    anchor: Selector,
}

impl RowSelectors {
    fn new() -> anyhow::Result<Self> {
        Ok(Self {
            judge: super::selector("td:nth-of-type(4)")?,
            docket: super::selector("td:nth-of-type(2)")?,
            date: super::selector("td:nth-of-type(6)")?,
            neutral_citation: super::selector("td:nth-of-type(8)")?,
            summary: super::selector("td:nth-of-type(3)")?,
            anchor: super::selector("a")?,
        })
    }

    fn cell_text(&self, row: ElementRef<'_>, selector: &Selector) -> Option<String> {
        row.select(selector).find_map(super::first_text)
    }

    fn case(&self, page: &Page, row: ElementRef<'_>) -> Option<CaseRecord> {
        let anchor = row.select(&self.anchor).next()?;
        let name = anchor
            .children()
            .filter_map(|child| child.value().as_text())
            .map(|text| text.trim())
            .find(|text| !text.is_empty())?;
        let href = anchor.value().attr("href")?;
        let docket = self.cell_text(row, &self.docket)?;
        let date = self.cell_text(row, &self.date)?;

        let mut record = CaseRecord::new(
            docket,
            clean_string(name),
            parse_date(&date),
            page.resolve(href),
            PrecedentialStatus::Published,
        );
        record.judge = self.cell_text(row, &self.judge);
        record.neutral_citation = self.cell_text(row, &self.neutral_citation);
        record.summary = self.cell_text(row, &self.summary);
        Some(record)
    }
}

impl Site for Ohio {
    fn court_id(&self) -> &'static str {
        "ohio"
    }

    fn court_name(&self) -> &'static str {
        "Supreme Court of Ohio"
    }

    fn request(&self, _config: &ScrapeConfig) -> PageRequest {
        PageRequest::get(&self.form_url, PageFormat::Html)
    }

    fn fetch(&self, ctx: &SiteContext) -> anyhow::Result<Page> {
        let form = ctx.load(&self.request(&ctx.config))?;
        if ctx.config.test_mode() {
            return Ok(form);
        }

        let Some(tokens) = view_state_tokens(form.html()?)? else {
            tracing::warn!(url = %form.url, "search form has no view state tokens");
            return Ok(form);
        };
        let request = self.search_request(ctx.config.year, tokens);
        let raw = ctx.http().fetch_text(&request)?;
        Page::parse(&request.url, request.format, &raw)
    }

    fn extract(&self, page: &Page) -> anyhow::Result<CaseColumns> {
        let rows_selector = super::selector("table#MainContent_gvResults tr")?;
        let cells = RowSelectors::new()?;
        let rows = page.html()?.select(&rows_selector).collect::<Vec<_>>();

        let mut columns = CaseColumns::default();
        if rows.len() <= HEADER_ROWS + FOOTER_ROWS {
            tracing::debug!(url = %page.url, rows = rows.len(), "no result rows");
            return Ok(columns);
        }
        for row in &rows[HEADER_ROWS..rows.len() - FOOTER_ROWS] {
            match cells.case(page, *row) {
                Some(record) => columns.push(record),
                None => tracing::debug!(url = %page.url, "skipping incomplete result row"),
            }
        }
        Ok(columns)
    }
}
