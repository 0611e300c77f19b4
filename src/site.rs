//! The contract every court adapter implements, and the driver that runs it.

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Datelike as _;

use crate::columns::CaseColumns;
use crate::formats::{CaseRecord, OpinionMetadata};
use crate::http::{HeadChecker, HttpClient, HttpConfig, LinkChecker, PageFormat, PageRequest};

/// Immutable per-run settings.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Year used by adapters that filter listings by decision year.
    pub year: i32,
    /// When set, the primary page is read from this file instead of the network.
    pub fixture: Option<PathBuf>,
    pub http: HttpConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            year: chrono::Local::now().year(),
            fixture: None,
            http: HttpConfig::default(),
        }
    }
}

impl ScrapeConfig {
    pub fn test_mode(&self) -> bool {
        self.fixture.is_some()
    }
}

pub enum PageBody {
    Html(scraper::Html),
    Json(serde_json::Value),
}

/// A fetched row source plus the URL it logically came from.
pub struct Page {
    pub url: String,
    pub body: PageBody,
}

impl Page {
    pub fn parse(url: impl Into<String>, format: PageFormat, raw: &str) -> anyhow::Result<Self> {
        let url = url.into();
        let body = match format {
            PageFormat::Html => PageBody::Html(scraper::Html::parse_document(raw)),
            PageFormat::Json => PageBody::Json(
                serde_json::from_str(raw).with_context(|| format!("parse json from {url}"))?,
            ),
        };
        Ok(Self { url, body })
    }

    pub fn html(&self) -> anyhow::Result<&scraper::Html> {
        match &self.body {
            PageBody::Html(html) => Ok(html),
            PageBody::Json(_) => anyhow::bail!("expected an html page from {}", self.url),
        }
    }

    pub fn json(&self) -> anyhow::Result<&serde_json::Value> {
        match &self.body {
            PageBody::Json(value) => Ok(value),
            PageBody::Html(_) => anyhow::bail!("expected a json page from {}", self.url),
        }
    }

    /// Resolves `href` against the page URL; returns it untouched if either
    /// side does not parse.
    pub fn resolve(&self, href: &str) -> String {
        url::Url::parse(&self.url)
            .and_then(|base| base.join(href))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| href.to_owned())
    }
}

/// Everything an adapter may touch during a run.
pub struct SiteContext {
    pub config: ScrapeConfig,
    http: HttpClient,
    links: Box<dyn LinkChecker>,
}

impl SiteContext {
    pub fn new(config: ScrapeConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(&config.http)?;
        let links = Box::new(HeadChecker::new(&config.http)?);
        Ok(Self {
            config,
            http,
            links,
        })
    }

    pub fn with_link_checker(mut self, links: impl LinkChecker + 'static) -> Self {
        self.links = Box::new(links);
        self
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn links(&self) -> &dyn LinkChecker {
        self.links.as_ref()
    }

    /// Loads the page `request` describes, from the fixture in test mode.
    pub fn load(&self, request: &PageRequest) -> anyhow::Result<Page> {
        let raw = match &self.config.fixture {
            Some(path) => {
                tracing::debug!(fixture = %path.display(), url = %request.url, "load fixture");
                std::fs::read_to_string(path)
                    .with_context(|| format!("read fixture: {}", path.display()))?
            }
            None => self.http.fetch_text(request)?,
        };
        Page::parse(&request.url, request.format, &raw)
    }
}

pub trait Site {
    fn court_id(&self) -> &'static str;

    fn court_name(&self) -> &'static str;

    /// The primary page request for this run.
    fn request(&self, config: &ScrapeConfig) -> PageRequest;

    fn fetch(&self, ctx: &SiteContext) -> anyhow::Result<Page> {
        ctx.load(&self.request(&ctx.config))
    }

    fn extract(&self, page: &Page) -> anyhow::Result<CaseColumns>;

    fn post_process(&self, _columns: &mut CaseColumns, _ctx: &SiteContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Pulls citation metadata out of an opinion's full text.
    fn extract_from_text(&self, _text: &str) -> OpinionMetadata {
        OpinionMetadata::default()
    }
}

/// Runs one adapter end to end: fetch, extract, post-process.
pub fn scrape(site: &dyn Site, ctx: &SiteContext) -> anyhow::Result<Vec<CaseRecord>> {
    let court = site.court_id();
    let page = site
        .fetch(ctx)
        .with_context(|| format!("fetch {court}"))?;

    let mut columns = site
        .extract(&page)
        .with_context(|| format!("extract {court}"))?;
    columns
        .ensure_aligned()
        .with_context(|| format!("extract {court}"))?;
    let extracted = columns.len();

    site.post_process(&mut columns, ctx)
        .with_context(|| format!("post-process {court}"))?;
    let records = columns
        .into_records()
        .with_context(|| format!("post-process {court}"))?;

    tracing::info!(court, extracted, kept = records.len(), "scraped cases");
    Ok(records)
}
