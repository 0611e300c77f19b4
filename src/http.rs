use std::time::Duration;

use anyhow::Context as _;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};

pub const DEFAULT_USER_AGENT: &str = "opinionscrape/0.1";

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Html,
    Json,
}

impl PageFormat {
    fn accept(&self) -> &'static str {
        match self {
            PageFormat::Html => "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            PageFormat::Json => "application/json,*/*;q=0.8",
        }
    }
}

/// Describes one page fetch; built fresh by the adapter for every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    pub format: PageFormat,
}

impl PageRequest {
    pub fn get(url: impl Into<String>, format: PageFormat) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            form: Vec::new(),
            format,
        }
    }

    pub fn post(url: impl Into<String>, format: PageFormat) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(url, format)
        }
    }

    pub fn with_query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_form<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.form
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Blocking session shared by every request of one run. Cookies persist
/// between requests so form round trips keep their server-side session.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::blocking::Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .cookie_store(true)
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn fetch_text(&self, request: &PageRequest) -> anyhow::Result<String> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        let mut builder = builder
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, request.format.accept());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        let method = match request.method {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        tracing::debug!(url = %request.url, method, "fetch page");
        let response = builder
            .send()
            .with_context(|| format!("{method} {}", request.url))?;

        let status = response.status();
        let body = response
            .text()
            .with_context(|| format!("read response body: {}", request.url))?;
        if !status.is_success() {
            anyhow::bail!("{method} {} returned {status}", request.url);
        }
        Ok(body)
    }
}

/// Decides whether a linked document can be fetched.
pub trait LinkChecker {
    fn is_reachable(&self, url: &str) -> anyhow::Result<bool>;
}

/// HEAD request without following redirects; only a plain 200 counts.
#[derive(Debug, Clone)]
pub struct HeadChecker {
    client: reqwest::blocking::Client,
    user_agent: String,
}

impl HeadChecker {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("build link check http client")?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

impl LinkChecker for HeadChecker {
    fn is_reachable(&self, url: &str) -> anyhow::Result<bool> {
        let response = self
            .client
            .head(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .with_context(|| format!("HEAD {url}"))?;
        let status = response.status();
        tracing::debug!(url, %status, "link check");
        Ok(status == StatusCode::OK)
    }
}

/// Skips link checks entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeReachable;

impl LinkChecker for AssumeReachable {
    fn is_reachable(&self, _url: &str) -> anyhow::Result<bool> {
        Ok(true)
    }
}

impl<F> LinkChecker for F
where
    F: Fn(&str) -> anyhow::Result<bool>,
{
    fn is_reachable(&self, url: &str) -> anyhow::Result<bool> {
        self(url)
    }
}
