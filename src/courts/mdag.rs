//! Maryland Attorney General opinions, served from a SharePoint list view.

use anyhow::Context as _;
use serde::Deserialize;

use crate::columns::CaseColumns;
use crate::formats::{CaseRecord, PrecedentialStatus};
use crate::http::{PageFormat, PageRequest};
use crate::site::{Page, ScrapeConfig, Site};
use crate::text::parse_date;

pub const HOST: &str = "https://www.marylandattorneygeneral.gov";
pub const LIST_VIEW_URL: &str = "https://www.marylandattorneygeneral.gov/_layouts/15/inplview.aspx";

const LIST_ID: &str = "{1BA692B1-E50C-4754-AADD-E6753F46B403}";
const VIEW_ID: &str = "{E1A60D10-12C0-4029-8BE0-BA5F9AC93BF8}";
const RESULT_LIMIT: &str = "50";

#[derive(Debug, Default, Deserialize)]
struct ListView {
    #[serde(rename = "Row", default)]
    rows: Vec<ListRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListRow {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Summary")]
    summary: Option<String>,
    #[serde(rename = "FileLeafRef.Name")]
    file_name: Option<String>,
    #[serde(rename = "FileRef.urlencodeasurl")]
    file_ref: Option<String>,
    #[serde(rename = "Created_x0020_Date")]
    created: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MdAg {
    url: String,
}

impl Default for MdAg {
    fn default() -> Self {
        Self::with_url(LIST_VIEW_URL)
    }
}

impl MdAg {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// The list view prefixes the creation date with a three character lookup
/// id (`1;#2022-06-15 09:30:00`); the date itself is the next ten characters.
fn created_date(raw: &str) -> Option<chrono::NaiveDate> {
    let day = raw.chars().skip(3).take(10).collect::<String>();
    parse_date(&day)
}

impl Site for MdAg {
    fn court_id(&self) -> &'static str {
        "mdag"
    }

    fn court_name(&self) -> &'static str {
        "Maryland Attorney General"
    }

    fn request(&self, config: &ScrapeConfig) -> PageRequest {
        PageRequest::post(&self.url, PageFormat::Json).with_query([
            ("List", LIST_ID.to_owned()),
            ("View", VIEW_ID.to_owned()),
            ("ViewCount", RESULT_LIMIT.to_owned()),
            ("IsXslView", "TRUE".to_owned()),
            ("IsCSR", "TRUE".to_owned()),
            ("GroupString", format!(";#{};#", config.year)),
            ("IsGroupRender", "TRUE".to_owned()),
        ])
    }

    fn extract(&self, page: &Page) -> anyhow::Result<CaseColumns> {
        let view = ListView::deserialize(page.json()?)
            .with_context(|| format!("decode list view from {}", page.url))?;

        let mut columns = CaseColumns::default();
        for row in view.rows {
            let created = row.created.unwrap_or_default();
            let date = created_date(&created);
            if date.is_none() {
                tracing::debug!(created = %created, "unreadable creation date");
            }
            let mut record = CaseRecord::new(
                row.title.unwrap_or_default(),
                row.file_name.unwrap_or_default(),
                date,
                format!("{HOST}{}", row.file_ref.unwrap_or_default()),
                PrecedentialStatus::Published,
            );
            record.summary = row.summary;
            columns.push(record);
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> anyhow::Result<Page> {
        Page::parse(LIST_VIEW_URL, PageFormat::Json, body)
    }

    #[test]
    fn maps_each_row_to_one_case() -> anyhow::Result<()> {
        let body = r#"{"Row": [
            {"Title": "107 OAG 3", "Summary": "Public Ethics",
             "FileLeafRef.Name": "107OAG3.pdf",
             "FileRef.urlencodeasurl": "/Opinions%20Documents/2022/107OAG3.pdf",
             "Created_x0020_Date": "1;#2022-02-07 10:15:00"},
            {"Title": "107 OAG 4", "Summary": null,
             "FileLeafRef.Name": "107OAG4.pdf",
             "FileRef.urlencodeasurl": "/Opinions%20Documents/2022/107OAG4.pdf",
             "Created_x0020_Date": "2;#2022-03-21 16:02:11"}
        ]}"#;
        let records = MdAg::default().extract(&page(body)?)?.into_records()?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].docket, "107 OAG 3");
        assert_eq!(records[0].name, "107OAG3.pdf");
        assert_eq!(
            records[0].url,
            "https://www.marylandattorneygeneral.gov/Opinions%20Documents/2022/107OAG3.pdf"
        );
        assert_eq!(records[0].summary.as_deref(), Some("Public Ethics"));
        assert_eq!(
            records[0].date,
            chrono::NaiveDate::from_ymd_opt(2022, 2, 7)
        );
        assert_eq!(
            records[1].date,
            chrono::NaiveDate::from_ymd_opt(2022, 3, 21)
        );
        assert_eq!(records[1].summary, None);
        Ok(())
    }

    #[test]
    fn missing_row_array_yields_no_cases() -> anyhow::Result<()> {
        let columns = MdAg::default().extract(&page(r#"{"FirstRow": 1}"#)?)?;
        assert!(columns.is_empty());
        Ok(())
    }

    #[test]
    fn query_carries_year_group() {
        let config = ScrapeConfig {
            year: 2021,
            ..ScrapeConfig::default()
        };
        let request = MdAg::default().request(&config);
        assert!(
            request
                .query
                .contains(&("GroupString".to_owned(), ";#2021;#".to_owned()))
        );
        assert!(
            request
                .query
                .contains(&("ViewCount".to_owned(), "50".to_owned()))
        );
    }
}
