use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PrecedentialStatus {
    Published,
    Unpublished,
    Separate,
    Unknown,
}

/// One case as handed to the downstream pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseRecord {
    pub docket: String,
    pub name: String,
    /// `None` when the court's date text could not be parsed.
    pub date: Option<NaiveDate>,
    pub url: String,
    pub status: PrecedentialStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral_citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nature_of_suit: Option<String>,
}

impl CaseRecord {
    pub fn new(
        docket: impl Into<String>,
        name: impl Into<String>,
        date: Option<NaiveDate>,
        url: impl Into<String>,
        status: PrecedentialStatus,
    ) -> Self {
        Self {
            docket: docket.into(),
            name: name.into(),
            date,
            url: url.into(),
            status,
            summary: None,
            judge: None,
            neutral_citation: None,
            nature_of_suit: None,
        }
    }
}

/// Metadata recovered from the full text of one opinion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpinionMetadata {
    #[serde(
        rename = "OpinionCluster",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cluster: Option<ClusterMetadata>,
    #[serde(rename = "Citation", default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<CitationMetadata>,
}

impl OpinionMetadata {
    pub fn is_empty(&self) -> bool {
        self.cluster.is_none() && self.citation.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterMetadata {
    pub docket_number: String,
    pub headnotes: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CitationMetadata {
    pub volume: String,
    pub reporter: String,
    pub page: String,
    /// Citation type code; 2 is a state reporter.
    #[serde(rename = "type")]
    pub citation_type: u8,
}
