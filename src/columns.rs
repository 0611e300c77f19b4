//! Column store for case fields.
//!
//! Adapters that read one field at a time across the whole page fill these
//! parallel sequences directly; adapters that build whole records go through
//! [`CaseColumns::from_records`]. Index `i` of every present column describes
//! the same case.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::formats::{CaseRecord, PrecedentialStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseColumns {
    pub names: Vec<String>,
    pub urls: Vec<String>,
    pub dates: Vec<Option<NaiveDate>>,
    pub dockets: Vec<String>,
    pub statuses: Vec<PrecedentialStatus>,
    pub summaries: Option<Vec<String>>,
    pub judges: Option<Vec<String>>,
    pub neutral_citations: Option<Vec<String>>,
    pub natures_of_suit: Option<Vec<String>>,
}

impl CaseColumns {
    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        let mut columns = Self::default();
        for record in records {
            columns.push(record);
        }
        columns
    }

    /// Appends one record. Optional columns are created on first use and
    /// back-filled with empty strings so they stay aligned.
    pub fn push(&mut self, record: CaseRecord) {
        let index = self.names.len();
        self.names.push(record.name);
        self.urls.push(record.url);
        self.dates.push(record.date);
        self.dockets.push(record.docket);
        self.statuses.push(record.status);
        push_optional(&mut self.summaries, index, record.summary);
        push_optional(&mut self.judges, index, record.judge);
        push_optional(&mut self.neutral_citations, index, record.neutral_citation);
        push_optional(&mut self.natures_of_suit, index, record.nature_of_suit);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Fails if any present column disagrees with `names` on length.
    pub fn ensure_aligned(&self) -> anyhow::Result<()> {
        let expected = self.names.len();
        let lengths = [
            ("urls", Some(self.urls.len())),
            ("dates", Some(self.dates.len())),
            ("dockets", Some(self.dockets.len())),
            ("statuses", Some(self.statuses.len())),
            ("summaries", self.summaries.as_ref().map(Vec::len)),
            ("judges", self.judges.as_ref().map(Vec::len)),
            (
                "neutral_citations",
                self.neutral_citations.as_ref().map(Vec::len),
            ),
            ("natures_of_suit", self.natures_of_suit.as_ref().map(Vec::len)),
        ];
        for (column, len) in lengths {
            if let Some(len) = len
                && len != expected
            {
                anyhow::bail!(
                    "misaligned case columns: {column} has {len} entries, names has {expected}"
                );
            }
        }
        Ok(())
    }

    /// Drops the given indices from every column at once.
    pub fn remove_indices(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let drop: BTreeSet<usize> = indices.iter().copied().collect();
        retain_except(&mut self.names, &drop);
        retain_except(&mut self.urls, &drop);
        retain_except(&mut self.dates, &drop);
        retain_except(&mut self.dockets, &drop);
        retain_except(&mut self.statuses, &drop);
        if let Some(column) = self.summaries.as_mut() {
            retain_except(column, &drop);
        }
        if let Some(column) = self.judges.as_mut() {
            retain_except(column, &drop);
        }
        if let Some(column) = self.neutral_citations.as_mut() {
            retain_except(column, &drop);
        }
        if let Some(column) = self.natures_of_suit.as_mut() {
            retain_except(column, &drop);
        }
    }

    pub fn into_records(self) -> anyhow::Result<Vec<CaseRecord>> {
        self.ensure_aligned()?;

        let mut summaries = self.summaries.map(Vec::into_iter);
        let mut judges = self.judges.map(Vec::into_iter);
        let mut neutral_citations = self.neutral_citations.map(Vec::into_iter);
        let mut natures_of_suit = self.natures_of_suit.map(Vec::into_iter);

        let records = self
            .names
            .into_iter()
            .zip(self.urls)
            .zip(self.dates)
            .zip(self.dockets)
            .zip(self.statuses)
            .map(|((((name, url), date), docket), status)| CaseRecord {
                docket,
                name,
                date,
                url,
                status,
                summary: next_present(&mut summaries),
                judge: next_present(&mut judges),
                neutral_citation: next_present(&mut neutral_citations),
                nature_of_suit: next_present(&mut natures_of_suit),
            })
            .collect();
        Ok(records)
    }
}

fn next_present(column: &mut Option<std::vec::IntoIter<String>>) -> Option<String> {
    column
        .as_mut()
        .and_then(Iterator::next)
        .filter(|value| !value.is_empty())
}

fn push_optional(column: &mut Option<Vec<String>>, index: usize, value: Option<String>) {
    match (column.as_mut(), value) {
        (Some(column), value) => column.push(value.unwrap_or_default()),
        (None, Some(value)) => {
            let mut filled = vec![String::new(); index];
            filled.push(value);
            *column = Some(filled);
        }
        (None, None) => {}
    }
}

fn retain_except<T>(column: &mut Vec<T>, drop: &BTreeSet<usize>) {
    let mut index = 0;
    column.retain(|_| {
        let keep = !drop.contains(&index);
        index += 1;
        keep
    });
}
