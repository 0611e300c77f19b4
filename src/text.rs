//! String helpers shared by the court adapters.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b",
    )
    .expect("month-day-year pattern")
});

static SLASHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("slashed date pattern")
});

static ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("iso date pattern"));

/// Collapses runs of whitespace (non-breaking spaces included) and trims.
pub fn clean_string(input: &str) -> String {
    input
        .split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads a date out of free text.
///
/// Accepts `January 6, 2022` (and abbreviated months), `1/6/2022` and
/// `2022-01-06`, anywhere in the input. When several forms are present a
/// month-name date wins over a slashed one, and a slashed one over ISO,
/// regardless of where each appears.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let candidates = [
        MONTH_DAY_YEAR.captures(input).and_then(|caps| {
            let month = month_number(&caps[1])?;
            NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[2].parse().ok()?)
        }),
        SLASHED.captures(input).and_then(|caps| {
            NaiveDate::from_ymd_opt(
                caps[3].parse().ok()?,
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
            )
        }),
        ISO.captures(input).and_then(|caps| {
            NaiveDate::from_ymd_opt(
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
                caps[3].parse().ok()?,
            )
        }),
    ];
    candidates.into_iter().flatten().next()
}

fn month_number(prefix: &str) -> Option<u32> {
    let month = match prefix.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" | "sept" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Whitespace-insensitive comparison for letter-spaced headings.
pub fn same_ignoring_whitespace(a: &str, b: &str) -> bool {
    let a = a.chars().filter(|c| !c.is_whitespace() && *c != '\u{a0}');
    let b = b.chars().filter(|c| !c.is_whitespace() && *c != '\u{a0}');
    a.eq(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_string_collapses_whitespace() {
        assert_eq!(clean_string("  a\n\t b\u{a0}\u{a0}c  "), "a b c");
        assert_eq!(clean_string("   "), "");
    }

    #[test]
    fn parse_date_handles_month_names() {
        assert_eq!(
            parse_date("Case Announcements for Thursday, January 6, 2022"),
            NaiveDate::from_ymd_opt(2022, 1, 6)
        );
        assert_eq!(
            parse_date("Sept. 30 2021"),
            NaiveDate::from_ymd_opt(2021, 9, 30)
        );
    }

    #[test]
    fn parse_date_handles_numeric_forms() {
        assert_eq!(parse_date("3/14/2022"), NaiveDate::from_ymd_opt(2022, 3, 14));
        assert_eq!(parse_date("2022-06-15"), NaiveDate::from_ymd_opt(2022, 6, 15));
    }

    #[test]
    fn parse_date_rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_date("no date here"), None);
        assert_eq!(parse_date("2/30/2022"), None);
    }

    #[test]
    fn parse_date_prefers_month_names_then_slashes() {
        assert_eq!(
            parse_date("2021-01-01 filed 2/3/2021, decided March 4, 2021"),
            NaiveDate::from_ymd_opt(2021, 3, 4)
        );
        assert_eq!(
            parse_date("2021-01-01 filed 2/3/2021"),
            NaiveDate::from_ymd_opt(2021, 2, 3)
        );
    }

    #[test]
    fn whitespace_insensitive_match() {
        assert!(same_ignoring_whitespace(
            "P U B L I S H E D O P I N I O N S",
            "PUBLISHED OPINIONS"
        ));
        assert!(!same_ignoring_whitespace(
            "UNPUBLISHED OPINIONS",
            "PUBLISHED OPINIONS"
        ));
        assert!(!same_ignoring_whitespace("Published Opinions", "PUBLISHED OPINIONS"));
    }
}
