use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Calendar-date forms, tried in order. Month-first only; no day-first guessing.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y"];

/// Date-time forms; the time part is discarded.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a filing date leniently. Returns `None` for anything unrecognized.
///
/// A bare `YYYY-MM` is the first of that month and a bare `YYYY` is 1 January.
pub fn parse_filing_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    {
        return Some(date);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.date());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    parse_year_month(text)
}

fn parse_year_month(text: &str) -> Option<NaiveDate> {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let (year, month) = match text.split_once('-') {
        Some((y, m)) if m.len() <= 2 && all_digits(m) => (y, m.parse().ok()?),
        Some(_) => return None,
        None => (text, 1),
    };
    if year.len() != 4 || !all_digits(year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}
