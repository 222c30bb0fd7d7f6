use chrono::{Datelike, Days, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const FULL_DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y", "%b %d, %Y", "%B %d, %Y"];
const MONTH_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})").expect("valid regex"));

/// A publication date normalized to a calendar day. Partial dates are
/// pinned to the first day of their month or year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationDate {
    pub date: NaiveDate,
    pub year: i32,
}

impl PublicationDate {
    fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            year: date.year(),
        }
    }

    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Parses the date shapes bibliographic sources emit: `2024-03-05`,
/// `2024/03/05`, `2024-03`, `2024/03`, `2024`, `05 Mar 2024`, `Mar 5, 2024`,
/// `March 5, 2024`. Anything else falls back to its first four-digit year.
pub fn parse_publication_date(input: &str) -> Option<PublicationDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(PublicationDate::from_date(date));
        }
    }

    let separator = if trimmed.contains('/') { '/' } else { '-' };
    let day_padded = format!("{trimmed}{separator}01");
    for format in MONTH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&day_padded, format) {
            return Some(PublicationDate::from_date(date));
        }
    }

    let year: i32 = YEAR_RE.captures(trimmed)?.get(1)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1).map(PublicationDate::from_date)
}

/// Inclusive publication window handed to candidate sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SearchWindow {
    /// The last `days` days ending today (UTC).
    pub fn last_days(days: u32) -> Self {
        search_window(days, Utc::now().date_naive())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// ISO `YYYY-MM-DD` bounds.
    pub fn iso_bounds(&self) -> (String, String) {
        (
            self.start.format("%Y-%m-%d").to_string(),
            self.end.format("%Y-%m-%d").to_string(),
        )
    }
}

pub fn search_window(days: u32, today: NaiveDate) -> SearchWindow {
    let start = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    SearchWindow { start, end: today }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(input: &str) -> Option<(String, i32)> {
        parse_publication_date(input).map(|d| (d.iso(), d.year))
    }

    #[test]
    fn full_dates() {
        assert_eq!(iso("2024-03-05"), Some(("2024-03-05".to_string(), 2024)));
        assert_eq!(iso("2024/03/05"), Some(("2024-03-05".to_string(), 2024)));
        assert_eq!(iso("05 Mar 2024"), Some(("2024-03-05".to_string(), 2024)));
        assert_eq!(iso("Mar 05, 2024"), Some(("2024-03-05".to_string(), 2024)));
        assert_eq!(iso("March 05, 2024"), Some(("2024-03-05".to_string(), 2024)));
    }

    #[test]
    fn partial_dates_pin_to_first_day() {
        assert_eq!(iso("2024-03"), Some(("2024-03-01".to_string(), 2024)));
        assert_eq!(iso("2024/11"), Some(("2024-11-01".to_string(), 2024)));
        assert_eq!(iso("2024"), Some(("2024-01-01".to_string(), 2024)));
    }

    #[test]
    fn falls_back_to_embedded_year() {
        assert_eq!(iso("Spring 2023"), Some(("2023-01-01".to_string(), 2023)));
        assert_eq!(iso("2024-13-45"), Some(("2024-01-01".to_string(), 2024)));
        assert_eq!(iso("n.d."), None);
        assert_eq!(iso(""), None);
    }

    #[test]
    fn window_covers_requested_days() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let window = search_window(30, today);
        assert_eq!(
            window.iso_bounds(),
            ("2026-02-08".to_string(), "2026-03-10".to_string())
        );
        assert!(window.contains(today));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2026, 2, 7).unwrap()));
    }
}
