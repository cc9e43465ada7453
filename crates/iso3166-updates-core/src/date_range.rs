// crates/iso3166-updates-core/src/date_range.rs

//! # Date Range Parser
//!
//! Flexible date parsing for the `date_range` filter and for the `Date
//! Issued` column of the change log.

use crate::error::{Result, UpdatesError};
use crate::model::ChangeRecord;
use crate::text::decode_param;
use chrono::NaiveDate;
use serde::Serialize;

/// Accepted input layouts, tried in declaration order; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `2020-05-17`
    Iso,
    /// `17 May 2020`, `17 may 2020`, `17 Sep 2020`
    DayMonthName,
    /// `2020-17-05`, only when the middle field cannot be a month.
    IsoDayFirst,
    /// `17/05/2020`
    Slashed,
    /// `17-05-2020`
    Dashed,
    /// `20-05-17`, two-digit year.
    ShortIso,
}

impl DateFormat {
    pub const ALL: [DateFormat; 6] = [
        DateFormat::Iso,
        DateFormat::DayMonthName,
        DateFormat::IsoDayFirst,
        DateFormat::Slashed,
        DateFormat::Dashed,
        DateFormat::ShortIso,
    ];

    /// Parse `s` strictly in this layout.
    pub fn parse(self, s: &str) -> Option<NaiveDate> {
        match self {
            DateFormat::Iso => {
                let [y, m, d] = fields(s, '-')?;
                (y.len() == 4 && short(m) && short(d)).then(|| ymd(y, m, d))?
            }
            DateFormat::DayMonthName => NaiveDate::parse_from_str(s, "%d %B %Y").ok(),
            DateFormat::IsoDayFirst => {
                let [y, d, m] = fields(s, '-')?;
                let day: u32 = d.parse().ok()?;
                (y.len() == 4 && short(m) && short(d) && day > 12).then(|| ymd(y, m, d))?
            }
            DateFormat::Slashed => {
                let [d, m, y] = fields(s, '/')?;
                (y.len() == 4 && short(m) && short(d)).then(|| ymd(y, m, d))?
            }
            DateFormat::Dashed => {
                let [d, m, y] = fields(s, '-')?;
                (y.len() == 4 && short(m) && short(d)).then(|| ymd(y, m, d))?
            }
            DateFormat::ShortIso => {
                let [y, m, d] = fields(s, '-')?;
                if y.len() != 2 || !short(m) || !short(d) {
                    return None;
                }
                let yy: i32 = y.parse().ok()?;
                // Same pivot as strptime's %y.
                let year = if yy < 69 { 2000 + yy } else { 1900 + yy };
                NaiveDate::from_ymd_opt(year, m.parse().ok()?, d.parse().ok()?)
            }
        }
    }
}

fn fields(s: &str, sep: char) -> Option<[&str; 3]> {
    let mut it = s.split(sep);
    let out = [it.next()?, it.next()?, it.next()?];
    if it.next().is_some() || out.iter().any(|f| !f.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    Some(out)
}

fn short(field: &str) -> bool {
    (1..=2).contains(&field.len())
}

fn ymd(y: &str, m: &str, d: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
}

/// Parse a single date in any of the [`DateFormat`] layouts.
///
/// ```rust
/// use chrono::NaiveDate;
/// use iso3166_updates_core::date_range::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2020, 5, 17).unwrap();
/// assert_eq!(parse_date("2020-05-17").unwrap(), expected);
/// assert_eq!(parse_date("17 May 2020").unwrap(), expected);
/// assert_eq!(parse_date("2020-17-05").unwrap(), expected);
/// assert_eq!(parse_date("17/05/2020").unwrap(), expected);
/// assert!(parse_date("May 2020").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let s = input.trim();
    DateFormat::ALL
        .iter()
        .find_map(|fmt| fmt.parse(s))
        .ok_or_else(|| UpdatesError::InvalidDateFormat(input.to_string()))
}

/// Inclusive `[start, end]` date window, `start <= end` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if they are reversed.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            DateRange { start: a, end: b }
        } else {
            DateRange { start: b, end: a }
        }
    }

    /// Parse `"<date>"` or `"<date>,<date>"`.
    ///
    /// A single date runs up to `today`. Two dates may come in either order.
    pub fn parse(expr: &str, today: NaiveDate) -> Result<Self> {
        let decoded = decode_param(expr);
        if decoded.is_empty() {
            return Err(UpdatesError::EmptyParameter("date_range".to_string()));
        }

        let parts: Vec<&str> = decoded.split(',').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(UpdatesError::InvalidDateFormat(expr.to_string()));
        }
        match parts.as_slice() {
            [single] => Ok(DateRange::new(parse_date(single)?, today)),
            [first, second] => Ok(DateRange::new(parse_date(first)?, parse_date(second)?)),
            _ => Err(UpdatesError::InvalidDateFormat(expr.to_string())),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// A record matches on its primary date, or failing that on its
    /// corrected date.
    pub fn matches(&self, record: &ChangeRecord) -> bool {
        let issued = &record.date_issued;
        self.contains(issued.primary) || issued.corrected.is_some_and(|c| self.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_are_tried_in_order() {
        let expected = date(2019, 3, 4);
        assert_eq!(parse_date("2019-03-04").unwrap(), expected);
        assert_eq!(parse_date("4 March 2019").unwrap(), expected);
        assert_eq!(parse_date("04 Mar 2019").unwrap(), expected);
        assert_eq!(parse_date("04/03/2019").unwrap(), expected);
        assert_eq!(parse_date("04-03-2019").unwrap(), expected);
        assert_eq!(parse_date("19-03-04").unwrap(), expected);
        // Ambiguous middle field stays year-month-day.
        assert_eq!(parse_date("2019-04-03").unwrap(), date(2019, 4, 3));
        // Middle field above 12 must be the day.
        assert_eq!(parse_date("2019-25-03").unwrap(), date(2019, 3, 25));
    }

    #[test]
    fn unparseable_dates_report_input() {
        for bad in ["", "2019", "2019-13-45", "32/01/2019", "yesterday", "2019-01-01-01"] {
            match parse_date(bad) {
                Err(UpdatesError::InvalidDateFormat(input)) => assert_eq!(input, bad),
                other => panic!("{bad}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn reversed_range_is_swapped() {
        let today = date(2024, 6, 1);
        let range = DateRange::parse("2020-01-01,2019-01-01", today).unwrap();
        assert_eq!(range.start, date(2019, 1, 1));
        assert_eq!(range.end, date(2020, 1, 1));
    }

    #[test]
    fn single_date_runs_to_today() {
        let today = date(2024, 6, 1);
        let range = DateRange::parse("2023-01-01", today).unwrap();
        assert_eq!(range, DateRange::new(date(2023, 1, 1), today));
        assert!(range.contains(today));
        assert!(!range.contains(date(2022, 12, 31)));
    }

    #[test]
    fn encoded_and_mixed_formats() {
        let today = date(2024, 6, 1);
        let range = DateRange::parse("01%20May%202020, 2021-01-01", today).unwrap();
        assert_eq!(range.start, date(2020, 5, 1));
        assert_eq!(range.end, date(2021, 1, 1));
    }

    #[test]
    fn too_many_dates_or_empty() {
        let today = date(2024, 6, 1);
        assert!(matches!(
            DateRange::parse("2020-01-01,2021-01-01,2022-01-01", today),
            Err(UpdatesError::InvalidDateFormat(_))
        ));
        for dangling in ["2019-01-01,", ",2019-01-01", "2019-01-01, ,"] {
            match DateRange::parse(dangling, today) {
                Err(UpdatesError::InvalidDateFormat(input)) => assert_eq!(input, dangling),
                other => panic!("{dangling}: unexpected {other:?}"),
            }
        }
        assert!(matches!(
            DateRange::parse(" ", today),
            Err(UpdatesError::EmptyParameter(_))
        ));
    }
}
