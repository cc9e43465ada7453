// crates/iso3166-updates-core/src/temporal.rs
use crate::date_range::DateRange;
use crate::error::{Result, UpdatesError};
use crate::model::ChangeRecord;
use crate::text::decode_param;
use crate::year::YearPredicate;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Whole calendar months from `date` to `reference`; negative when `date`
/// lies after `reference`.
pub fn diff_months(reference: NaiveDate, date: NaiveDate) -> i64 {
    let years = i64::from(reference.year()) - i64::from(date.year());
    let months = i64::from(reference.month()) - i64::from(date.month());
    months + 12 * years
}

/// `months` filter: either an upper bound (`"12"`) or an inclusive window
/// (`"12-24"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MonthWindow {
    UpTo(u32),
    Between(u32, u32),
}

impl MonthWindow {
    /// ```rust
    /// use iso3166_updates_core::temporal::MonthWindow;
    ///
    /// assert_eq!(MonthWindow::parse("12").unwrap(), MonthWindow::UpTo(12));
    /// assert_eq!(MonthWindow::parse("36-12").unwrap(), MonthWindow::Between(12, 36));
    /// assert!(MonthWindow::parse("twelve").is_err());
    /// ```
    pub fn parse(expr: &str) -> Result<Self> {
        let decoded = decode_param(expr);
        if decoded.is_empty() {
            return Err(UpdatesError::EmptyParameter("months".to_string()));
        }
        let number = |s: &str| {
            s.trim()
                .parse::<u32>()
                .map_err(|_| UpdatesError::InvalidMonths(expr.to_string()))
        };

        match decoded.split_once('-') {
            None => Ok(MonthWindow::UpTo(number(&decoded)?)),
            Some((a, b)) => {
                let (a, b) = (number(a)?, number(b)?);
                Ok(MonthWindow::Between(a.min(b), a.max(b)))
            }
        }
    }

    pub fn contains(&self, months: i64) -> bool {
        match *self {
            MonthWindow::UpTo(n) => months <= i64::from(n),
            MonthWindow::Between(lo, hi) => i64::from(lo) <= months && months <= i64::from(hi),
        }
    }
}

/// The one temporal predicate a query may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TemporalFilter {
    Year(YearPredicate),
    DateRange(DateRange),
    Months(MonthWindow),
}

impl TemporalFilter {
    /// Evaluate the filter against one record.
    ///
    /// Year and month filters use the primary issue date only; a date range
    /// also accepts the corrected date.
    pub fn matches(&self, record: &ChangeRecord, reference: NaiveDate) -> bool {
        match self {
            TemporalFilter::Year(predicate) => predicate.matches_record(record),
            TemporalFilter::DateRange(range) => range.matches(record),
            TemporalFilter::Months(window) => {
                window.contains(diff_months(reference, record.date_issued.primary))
            }
        }
    }
}
