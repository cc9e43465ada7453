// crates/iso3166-updates-core/src/year.rs

//! # Year Expression Parser
//!
//! Grammar, first match wins:
//!
//! | input            | predicate                 |
//! |------------------|---------------------------|
//! | `<>2010,2012`    | `NotIn({2010, 2012})`     |
//! | `2010-2015`      | `Range(2010, 2015)`       |
//! | `>2010`          | `GreaterOrEqual(2010)`    |
//! | `<2010`          | `LessThan(2010)`          |
//! | `2010,2012`      | `ExactSet({2010, 2012})`  |
//! | `2010`           | `ExactSet({2010})`        |
//!
//! `%3E` / `%3C` escapes are decoded first.

use crate::error::{Result, UpdatesError};
use crate::model::ChangeRecord;
use crate::text::decode_param;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "years")]
pub enum YearPredicate {
    ExactSet(BTreeSet<i32>),
    /// Inclusive on both ends, `lo <= hi`.
    Range(i32, i32),
    GreaterOrEqual(i32),
    LessThan(i32),
    NotIn(BTreeSet<i32>),
}

impl YearPredicate {
    /// Parse a year filter expression.
    ///
    /// ```rust
    /// use iso3166_updates_core::year::YearPredicate;
    ///
    /// assert_eq!(YearPredicate::parse("2015-2010").unwrap(), YearPredicate::Range(2010, 2015));
    /// assert_eq!(YearPredicate::parse("%3E2010").unwrap(), YearPredicate::GreaterOrEqual(2010));
    /// assert!(YearPredicate::parse(">2010-2012").is_err());
    /// ```
    pub fn parse(expr: &str) -> Result<Self> {
        let decoded = decode_param(expr);
        let s = decoded.as_str();
        if s.is_empty() {
            return Err(UpdatesError::EmptyParameter("year".to_string()));
        }
        let invalid = || UpdatesError::InvalidYear(expr.to_string());

        let not_in = s.contains("<>");
        let rest = s.replace("<>", "");
        let range = rest.contains('-');
        let greater = rest.contains('>');
        let less = rest.contains('<');
        let list = rest.contains(',');

        let structural = [not_in, range, greater, less].iter().filter(|b| **b).count();
        if structural > 1 || (list && (range || greater || less)) {
            return Err(UpdatesError::AmbiguousYearExpression(expr.to_string()));
        }

        if not_in {
            let body = s.strip_prefix("<>").ok_or_else(invalid)?;
            if body.contains("<>") {
                return Err(invalid());
            }
            return Ok(YearPredicate::NotIn(year_list(body, expr)?));
        }

        if range {
            let (a, b) = rest.split_once('-').ok_or_else(invalid)?;
            if b.contains('-') {
                return Err(invalid());
            }
            let (a, b) = (year(a, expr)?, year(b, expr)?);
            return Ok(YearPredicate::Range(a.min(b), a.max(b)));
        }

        if greater {
            let body = s.strip_prefix('>').ok_or_else(invalid)?;
            return Ok(YearPredicate::GreaterOrEqual(year(body, expr)?));
        }

        if less {
            let body = s.strip_prefix('<').ok_or_else(invalid)?;
            return Ok(YearPredicate::LessThan(year(body, expr)?));
        }

        Ok(YearPredicate::ExactSet(year_list(s, expr)?))
    }

    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearPredicate::ExactSet(years) => years.contains(&year),
            YearPredicate::Range(lo, hi) => *lo <= year && year <= *hi,
            YearPredicate::GreaterOrEqual(lo) => year >= *lo,
            YearPredicate::LessThan(hi) => year < *hi,
            YearPredicate::NotIn(years) => !years.contains(&year),
        }
    }

    /// Evaluate against the year of the record's primary issue date.
    pub fn matches_record(&self, record: &ChangeRecord) -> bool {
        self.matches(record.date_issued.year())
    }
}

impl FromStr for YearPredicate {
    type Err = UpdatesError;

    fn from_str(s: &str) -> Result<Self> {
        YearPredicate::parse(s)
    }
}

impl fmt::Display for YearPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |years: &BTreeSet<i32>| {
            years
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        match self {
            YearPredicate::ExactSet(years) => write!(f, "{}", join(years)),
            YearPredicate::Range(lo, hi) => write!(f, "{lo}-{hi}"),
            YearPredicate::GreaterOrEqual(lo) => write!(f, ">{lo}"),
            YearPredicate::LessThan(hi) => write!(f, "<{hi}"),
            YearPredicate::NotIn(years) => write!(f, "<>{}", join(years)),
        }
    }
}

/// A single 4-digit year in 1000–2999.
fn year(token: &str, expr: &str) -> Result<i32> {
    let t = token.trim();
    let well_formed = t.len() == 4
        && t.bytes().all(|b| b.is_ascii_digit())
        && matches!(t.as_bytes()[0], b'1' | b'2');
    if !well_formed {
        return Err(UpdatesError::InvalidYear(expr.to_string()));
    }
    t.parse()
        .map_err(|_| UpdatesError::InvalidYear(expr.to_string()))
}

fn year_list(body: &str, expr: &str) -> Result<BTreeSet<i32>> {
    body.split(',').map(|t| year(t, expr)).collect()
}
