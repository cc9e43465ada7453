// crates/iso3166-updates-core/src/model.rs
use crate::common::DatasetStats;
use crate::date_range::parse_date;
use crate::error::{Result, UpdatesError};
use crate::registry::{CountryCode, Registry};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `Date Issued` cell of a change record.
///
/// Source values look like `2019-11-22` or `2019-11-22 (corrected
/// 2019-11-25)`. The original text is kept for serialization; both dates are
/// parsed once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueDate {
    raw: String,
    pub primary: NaiveDate,
    pub corrected: Option<NaiveDate>,
}

impl IssueDate {
    /// Parse a `Date Issued` cell. Stray line breaks are dropped; a
    /// corrected date that does not parse is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.split_whitespace().collect::<Vec<_>>().join(" ");
        let (primary_part, annotation) = match raw.split_once('(') {
            Some((head, tail)) => (head.trim(), Some(tail)),
            None => (raw.as_str(), None),
        };

        let primary = parse_date(primary_part)
            .map_err(|_| UpdatesError::InvalidDateFormat(input.to_string()))?;

        let corrected = annotation.and_then(|tail| {
            let inner = tail.trim_end().trim_end_matches(')').trim();
            let inner = match inner.get(..9) {
                Some(prefix) if prefix.eq_ignore_ascii_case("corrected") => inner[9..].trim(),
                _ => inner,
            };
            parse_date(inner).ok()
        });

        Ok(IssueDate {
            raw,
            primary,
            corrected,
        })
    }

    /// Year of the primary date. Year filters never look at the corrected
    /// date.
    pub fn year(&self) -> i32 {
        self.primary.year()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl TryFrom<String> for IssueDate {
    type Error = UpdatesError;

    fn try_from(value: String) -> Result<Self> {
        IssueDate::parse(&value)
    }
}

impl From<IssueDate> for String {
    fn from(value: IssueDate) -> Self {
        value.raw
    }
}

/// One entry of a country's change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "Date Issued")]
    pub date_issued: IssueDate,
    #[serde(rename = "Edition/Newsletter", default)]
    pub edition: String,
    #[serde(rename = "Code/Subdivision Change", default)]
    pub code_or_subdivision_change: String,
    #[serde(
        rename = "Description of Change",
        alias = "Description of Change in Newsletter",
        default
    )]
    pub description_of_change: String,
}

impl ChangeRecord {
    pub fn new(
        date_issued: &str,
        edition: impl Into<String>,
        code_or_subdivision_change: impl Into<String>,
        description_of_change: impl Into<String>,
    ) -> Result<Self> {
        Ok(ChangeRecord {
            date_issued: IssueDate::parse(date_issued)?,
            edition: edition.into(),
            code_or_subdivision_change: code_or_subdivision_change.into(),
            description_of_change: description_of_change.into(),
        })
    }
}

/// Dataset exactly as it appears on the wire: alpha-2 string keys.
pub type RawDataset = BTreeMap<String, Vec<ChangeRecord>>;

/// Immutable country code → change log mapping.
///
/// Per-country order is source order. Country order is alpha-2 order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryDataset {
    updates: BTreeMap<CountryCode, Vec<ChangeRecord>>,
}

impl CountryDataset {
    /// Validate the keys of a raw dataset against the registry.
    ///
    /// Keys may be given in any form [`Registry::normalize`] accepts; two
    /// keys that normalize to the same code are rejected.
    pub fn from_raw(raw: RawDataset, registry: &Registry) -> Result<Self> {
        let mut updates = BTreeMap::new();
        for (key, records) in raw {
            let code = registry.normalize(&key).map_err(|_| {
                UpdatesError::InvalidDataset(format!("unknown country code {key:?}"))
            })?;
            if updates.insert(code, records).is_some() {
                return Err(UpdatesError::InvalidDataset(format!(
                    "duplicate entry for country code {code}"
                )));
            }
        }
        Ok(CountryDataset { updates })
    }

    pub fn to_raw(&self) -> RawDataset {
        self.updates
            .iter()
            .map(|(code, records)| (code.to_string(), records.clone()))
            .collect()
    }

    pub fn get(&self, code: CountryCode) -> Option<&[ChangeRecord]> {
        self.updates.get(&code).map(Vec::as_slice)
    }

    pub fn codes(&self) -> impl Iterator<Item = CountryCode> + '_ {
        self.updates.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CountryCode, &[ChangeRecord])> + '_ {
        self.updates.iter().map(|(c, r)| (*c, r.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            countries: self.updates.len(),
            records: self.updates.values().map(Vec::len).sum(),
        }
    }
}

impl FromIterator<(CountryCode, Vec<ChangeRecord>)> for CountryDataset {
    fn from_iter<T: IntoIterator<Item = (CountryCode, Vec<ChangeRecord>)>>(iter: T) -> Self {
        CountryDataset {
            updates: iter.into_iter().collect(),
        }
    }
}
