// crates/iso3166-updates-core/src/query.rs

//! # Query Engine
//!
//! Combines the registry, the filter parsers, the matchers and the store to
//! answer composite queries. Every call works on one dataset snapshot and
//! touches no shared mutable state, so an engine can be shared across
//! threads and queried in parallel.

use crate::common::DatasetStats;
use crate::config::EngineConfig;
use crate::date_range::DateRange;
use crate::error::{Result, UpdatesError};
use crate::fuzzy::{MatchResult, NameMatcher};
use crate::model::{ChangeRecord, CountryDataset};
use crate::registry::{CountryCode, Registry};
use crate::search::{self, SearchHit, SearchHits};
use crate::store::UpdateStore;
use crate::temporal::{MonthWindow, TemporalFilter};
use crate::traits::DatasetLoader;
use crate::year::YearPredicate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use std::sync::Arc;

/// Filters of one query. Absent fields do not filter.
///
/// String values use the transport grammar (`"2010-2015"`, `">2010"`,
/// `"12-24"`, `"2019-01-01,2020-01-01"`, ...). Each entry of `codes` may
/// itself be a comma-separated list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFilters {
    pub codes: Vec<String>,
    pub years: Option<String>,
    pub names: Option<String>,
    pub months: Option<String>,
    pub date_range: Option<String>,
    pub search: Option<String>,
    /// Likeness for name and search matching; engine default when absent.
    pub likeness: Option<u8>,
    pub exclude_score: bool,
}

impl QueryFilters {
    pub fn with_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codes.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn with_years(mut self, years: impl Into<String>) -> Self {
        self.years = Some(years.into());
        self
    }

    pub fn with_names(mut self, names: impl Into<String>) -> Self {
        self.names = Some(names.into());
        self
    }

    pub fn with_months(mut self, months: impl Into<String>) -> Self {
        self.months = Some(months.into());
        self
    }

    pub fn with_date_range(mut self, range: impl Into<String>) -> Self {
        self.date_range = Some(range.into());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_likeness(mut self, likeness: u8) -> Self {
        self.likeness = Some(likeness);
        self
    }

    pub fn excluding_score(mut self) -> Self {
        self.exclude_score = true;
        self
    }

    fn has_code_filter(&self) -> bool {
        !self.codes.is_empty() || self.names.is_some()
    }

    fn is_empty(&self) -> bool {
        !self.has_code_filter()
            && self.years.is_none()
            && self.months.is_none()
            && self.date_range.is_none()
            && self.search.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Country code order, source order within a country.
    #[default]
    Default,
    DateAsc,
    DateDesc,
}

impl FromStr for SortOrder {
    type Err = UpdatesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(SortOrder::Default),
            "dateasc" => Ok(SortOrder::DateAsc),
            "datedesc" => Ok(SortOrder::DateDesc),
            _ => Err(UpdatesError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// A record flattened out of the per-country mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedRecord {
    #[serde(rename = "Country Code")]
    pub code: CountryCode,
    #[serde(flatten)]
    pub record: ChangeRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    /// `{ "FR": [...], "DE": [...] }`
    ByCode(BTreeMap<CountryCode, Vec<ChangeRecord>>),
    /// Date-sorted records, each tagged with its country.
    Sorted(Vec<TaggedRecord>),
    /// Search hits, best first (or date-sorted when a sort was requested).
    Ranked(Vec<SearchHit>),
}

impl QueryOutput {
    /// Number of records in the output.
    pub fn record_count(&self) -> usize {
        match self {
            QueryOutput::ByCode(map) => map.values().map(Vec::len).sum(),
            QueryOutput::Sorted(list) => list.len(),
            QueryOutput::Ranked(hits) => hits.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            QueryOutput::ByCode(map) => map.is_empty(),
            _ => self.record_count() == 0,
        }
    }

    pub fn by_code(&self) -> Option<&BTreeMap<CountryCode, Vec<ChangeRecord>>> {
        match self {
            QueryOutput::ByCode(map) => Some(map),
            _ => None,
        }
    }
}

pub struct QueryEngine {
    store: Arc<UpdateStore>,
    registry: Registry,
    names: NameMatcher,
    config: EngineConfig,
    reference_date: Option<NaiveDate>,
}

impl QueryEngine {
    pub fn new(store: Arc<UpdateStore>, config: EngineConfig) -> Self {
        let registry = Registry::new(&config.excluded_codes);
        let names = NameMatcher::new(&registry, config.suggestion_threshold);
        QueryEngine {
            store,
            registry,
            names,
            config,
            reference_date: None,
        }
    }

    pub fn from_loader(loader: &dyn DatasetLoader, config: EngineConfig) -> Result<Self> {
        let store = UpdateStore::load(loader)?;
        Ok(QueryEngine::new(Arc::new(store), config))
    }

    /// Pin "today" for month windows and open-ended date ranges.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<UpdateStore> {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<CountryDataset> {
        self.store.snapshot()
    }

    pub fn reload(&self, loader: &dyn DatasetLoader) -> Result<DatasetStats> {
        self.store.reload(loader)
    }

    pub fn normalize_code(&self, code: &str) -> Result<CountryCode> {
        self.registry.normalize(code)
    }

    /// Normalize a list of codes, each entry possibly comma-separated.
    pub fn parse_codes<S: AsRef<str>>(&self, codes: &[S]) -> Result<BTreeSet<CountryCode>> {
        let mut out = BTreeSet::new();
        for token in codes
            .iter()
            .flat_map(|c| c.as_ref().split(','))
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            out.insert(self.registry.normalize(token)?);
        }
        if out.is_empty() {
            return Err(UpdatesError::EmptyParameter("code".to_string()));
        }
        Ok(out)
    }

    /// Resolve country names; see [`NameMatcher::resolve`].
    pub fn match_country_name(&self, input: &str, likeness: Option<u8>) -> Result<Vec<MatchResult>> {
        let likeness = likeness.unwrap_or(self.config.name_likeness);
        self.names.resolve(input, likeness)
    }

    /// Search every record of the current snapshot (excluded codes skipped).
    pub fn search(&self, term: &str, likeness: Option<u8>, exclude_score: bool) -> Result<SearchHits> {
        let snapshot = self.store.snapshot();
        let likeness = likeness.unwrap_or(self.config.search_likeness);
        let records = self
            .registry
            .strict_codes()
            .filter_map(|code| snapshot.get(code).map(|r| (code, r)));
        search::search(records, term, likeness, exclude_score)
    }

    /// Parse the temporal part of a query; at most one kind may be present.
    pub fn temporal_filter(&self, filters: &QueryFilters) -> Result<Option<TemporalFilter>> {
        let present: Vec<&str> = [
            ("year", filters.years.is_some()),
            ("months", filters.months.is_some()),
            ("date_range", filters.date_range.is_some()),
        ]
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| *name)
        .collect();

        if present.len() > 1 {
            return Err(UpdatesError::ConflictingFilters(present.join(", ")));
        }

        if let Some(years) = &filters.years {
            return Ok(Some(TemporalFilter::Year(YearPredicate::parse(years)?)));
        }
        if let Some(months) = &filters.months {
            return Ok(Some(TemporalFilter::Months(MonthWindow::parse(months)?)));
        }
        if let Some(range) = &filters.date_range {
            return Ok(Some(TemporalFilter::DateRange(DateRange::parse(
                range,
                self.today(),
            )?)));
        }
        Ok(None)
    }

    /// Explicit codes and resolved names, merged. `None` when the query names
    /// no country.
    fn code_set(&self, filters: &QueryFilters) -> Result<Option<BTreeSet<CountryCode>>> {
        if !filters.has_code_filter() {
            return Ok(None);
        }
        let mut set = BTreeSet::new();
        if !filters.codes.is_empty() {
            set.extend(self.parse_codes(&filters.codes)?);
        }
        if let Some(names) = &filters.names {
            set.extend(
                self.match_country_name(names, filters.likeness)?
                    .into_iter()
                    .map(|m| m.code),
            );
        }
        Ok(Some(set))
    }

    /// Answer a composite query.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use iso3166_updates_core::prelude::*;
    ///
    /// let registry = Registry::default();
    /// let dataset: CountryDataset = [(
    ///     registry.normalize("FR").unwrap(),
    ///     vec![ChangeRecord::new("2010-05-01", "", "FR-01", "Example").unwrap()],
    /// )]
    /// .into_iter()
    /// .collect();
    ///
    /// let engine = QueryEngine::new(UpdateStore::new(dataset).into(), EngineConfig::default());
    /// let out = engine
    ///     .query(&QueryFilters::default().with_codes(["FRA"]).with_years("2010"), SortOrder::Default)
    ///     .unwrap();
    /// assert_eq!(out.record_count(), 1);
    /// ```
    pub fn query(&self, filters: &QueryFilters, sort: SortOrder) -> Result<QueryOutput> {
        let temporal = self.temporal_filter(filters)?;
        let codes = self.code_set(filters)?;
        let snapshot = self.store.snapshot();
        let reference = self.today();

        log::debug!(
            "query codes={:?} temporal={:?} search={:?} sort={:?}",
            codes,
            temporal,
            filters.search,
            sort
        );

        let candidates: Vec<CountryCode> = match &codes {
            Some(set) => set.iter().copied().collect(),
            None if filters.is_empty() => snapshot.codes().collect(),
            None => self.registry.strict_codes().collect(),
        };

        let mut by_code: BTreeMap<CountryCode, Vec<ChangeRecord>> = BTreeMap::new();
        for code in candidates {
            let records = snapshot.get(code).unwrap_or(&[]);
            let kept: Vec<ChangeRecord> = records
                .iter()
                .filter(|r| temporal.as_ref().map_or(true, |t| t.matches(r, reference)))
                .cloned()
                .collect();
            if !kept.is_empty() {
                by_code.insert(code, kept);
            }
        }

        if let Some(term) = &filters.search {
            let likeness = filters.likeness.unwrap_or(self.config.search_likeness);
            let mut hits: Vec<SearchHit> = search::search(
                by_code.iter().map(|(c, r)| (*c, r.as_slice())),
                term,
                likeness,
                filters.exclude_score,
            )?
            .collect();
            sort_by_date(&mut hits, sort, |h| h.record.date_issued.primary);
            return Ok(QueryOutput::Ranked(hits));
        }

        if sort == SortOrder::Default {
            return Ok(QueryOutput::ByCode(by_code));
        }

        let mut flat: Vec<TaggedRecord> = by_code
            .into_iter()
            .flat_map(|(code, records)| {
                records
                    .into_iter()
                    .map(move |record| TaggedRecord { code, record })
            })
            .collect();
        sort_by_date(&mut flat, sort, |t| t.record.date_issued.primary);
        Ok(QueryOutput::Sorted(flat))
    }
}

/// Stable sort on the primary issue date; `Default` leaves the order alone.
fn sort_by_date<T>(items: &mut [T], sort: SortOrder, key: impl Fn(&T) -> NaiveDate) {
    match sort {
        SortOrder::Default => {}
        SortOrder::DateAsc => items.sort_by_key(|i| key(i)),
        SortOrder::DateDesc => items.sort_by_key(|i| std::cmp::Reverse(key(i))),
    }
}
