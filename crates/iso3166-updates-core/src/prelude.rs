//! iso3166-updates prelude: bring common types and traits into scope for demos.

#![allow(unused_imports)]

pub use crate::common::DatasetStats;
pub use crate::config::EngineConfig;
pub use crate::date_range::{parse_date, DateRange};
pub use crate::error::{Result, UpdatesError};
pub use crate::fuzzy::{MatchResult, NameMatcher};
#[cfg(feature = "fetch")]
pub use crate::loader::HttpLoader;
#[cfg(feature = "json")]
pub use crate::loader::FileLoader;
pub use crate::loader::StaticLoader;
pub use crate::model::{ChangeRecord, CountryDataset, IssueDate};
pub use crate::query::{QueryEngine, QueryFilters, QueryOutput, SortOrder, TaggedRecord};
pub use crate::registry::{CountryCode, CountryEntry, Registry};
pub use crate::search::{SearchHit, SearchHits};
pub use crate::store::UpdateStore;
pub use crate::temporal::{MonthWindow, TemporalFilter};
pub use crate::text::{fold_key, match_key, similarity};
pub use crate::traits::{DatasetLoader, NameMatch};
pub use crate::year::YearPredicate;
