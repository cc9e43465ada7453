// crates/iso3166-updates-core/src/lib.rs

//! # iso3166-updates-core
//!
//! Query engine over the ISO 3166 change log: every published change to a
//! country's ISO 3166-1 or ISO 3166-2 entry, keyed by alpha-2 code.
//!
//! ```rust
//! use iso3166_updates_core::prelude::*;
//!
//! let engine = QueryEngine::from_loader(&FileLoader::default_dataset(), EngineConfig::default())?;
//! let out = engine.query(
//!     &QueryFilters::default().with_codes(["FRA"]).with_years("2016"),
//!     SortOrder::Default,
//! )?;
//! println!("{}", out.record_count());
//! # Ok::<(), iso3166_updates_core::UpdatesError>(())
//! ```

pub mod common;
pub mod config;
pub mod date_range;
pub mod error;
pub mod fuzzy; // Country name matching
pub mod loader;
pub mod model;
pub mod prelude;
pub mod query;
pub mod registry;
pub mod search; // Free-text search over records
pub mod store;
pub mod temporal;
pub mod text;
pub mod traits;
pub mod year;

// Re-exports
pub use crate::common::DatasetStats;
pub use crate::config::EngineConfig;
pub use crate::error::{Result, UpdatesError};
pub use crate::model::{ChangeRecord, CountryDataset, IssueDate};
pub use crate::query::{QueryEngine, QueryFilters, QueryOutput, SortOrder};
pub use crate::registry::{CountryCode, Registry};
pub use crate::store::UpdateStore;
// Export the traits (needed to call `load` on a loader)
pub use crate::traits::{DatasetLoader, NameMatch};
