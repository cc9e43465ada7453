// crates/iso3166-updates-core/src/traits.rs
use crate::error::Result;
use crate::model::CountryDataset;
use crate::text::{fold_key, match_key};

/// Name-based matching helpers for types that expose a canonical display name.
///
/// This trait centralizes Unicode‑aware, accent-insensitive and case-insensitive
/// comparisons. Implementors provide a `&str` view of their canonical name via
/// [`NameMatch::name_str`], and get convenient helpers:
/// - [`NameMatch::is_named`] — equality on the punctuation-free folded form
/// - [`NameMatch::name_contains`] — substring match on folded form
///
/// # Examples
/// ```rust
/// use iso3166_updates_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Côte d'Ivoire").is_named("cote d ivoire"));
/// assert!(Place("Türkiye").name_contains("turk"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Accent-, case- and punctuation-insensitive name comparison.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        match_key(self.name_str()) == match_key(q)
    }

    /// Accent-insensitive + case-insensitive substring match.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}

/// Source of complete dataset snapshots.
///
/// A load either yields the whole dataset or fails; implementations never
/// hand back a partially parsed mapping.
pub trait DatasetLoader: Send + Sync {
    fn load(&self) -> Result<CountryDataset>;

    /// Human readable origin, used in log lines.
    fn describe(&self) -> String;
}
