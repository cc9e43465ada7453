// crates/iso3166-updates-core/src/registry/mod.rs

//! # Country Code Registry
//!
//! Static mapping between alpha-2, alpha-3 and numeric country codes and the
//! canonical ISO 3166-1 short names. Every [`CountryCode`] in the crate is
//! issued by a [`Registry`], so holding one proves the code exists.

mod data;

use crate::error::{Result, UpdatesError};
use crate::traits::NameMatch;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A validated alpha-2 country code.
///
/// The inner string always borrows from the static country table, which makes
/// the type `Copy` and cheap to use as a map key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CountryCode(&'static str);

impl CountryCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl PartialEq<&str> for CountryCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One row of the country table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountryEntry {
    pub alpha2: CountryCode,
    pub alpha3: Option<&'static str>,
    pub numeric: Option<&'static str>,
    pub name: &'static str,
}

impl NameMatch for CountryEntry {
    fn name_str(&self) -> &str {
        self.name
    }
}

static ENTRIES: Lazy<Vec<CountryEntry>> = Lazy::new(|| {
    data::COUNTRIES
        .iter()
        .map(|&(alpha2, alpha3, numeric, name)| CountryEntry {
            alpha2: CountryCode(alpha2),
            alpha3: (!alpha3.is_empty()).then_some(alpha3),
            numeric: (!numeric.is_empty()).then_some(numeric),
            name,
        })
        .collect()
});

/// Lookup tables over the static country table plus the set of codes that
/// strict contexts must reject.
#[derive(Debug, Clone)]
pub struct Registry {
    by_alpha2: HashMap<&'static str, usize>,
    by_alpha3: HashMap<&'static str, usize>,
    by_numeric: HashMap<&'static str, usize>,
    excluded: BTreeSet<CountryCode>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl Registry {
    /// Build a registry that treats the given alpha-2 codes as excluded in
    /// strict contexts. Unknown codes in the list are ignored.
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_alpha2 = HashMap::with_capacity(ENTRIES.len());
        let mut by_alpha3 = HashMap::with_capacity(ENTRIES.len());
        let mut by_numeric = HashMap::with_capacity(ENTRIES.len());

        for (idx, entry) in ENTRIES.iter().enumerate() {
            by_alpha2.insert(entry.alpha2.as_str(), idx);
            if let Some(a3) = entry.alpha3 {
                by_alpha3.insert(a3, idx);
            }
            if let Some(num) = entry.numeric {
                by_numeric.insert(num, idx);
            }
        }

        let mut registry = Registry {
            by_alpha2,
            by_alpha3,
            by_numeric,
            excluded: BTreeSet::new(),
        };

        for code in excluded {
            let code = code.as_ref().trim().to_ascii_uppercase();
            match registry.lookup(&code) {
                Some(cc) => {
                    registry.excluded.insert(cc);
                }
                None => log::warn!("ignoring unknown excluded country code {code:?}"),
            }
        }
        registry
    }

    /// All rows of the country table, in alpha-2 order.
    pub fn entries(&self) -> &'static [CountryEntry] {
        &ENTRIES
    }

    /// Exact alpha-2 lookup (already upper-cased, no trimming).
    pub fn lookup(&self, alpha2: &str) -> Option<CountryCode> {
        self.by_alpha2.get(alpha2).map(|&idx| ENTRIES[idx].alpha2)
    }

    pub fn entry(&self, code: CountryCode) -> &'static CountryEntry {
        // Codes are only minted from ENTRIES, so the index is present.
        &ENTRIES[self.by_alpha2[code.as_str()]]
    }

    pub fn name(&self, code: CountryCode) -> &'static str {
        self.entry(code).name
    }

    /// Normalize an alpha-2, alpha-3 or numeric code to its alpha-2 form.
    ///
    /// Input is trimmed and case-insensitive. All-digit input is tried as a
    /// numeric code first (zero-padded to three digits), three letters as
    /// alpha-3, two letters as alpha-2.
    ///
    /// ```rust
    /// use iso3166_updates_core::registry::Registry;
    ///
    /// let registry = Registry::default();
    /// assert_eq!(registry.normalize("fra").unwrap(), "FR");
    /// assert_eq!(registry.normalize("250").unwrap(), "FR");
    /// assert_eq!(registry.normalize(" fr ").unwrap(), "FR");
    /// assert!(registry.normalize("FRX").is_err());
    /// ```
    pub fn normalize(&self, code: &str) -> Result<CountryCode> {
        let trimmed = code.trim();
        let invalid = || UpdatesError::InvalidCode(code.to_string());

        if trimmed.is_empty() {
            return Err(UpdatesError::EmptyParameter("country code".to_string()));
        }

        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if trimmed.len() > 3 {
                return Err(invalid());
            }
            let padded = format!("{trimmed:0>3}");
            return self
                .by_numeric
                .get(padded.as_str())
                .map(|&idx| ENTRIES[idx].alpha2)
                .ok_or_else(invalid);
        }

        if !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(invalid());
        }
        let upper = trimmed.to_ascii_uppercase();
        let idx = match upper.len() {
            2 => self.by_alpha2.get(upper.as_str()),
            3 => self.by_alpha3.get(upper.as_str()),
            _ => None,
        };
        idx.map(|&idx| ENTRIES[idx].alpha2).ok_or_else(invalid)
    }

    /// Like [`Registry::normalize`] but also rejects excluded codes.
    pub fn normalize_strict(&self, code: &str) -> Result<CountryCode> {
        let cc = self.normalize(code)?;
        if self.is_excluded(cc) {
            return Err(UpdatesError::InvalidCode(code.to_string()));
        }
        Ok(cc)
    }

    pub fn is_excluded(&self, code: CountryCode) -> bool {
        self.excluded.contains(&code)
    }

    /// Every code in the table, in alpha-2 order.
    pub fn codes(&self) -> impl Iterator<Item = CountryCode> + '_ {
        ENTRIES.iter().map(|e| e.alpha2)
    }

    /// Every code except the excluded ones; used when a query names no
    /// country.
    pub fn strict_codes(&self) -> impl Iterator<Item = CountryCode> + '_ {
        self.codes().filter(move |c| !self.is_excluded(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha3_and_numeric_normalize_to_alpha2() {
        let registry = Registry::default();
        for entry in registry.entries() {
            if let Some(a3) = entry.alpha3 {
                assert_eq!(registry.normalize(a3).unwrap(), entry.alpha2, "{a3}");
                assert_eq!(
                    registry.normalize(&a3.to_lowercase()).unwrap(),
                    entry.alpha2
                );
            }
            if let Some(num) = entry.numeric {
                assert_eq!(registry.normalize(num).unwrap(), entry.alpha2, "{num}");
            }
            assert_eq!(
                registry.normalize(entry.alpha2.as_str()).unwrap(),
                entry.alpha2
            );
        }
    }

    #[test]
    fn numeric_codes_are_zero_padded() {
        let registry = Registry::default();
        assert_eq!(registry.normalize("4").unwrap(), "AF");
        assert_eq!(registry.normalize("04").unwrap(), "AF");
        assert!(registry.normalize("0004").is_err());
        assert!(registry.normalize("999").is_err());
    }

    #[test]
    fn malformed_codes_fail_with_input_embedded() {
        let registry = Registry::default();
        for bad in ["F", "FRAN", "F1", "ZZ", "QQQ"] {
            match registry.normalize(bad) {
                Err(UpdatesError::InvalidCode(input)) => assert_eq!(input, bad),
                other => panic!("{bad}: unexpected {other:?}"),
            }
        }
        assert!(matches!(
            registry.normalize("  "),
            Err(UpdatesError::EmptyParameter(_))
        ));
    }

    #[test]
    fn excluded_codes_only_fail_in_strict_mode() {
        let registry = Registry::new(["xk"]);
        let xk = registry.normalize("XK").unwrap();
        assert!(registry.is_excluded(xk));
        assert!(registry.normalize_strict("XK").is_err());
        assert!(registry.strict_codes().all(|c| c != "XK"));
        assert_eq!(registry.strict_codes().count() + 1, registry.codes().count());
    }

    #[test]
    fn provisional_code_has_no_alpha3_or_numeric() {
        let registry = Registry::default();
        let xk = registry.normalize("xk").unwrap();
        let entry = registry.entry(xk);
        assert!(entry.alpha3.is_none() && entry.numeric.is_none());
        assert!(registry.normalize("XKX").is_err());
    }
}
