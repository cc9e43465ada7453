// crates/iso3166-updates-core/src/fuzzy.rs

//! # Fuzzy Name Matcher
//!
//! Resolves free-text country names to alpha-2 codes. Input goes through
//! three steps:
//! 1. decode and title-case, split multi-name input on commas while keeping
//!    canonical names such as `Korea, Republic of` intact
//! 2. resolve common short names through the alias table
//! 3. score against every canonical name and keep candidates at or above the
//!    requested likeness

use crate::error::{Result, UpdatesError};
use crate::registry::{CountryCode, Registry};
use crate::text::{decode_param, match_key, ratio, title_case};
use crate::traits::NameMatch;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Common names that differ from the ISO short name: `(alias, canonical)`.
static ALIASES: &[(&str, &str)] = &[
    ("South Korea", "Korea, Republic of"),
    ("Korea", "Korea, Republic of"),
    ("North Korea", "Korea, Democratic People's Republic of"),
    ("UK", "United Kingdom of Great Britain and Northern Ireland"),
    ("United Kingdom", "United Kingdom of Great Britain and Northern Ireland"),
    ("Great Britain", "United Kingdom of Great Britain and Northern Ireland"),
    ("Britain", "United Kingdom of Great Britain and Northern Ireland"),
    ("USA", "United States of America"),
    ("US", "United States of America"),
    ("United States", "United States of America"),
    ("America", "United States of America"),
    ("Russia", "Russian Federation"),
    ("Iran", "Iran, Islamic Republic of"),
    ("Syria", "Syrian Arab Republic"),
    ("Laos", "Lao People's Democratic Republic"),
    ("Vietnam", "Viet Nam"),
    ("Bolivia", "Bolivia, Plurinational State of"),
    ("Venezuela", "Venezuela, Bolivarian Republic of"),
    ("Tanzania", "Tanzania, United Republic of"),
    ("Moldova", "Moldova, Republic of"),
    ("Micronesia", "Micronesia, Federated States of"),
    ("Palestine", "Palestine, State of"),
    ("Taiwan", "Taiwan, Province of China"),
    ("Brunei", "Brunei Darussalam"),
    ("DRC", "Congo, Democratic Republic of the"),
    ("DR Congo", "Congo, Democratic Republic of the"),
    ("Congo-Kinshasa", "Congo, Democratic Republic of the"),
    ("Congo-Brazzaville", "Congo"),
    ("Republic of the Congo", "Congo"),
    ("Ivory Coast", "Côte d'Ivoire"),
    ("Cape Verde", "Cabo Verde"),
    ("Czech Republic", "Czechia"),
    ("Turkey", "Türkiye"),
    ("Swaziland", "Eswatini"),
    ("Macedonia", "North Macedonia"),
    ("East Timor", "Timor-Leste"),
    ("Burma", "Myanmar"),
    ("Vatican", "Holy See"),
    ("Vatican City", "Holy See"),
    ("Macau", "Macao"),
    ("British Virgin Islands", "Virgin Islands, British"),
    ("US Virgin Islands", "Virgin Islands, U.S."),
    ("Saint Helena", "Saint Helena, Ascension and Tristan da Cunha"),
    ("Bonaire", "Bonaire, Sint Eustatius and Saba"),
];

/// A candidate country for a name query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub code: CountryCode,
    pub name: &'static str,
    /// 0–100
    pub score: u8,
    /// The (normalized) query term that produced this match.
    pub term: String,
}

impl MatchResult {
    /// Descending score, then ascending code.
    pub fn rank(a: &MatchResult, b: &MatchResult) -> Ordering {
        b.score.cmp(&a.score).then_with(|| a.code.cmp(&b.code))
    }
}

struct Candidate {
    code: CountryCode,
    name: &'static str,
    /// Canonical key plus variants: comma-inverted
    /// (`republic of korea`) and without parentheticals (`falkland islands`).
    keys: Vec<String>,
}

pub struct NameMatcher {
    candidates: Vec<Candidate>,
    aliases: HashMap<String, usize>,
    /// `match_key` of every canonical name containing a literal comma.
    comma_names: HashSet<String>,
    /// Most commas in any of those names.
    max_commas: usize,
    suggestion_threshold: u8,
}

impl NameMatcher {
    pub fn new(registry: &Registry, suggestion_threshold: u8) -> Self {
        let candidates: Vec<Candidate> = registry
            .entries()
            .iter()
            .map(|entry| Candidate {
                code: entry.alpha2,
                name: entry.name,
                keys: name_keys(entry.name),
            })
            .collect();

        let mut aliases = HashMap::with_capacity(ALIASES.len());
        for (alias, canonical) in ALIASES {
            match registry.entries().iter().position(|e| e.is_named(canonical)) {
                Some(idx) => {
                    aliases.insert(match_key(alias), idx);
                }
                None => log::warn!("alias {alias:?} points at unknown name {canonical:?}"),
            }
        }

        let comma_names: HashSet<String> = registry
            .entries()
            .iter()
            .filter(|e| e.name.contains(','))
            .map(|e| match_key(e.name))
            .collect();
        let max_commas = registry
            .entries()
            .iter()
            .map(|e| e.name.matches(',').count())
            .max()
            .unwrap_or(0);

        NameMatcher {
            candidates,
            aliases,
            comma_names,
            max_commas,
            suggestion_threshold,
        }
    }

    /// Every candidate scored against a single name, best first.
    pub fn score_all(&self, term: &str) -> Vec<MatchResult> {
        let display = title_case(&decode_param(term));
        let key = match_key(&display);

        if let Some(&idx) = self.aliases.get(&key) {
            let c = &self.candidates[idx];
            return vec![MatchResult {
                code: c.code,
                name: c.name,
                score: 100,
                term: display,
            }];
        }

        let mut scored: Vec<MatchResult> = self
            .candidates
            .iter()
            .map(|c| MatchResult {
                code: c.code,
                name: c.name,
                score: c.keys.iter().map(|k| ratio(&key, k)).max().unwrap_or(0),
                term: display.clone(),
            })
            .collect();
        scored.sort_by(MatchResult::rank);
        scored
    }

    /// Resolve a single country name.
    ///
    /// Candidates scoring at least `likeness` are returned, best first. At
    /// `likeness = 100` only exact (normalized) names or aliases qualify;
    /// every exact tie is returned.
    pub fn match_name(&self, term: &str, likeness: u8) -> Result<Vec<MatchResult>> {
        if decode_param(term).is_empty() {
            return Err(UpdatesError::EmptyParameter("name".to_string()));
        }
        let scored = self.score_all(term);
        let accepted: Vec<MatchResult> = scored
            .iter()
            .take_while(|m| m.score >= likeness)
            .cloned()
            .collect();

        if !accepted.is_empty() {
            return Ok(accepted);
        }

        let suggestion = scored
            .first()
            .filter(|best| best.score >= self.suggestion_threshold)
            .map(|best| best.name.to_string());
        Err(UpdatesError::NoMatchFound {
            term: term.to_string(),
            suggestion,
        })
    }

    /// Resolve comma-separated names, keeping comma-bearing canonical names
    /// in one piece. Results for all names are merged, best first, one entry
    /// per code.
    pub fn resolve(&self, input: &str, likeness: u8) -> Result<Vec<MatchResult>> {
        let names = self.split_names(input);
        if names.is_empty() {
            return Err(UpdatesError::EmptyParameter("name".to_string()));
        }

        let mut merged: Vec<MatchResult> = Vec::new();
        for name in &names {
            for m in self.match_name(name, likeness)? {
                match merged.iter_mut().find(|x| x.code == m.code) {
                    Some(existing) if existing.score < m.score => *existing = m,
                    Some(_) => {}
                    None => merged.push(m),
                }
            }
        }
        merged.sort_by(MatchResult::rank);
        Ok(merged)
    }

    /// Set of codes for [`NameMatcher::resolve`].
    ///
    /// ```rust
    /// use iso3166_updates_core::fuzzy::NameMatcher;
    /// use iso3166_updates_core::registry::Registry;
    ///
    /// let matcher = NameMatcher::new(&Registry::default(), 60);
    /// let codes = matcher.match_country_name("South Korea", 100).unwrap();
    /// assert_eq!(codes.iter().map(|c| c.as_str()).collect::<Vec<_>>(), ["KR"]);
    /// ```
    pub fn match_country_name(&self, input: &str, likeness: u8) -> Result<BTreeSet<CountryCode>> {
        Ok(self.resolve(input, likeness)?.into_iter().map(|m| m.code).collect())
    }

    /// Split multi-name input on commas, in input order.
    ///
    /// Adjacent pieces that together spell a comma-bearing canonical name
    /// (compared on [`match_key`], so spacing around the comma is free) are
    /// kept as one name. Pieces keep the caller's spelling.
    fn split_names(&self, input: &str) -> Vec<String> {
        let decoded = decode_param(input);
        let tokens: Vec<&str> = decoded
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        let mut names = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let longest = (self.max_commas + 1).min(tokens.len() - i);
            let width = (2..=longest)
                .rev()
                .find(|&w| {
                    self.comma_names
                        .contains(&match_key(&tokens[i..i + w].join(",")))
                })
                .unwrap_or(1);
            names.push(tokens[i..i + width].join(", "));
            i += width;
        }
        names
    }
}

fn name_keys(name: &'static str) -> Vec<String> {
    let mut keys = vec![match_key(name)];
    if let Some((head, tail)) = name.split_once(", ") {
        keys.push(match_key(&format!("{tail} {head}")));
    }
    if let Some((head, _)) = name.split_once(" (") {
        keys.push(match_key(head));
    }
    keys
}
