// crates/iso3166-updates-core/src/search.rs

//! # Search Matcher
//!
//! Scores a free-text term against the change fields of every record with
//! the same similarity measure the name matcher uses.

use crate::date_range::parse_date;
use crate::error::{Result, UpdatesError};
use crate::model::ChangeRecord;
use crate::registry::CountryCode;
use crate::text::{decode_param, partial_similarity};
use serde::Serialize;

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    #[serde(rename = "Country Code")]
    pub code: CountryCode,
    #[serde(flatten)]
    pub record: ChangeRecord,
    /// `None` when the caller asked for scores to be left out.
    #[serde(rename = "Match Score", skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

/// Ranked, single-pass sequence of [`SearchHit`]s.
///
/// Materialized: every record is scored and each hit cloned when
/// [`search`] returns, so the sequence does not borrow the dataset. Ordered
/// by descending score, then country code, then source order within the
/// country.
#[derive(Debug)]
pub struct SearchHits {
    inner: std::vec::IntoIter<SearchHit>,
}

impl Iterator for SearchHits {
    type Item = SearchHit;

    fn next(&mut self) -> Option<SearchHit> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for SearchHits {}

/// Similarity of `term` to one record, 0–100.
///
/// Change and description fields are scored with
/// [`partial_similarity`](crate::text::partial_similarity). If the term
/// parses as a date, a record issued (or corrected) on that date scores 100.
pub fn score_record(term: &str, record: &ChangeRecord) -> u8 {
    let text_score = partial_similarity(term, &record.code_or_subdivision_change)
        .max(partial_similarity(term, &record.description_of_change));

    let date_score = match parse_date(term) {
        Ok(date)
            if record.date_issued.primary == date || record.date_issued.corrected == Some(date) =>
        {
            100
        }
        _ => 0,
    };
    text_score.max(date_score)
}

/// Search `records` for `term`, keeping hits scoring at least `likeness`.
///
/// `records` must be in country-code order with each country's records in
/// source order; ties keep that order.
pub fn search<'a, I>(records: I, term: &str, likeness: u8, exclude_score: bool) -> Result<SearchHits>
where
    I: IntoIterator<Item = (CountryCode, &'a [ChangeRecord])>,
{
    let term = decode_param(term);
    if term.is_empty() {
        return Err(UpdatesError::EmptyParameter("search".to_string()));
    }

    let mut scored: Vec<(u8, CountryCode, usize, &ChangeRecord)> = Vec::new();
    for (code, list) in records {
        for (idx, record) in list.iter().enumerate() {
            let score = score_record(&term, record);
            if score >= likeness {
                scored.push((score, code, idx, record));
            }
        }
    }
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));
    log::debug!("search {term:?} at likeness {likeness}: {} hits", scored.len());

    let hits: Vec<SearchHit> = scored
        .into_iter()
        .map(|(score, code, _, record)| SearchHit {
            code,
            record: record.clone(),
            score: (!exclude_score).then_some(score),
        })
        .collect();
    Ok(SearchHits {
        inner: hits.into_iter(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn fixture() -> Vec<(CountryCode, Vec<ChangeRecord>)> {
        let registry = Registry::default();
        vec![
            (
                registry.normalize("CZ").unwrap(),
                vec![ChangeRecord::new(
                    "2020-11-24",
                    "Online Browsing Platform (OBP)",
                    "Change of subdivision category from region to capital city: CZ-10",
                    "Update of the list source",
                )
                .unwrap()],
            ),
            (
                registry.normalize("SZ").unwrap(),
                vec![
                    ChangeRecord::new(
                        "2018-11-26",
                        "Online Browsing Platform (OBP)",
                        "Change of short name from Swaziland to Eswatini",
                        "",
                    )
                    .unwrap(),
                    ChangeRecord::new("2011-12-13", "Newsletter II-3", "", "Subdivision layout").unwrap(),
                ],
            ),
        ]
    }

    fn run(term: &str, likeness: u8, exclude: bool) -> Vec<SearchHit> {
        let data = fixture();
        search(
            data.iter().map(|(c, r)| (*c, r.as_slice())),
            term,
            likeness,
            exclude,
        )
        .unwrap()
        .collect()
    }

    #[test]
    fn exact_term_hits_change_fields() {
        let hits = run("Eswatini", 100, false);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "SZ");
        assert_eq!(hits[0].score, Some(100));
    }

    #[test]
    fn missing_term_is_empty_not_error() {
        assert!(run("border", 100, false).is_empty());
    }

    #[test]
    fn ties_break_by_code_then_source_order() {
        let hits = run("subdivision", 100, false);
        let order: Vec<_> = hits
            .iter()
            .map(|h| (h.code.as_str(), h.record.date_issued.as_str()))
            .collect();
        assert_eq!(order, [("CZ", "2020-11-24"), ("SZ", "2011-12-13")]);
    }

    #[test]
    fn lower_likeness_ranks_fuzzy_hits_after_exact() {
        let hits = run("Swazilnd", 70, false);
        assert_eq!(hits[0].code, "SZ");
        assert!(hits[0].score.unwrap() < 100);
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn excluding_scores_keeps_selection_and_order() {
        let with: Vec<_> = run("subdivision", 60, false);
        let without: Vec<_> = run("subdivision", 60, true);
        assert_eq!(with.len(), without.len());
        for (a, b) in with.iter().zip(&without) {
            assert_eq!(a.record, b.record);
            assert!(b.score.is_none());
        }
    }

    #[test]
    fn date_shaped_terms_match_issue_date() {
        let hits = run("26/11/2018", 100, false);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "SZ");
    }

    #[cfg(feature = "json")]
    #[test]
    fn serialized_hit_shape() {
        let hits = run("Eswatini", 100, true);
        let json = serde_json::to_value(&hits[0]).unwrap();
        assert_eq!(json["Country Code"], "SZ");
        assert_eq!(json["Date Issued"], "2018-11-26");
        assert!(json.get("Match Score").is_none());
    }
}
