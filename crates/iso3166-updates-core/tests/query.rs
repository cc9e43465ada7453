#![cfg(feature = "json")]

use chrono::NaiveDate;
use iso3166_updates_core::loader::StaticLoader;
use iso3166_updates_core::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_updates.json")
}

fn engine_at(y: i32, m: u32, d: u32) -> QueryEngine {
    QueryEngine::from_loader(&FileLoader::new(fixture_path()), EngineConfig::default())
        .expect("fixture loads")
        .with_reference_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn engine() -> QueryEngine {
    engine_at(2019, 1, 1)
}

fn keys(out: &QueryOutput) -> Vec<&'static str> {
    out.by_code()
        .expect("per-country output")
        .keys()
        .map(|c| c.as_str())
        .collect()
}

#[test]
fn alpha3_code_and_year() {
    let out = engine()
        .query(
            &QueryFilters::default().with_codes(["FRA"]).with_years("2010"),
            SortOrder::Default,
        )
        .unwrap();
    let map = out.by_code().unwrap();
    assert_eq!(keys(&out), ["FR"]);
    let fr = &map.values().next().unwrap()[0];
    assert_eq!(fr.date_issued.as_str(), "2010-06-30");
    assert_eq!(fr.edition, "Newsletter II-2");
}

#[test]
fn numeric_codes_are_accepted() {
    let out = engine()
        .query(&QueryFilters::default().with_codes(["250,276"]), SortOrder::Default)
        .unwrap();
    assert_eq!(keys(&out), ["DE", "FR"]);
}

#[test]
fn year_range_skips_excluded_codes() {
    let out = engine()
        .query(&QueryFilters::default().with_years("2015-2016"), SortOrder::Default)
        .unwrap();
    assert_eq!(keys(&out), ["DE", "FR"]);
}

#[test]
fn not_in_years() {
    let out = engine()
        .query(&QueryFilters::default().with_years("<>2016,2018"), SortOrder::Default)
        .unwrap();
    assert_eq!(keys(&out), ["DE", "FR", "KR"]);
    assert_eq!(out.record_count(), 3);
}

#[test]
fn ambiguous_year_expression_is_rejected() {
    let err = engine()
        .query(&QueryFilters::default().with_years("2010-2012,2015"), SortOrder::Default)
        .unwrap_err();
    assert!(matches!(err, UpdatesError::AmbiguousYearExpression(_)));
    assert!(err.is_validation());
}

#[test]
fn month_window_boundary() {
    let filters = QueryFilters::default().with_months("12");

    let out = engine_at(2017, 11, 15).query(&filters, SortOrder::Default).unwrap();
    assert_eq!(keys(&out), ["FR", "KR", "SZ"]);

    let out = engine_at(2017, 12, 1).query(&filters, SortOrder::Default).unwrap();
    assert_eq!(keys(&out), ["KR", "SZ"]);

    let out = engine_at(2017, 12, 1)
        .query(&QueryFilters::default().with_months("13-25"), SortOrder::Default)
        .unwrap();
    assert_eq!(keys(&out), ["DE", "FR"]);
}

#[test]
fn date_range_matches_corrected_date_once() {
    let out = engine()
        .query(
            &QueryFilters::default().with_date_range("2016-11-20,2016-11-30"),
            SortOrder::Default,
        )
        .unwrap();
    assert_eq!(keys(&out), ["FR"]);
    assert_eq!(out.record_count(), 1);
}

#[test]
fn single_date_runs_to_reference_date() {
    let out = engine()
        .query(&QueryFilters::default().with_date_range("01/01/2017"), SortOrder::DateAsc)
        .unwrap();
    match out {
        QueryOutput::Sorted(list) => {
            let codes: Vec<_> = list.iter().map(|t| t.code.as_str()).collect();
            assert_eq!(codes, ["KR", "SZ"]);
        }
        other => panic!("expected sorted output, got {other:?}"),
    }
}

#[test]
fn country_name_filter_uses_aliases() {
    let out = engine()
        .query(&QueryFilters::default().with_names("south korea"), SortOrder::Default)
        .unwrap();
    assert_eq!(keys(&out), ["KR"]);
}

#[test]
fn unknown_name_suggests_closest() {
    let err = engine()
        .query(
            &QueryFilters::default().with_names("Frannce").with_likeness(100),
            SortOrder::Default,
        )
        .unwrap_err();
    match err {
        UpdatesError::NoMatchFound { suggestion, .. } => {
            assert_eq!(suggestion.as_deref(), Some("France"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn search_without_hits_is_empty() {
    let out = engine()
        .query(&QueryFilters::default().with_search("border"), SortOrder::Default)
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn search_ranks_and_serializes_scores() {
    let engine = engine();
    let hits: Vec<SearchHit> = engine.search("Eswatini", None, false).unwrap().collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].code.as_str(), "SZ");

    let json = serde_json::to_value(&hits).unwrap();
    assert_eq!(json[0]["Match Score"], 100);
    assert_eq!(json[0]["Country Code"], "SZ");
}

#[test]
fn conflicting_filters_fail_before_any_lookup() {
    let err = engine()
        .query(
            &QueryFilters::default()
                .with_codes(["NOPE"])
                .with_months("6")
                .with_date_range("2019-01-01"),
            SortOrder::Default,
        )
        .unwrap_err();
    assert!(matches!(err, UpdatesError::ConflictingFilters(_)));
}

#[test]
fn invalid_code_anywhere_in_list_fails() {
    let err = engine()
        .query(&QueryFilters::default().with_codes(["FR,ZZZ"]), SortOrder::Default)
        .unwrap_err();
    assert!(matches!(err, UpdatesError::InvalidCode(ref c) if c == "ZZZ"));
}

#[test]
fn repeated_loads_and_queries_serialize_identically() {
    let filters = QueryFilters::default()
        .with_years(">2015")
        .with_search("name")
        .with_likeness(60);
    let run = |engine: &QueryEngine| {
        serde_json::to_vec(&engine.query(&filters, SortOrder::Default).unwrap()).unwrap()
    };

    let first = engine();
    let second = engine();
    let bytes = run(&first);
    assert!(!bytes.is_empty());
    assert_eq!(bytes, run(&first));
    assert_eq!(bytes, run(&second));

    let by_code = QueryFilters::default().with_codes(["FR", "DE"]);
    assert_eq!(
        serde_json::to_vec(&first.query(&by_code, SortOrder::DateAsc).unwrap()).unwrap(),
        serde_json::to_vec(&second.query(&by_code, SortOrder::DateAsc).unwrap()).unwrap()
    );
}

#[test]
fn output_serializes_per_country() {
    let out = engine()
        .query(&QueryFilters::default().with_codes(["AD", "DE"]), SortOrder::Default)
        .unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert!(json.get("AD").is_none());
    assert_eq!(json["DE"][0]["Date Issued"], "2015-11-27");
}

#[test]
fn reload_is_visible_to_later_queries_only() {
    let engine = engine();
    let before = engine.snapshot();

    let registry = Registry::default();
    let replacement: CountryDataset = [(
        registry.normalize("IT").unwrap(),
        vec![ChangeRecord::new("2020-01-01", "", "Provinces renamed", "").unwrap()],
    )]
    .into_iter()
    .collect();
    engine.reload(&StaticLoader::new(replacement)).unwrap();

    assert_eq!(before.len(), 6);
    let out = engine
        .query(&QueryFilters::default().with_codes(["ITA"]), SortOrder::Default)
        .unwrap();
    assert_eq!(out.record_count(), 1);
    assert_eq!(Arc::strong_count(&before), 1);
}
