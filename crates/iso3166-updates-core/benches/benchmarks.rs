use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use iso3166_updates_core::prelude::*;
use std::hint::black_box;

fn engine() -> QueryEngine {
    QueryEngine::from_loader(&FileLoader::default_dataset(), EngineConfig::default())
        .expect("bundled dataset loads")
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
}

fn bench_parsers(c: &mut Criterion) {
    c.bench_function("year_parse_range", |b| {
        b.iter(|| YearPredicate::parse(black_box("2010-2015")))
    });
    c.bench_function("date_range_parse", |b| {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        b.iter(|| DateRange::parse(black_box("01/01/2019,2020-06-30"), today))
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = NameMatcher::new(&Registry::default(), 60);
    c.bench_function("match_name_exact", |b| {
        b.iter(|| matcher.match_country_name(black_box("Korea, Republic of, France"), 100))
    });
    c.bench_function("match_name_fuzzy", |b| {
        b.iter(|| matcher.match_name(black_box("Swizerland"), 80))
    });
}

fn bench_queries(c: &mut Criterion) {
    let engine = engine();
    let by_year = QueryFilters::default().with_years(">2015");
    c.bench_function("query_year_all_codes", |b| {
        b.iter(|| engine.query(black_box(&by_year), SortOrder::Default))
    });
    let search = QueryFilters::default().with_search("short name").with_likeness(70);
    c.bench_function("query_search", |b| {
        b.iter(|| engine.query(black_box(&search), SortOrder::DateDesc))
    });
}

criterion_group!(benches, bench_parsers, bench_matching, bench_queries);
criterion_main!(benches);
