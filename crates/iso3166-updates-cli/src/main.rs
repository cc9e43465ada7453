//! iso3166-updates — Command-line interface for iso3166-updates-core
//!
//! Loads the ISO 3166 change log and answers queries against it, printing
//! JSON to stdout.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ iso3166-updates stats
//!
//! - Updates for France and Germany between 2016 and 2020
//!   $ iso3166-updates query --alpha FRA,DE --year 2016-2020
//!
//! - Everything published in the last year, newest first
//!   $ iso3166-updates query --months 12 --sort-by dateDesc
//!
//! - Resolve names, tolerating typos
//!   $ iso3166-updates match-name "Swizerland" --likeness 80
//!
//! - Search change descriptions
//!   $ iso3166-updates search "addition of region" --likeness 70
//!
//! Data source
//! -----------
//!
//! By default the CLI reads the sample dataset bundled with
//! `iso3166-updates-core` and caches a binary copy next to it. Use
//! `--input <path>` for another `.json`/`.json.gz` file, or `--url <url>`
//! (with the `fetch` feature) to download it.
mod args;

use crate::args::{CliArgs, Commands, QueryArgs};
use clap::Parser;
use iso3166_updates_core::loader::FileLoader;
use iso3166_updates_core::{
    DatasetLoader, EngineConfig, QueryEngine, QueryFilters, SortOrder,
};
use serde::Serialize;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn loader(args: &CliArgs) -> anyhow::Result<Box<dyn DatasetLoader>> {
    #[cfg(feature = "fetch")]
    if let Some(url) = &args.url {
        return Ok(Box::new(iso3166_updates_core::loader::HttpLoader::new(url.as_str())?));
    }

    // Determine input file (default JSON inside iso3166-updates-core)
    let loader = match &args.input {
        Some(path) => FileLoader::new(path),
        None => FileLoader::default_dataset(),
    };
    Ok(Box::new(loader.with_cache(true)))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn filters(q: QueryArgs) -> QueryFilters {
    QueryFilters {
        codes: q.codes.into_iter().collect(),
        years: q.years,
        names: q.names,
        months: q.months,
        date_range: q.date_range,
        search: q.search,
        likeness: q.likeness,
        exclude_score: q.exclude_score,
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let engine = QueryEngine::from_loader(loader(&args)?.as_ref(), config)?;

    match args.command {
        Commands::Stats => {
            let stats = engine.store().stats();
            println!("Dataset statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Records: {}", stats.records);
        }

        Commands::Query(q) => {
            let sort = match &q.sort_by {
                Some(s) => s.parse::<SortOrder>()?,
                None => SortOrder::Default,
            };
            let out = engine.query(&filters(q), sort)?;
            print_json(&out)?;
        }

        Commands::MatchName { name, likeness } => {
            let matches = engine.match_country_name(&name, likeness)?;
            print_json(&matches)?;
        }

        Commands::Search {
            term,
            likeness,
            exclude_score,
        } => {
            let hits: Vec<_> = engine.search(&term, likeness, exclude_score)?.collect();
            if hits.is_empty() {
                log::info!("no records match {term:?}");
            }
            print_json(&hits)?;
        }

        Commands::Code { code } => {
            let cc = engine.normalize_code(&code)?;
            let entry = engine.registry().entry(cc);
            let records = engine.store().lookup(cc).map_or(0, |r| r.len());
            print_json(&serde_json::json!({
                "alpha2": entry.alpha2,
                "alpha3": entry.alpha3,
                "numeric": entry.numeric,
                "name": entry.name,
                "excluded": engine.registry().is_excluded(cc),
                "records": records,
            }))?;
        }
    }

    Ok(())
}
