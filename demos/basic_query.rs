//! Basic usage example for iso3166-updates
//!
//! This example demonstrates how to:
//! - Load the bundled change log
//! - Query by code and year
//! - Resolve country names
//! - Search the change descriptions

use iso3166_updates_core::prelude::*;

fn main() -> Result<()> {
    println!("=== ISO 3166 Updates Basic Usage Example ===\n");

    println!("Loading change log...");
    let engine = QueryEngine::from_loader(
        &FileLoader::default_dataset().with_cache(true),
        EngineConfig::default(),
    )?;
    let stats = engine.store().stats();
    println!("✓ Loaded {} records for {} countries\n", stats.records, stats.countries);

    // Example 1: Updates for one country in one year
    println!("--- Example 1: France in 2016 (alpha-3 input) ---");
    let out = engine.query(
        &QueryFilters::default().with_codes(["FRA"]).with_years("2016"),
        SortOrder::Default,
    )?;
    println!("{}\n", serde_json::to_string_pretty(&out)?);

    // Example 2: Everything since 2019, newest first
    println!("--- Example 2: All updates from 2019 on ---");
    let out = engine.query(&QueryFilters::default().with_years(">2019"), SortOrder::DateDesc)?;
    if let QueryOutput::Sorted(list) = &out {
        for tagged in list {
            println!(
                "{} {} {}",
                tagged.record.date_issued.as_str(),
                tagged.code,
                tagged.record.code_or_subdivision_change
            );
        }
    }
    println!();

    // Example 3: Name lookup, aliases included
    println!("--- Example 3: Resolving country names ---");
    for m in engine.match_country_name("Swaziland, Turkey", Some(80))? {
        println!("{:>5} -> {} ({})", m.score, m.code, m.name);
    }
    println!();

    // Example 4: Free-text search
    println!("--- Example 4: Searching for 'short name' ---");
    for hit in engine.search("short name", Some(90), false)? {
        println!("{} [{:?}] {}", hit.code, hit.score, hit.record.code_or_subdivision_change);
    }

    Ok(())
}
