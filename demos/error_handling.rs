//! Error handling example for iso3166-updates
//!
//! This example demonstrates the validation errors a caller can expect and
//! how a failed reload leaves the engine untouched.

use iso3166_updates_core::prelude::*;

fn main() -> Result<()> {
    println!("=== ISO 3166 Updates Error Handling Example ===\n");

    // Example 1: Handling load errors
    println!("--- Example 1: Loading a missing file ---");
    match QueryEngine::from_loader(&FileLoader::new("does-not-exist.json"), EngineConfig::default()) {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    let engine = QueryEngine::from_loader(&FileLoader::default_dataset(), EngineConfig::default())?;

    // Example 2: Invalid codes and filter values
    println!("--- Example 2: Invalid filter values ---");
    let cases = [
        QueryFilters::default().with_codes(["ABCD"]),
        QueryFilters::default().with_years("20x0"),
        QueryFilters::default().with_years("2010-2012,2015"),
        QueryFilters::default().with_months("twelve"),
        QueryFilters::default().with_date_range("2019-13-45"),
        QueryFilters::default().with_years("2019").with_months("6"),
        QueryFilters::default().with_names("Atlantis"),
    ];
    for filters in &cases {
        match engine.query(filters, SortOrder::Default) {
            Ok(out) => println!("  ok: {} records", out.record_count()),
            Err(e) if e.is_validation() => println!("  rejected: {e}"),
            Err(e) => return Err(e),
        }
    }
    println!();

    // Example 3: A typo gets a suggestion
    println!("--- Example 3: Name suggestions ---");
    if let Err(e) = engine.match_country_name("Germny", None) {
        println!("  {e}");
    }
    println!();

    // Example 4: A failed reload keeps the current data
    println!("--- Example 4: Failed reload ---");
    let before = engine.store().generation();
    if let Err(e) = engine.reload(&FileLoader::new("missing-update.json")) {
        println!("  reload failed: {e}");
    }
    println!(
        "  generation {} -> {}, {} countries still served",
        before,
        engine.store().generation(),
        engine.store().stats().countries
    );

    Ok(())
}
