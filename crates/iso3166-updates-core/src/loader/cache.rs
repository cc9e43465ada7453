// crates/iso3166-updates-core/src/loader/cache.rs

//! Binary (bincode) snapshot of a parsed dataset, written next to the JSON
//! source so later loads skip JSON parsing.

use crate::error::Result;
use crate::model::{CountryDataset, RawDataset};
use crate::registry::Registry;
use bincode::Options;
use std::path::Path;

/// Upper bound for a cache file; the full change log is a few hundred KiB.
const CACHE_LIMIT: u64 = 64 * 1024 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(CACHE_LIMIT)
        .allow_trailing_bytes()
}

pub fn to_bytes(dataset: &CountryDataset) -> Result<Vec<u8>> {
    Ok(options().serialize(&dataset.to_raw())?)
}

pub fn from_bytes(data: &[u8], registry: &Registry) -> Result<CountryDataset> {
    let raw: RawDataset = options().deserialize(data)?;
    CountryDataset::from_raw(raw, registry)
}

pub fn read(path: &Path, registry: &Registry) -> Result<CountryDataset> {
    let bytes = std::fs::read(path)?;
    from_bytes(&bytes, registry)
}

/// Best-effort write; failures are logged and otherwise ignored.
pub fn write(path: &Path, dataset: &CountryDataset) {
    let result = to_bytes(dataset).and_then(|bytes| Ok(std::fs::write(path, bytes)?));
    match result {
        Ok(()) => log::debug!("wrote dataset cache {}", path.display()),
        Err(e) => log::debug!("could not write dataset cache {}: {e}", path.display()),
    }
}
