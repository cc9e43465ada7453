// crates/iso3166-updates-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and delegates to
//! specific parsers (Binary vs JSON). Every loader returns a complete
//! [`CountryDataset`] or an error, never a partial one.

use crate::error::Result;
use crate::model::CountryDataset;
use crate::traits::DatasetLoader;
use std::path::PathBuf;

pub mod cache;
pub mod common_io;

#[cfg(feature = "fetch")]
mod fetch;
#[cfg(feature = "fetch")]
pub use fetch::HttpLoader;

/// Upstream location of the full change log.
#[cfg(feature = "fetch")]
pub const DATA_REPO_URL: &str =
    "https://raw.githubusercontent.com/amckenna41/iso3166-updates/main/iso3166-updates.json";

/// Directory of the sample dataset shipped with this crate.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn default_dataset_filename() -> &'static str {
    "iso3166-updates.json"
}

/// Reads a `.json` or `.json.gz` dataset from disk.
///
/// With caching on, a bincode copy is written to `<file>.bin` after a
/// successful parse and preferred on later loads while it is not older than
/// the source.
#[cfg(feature = "json")]
pub struct FileLoader {
    path: PathBuf,
    use_cache: bool,
    registry: crate::registry::Registry,
}

#[cfg(feature = "json")]
impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLoader {
            path: path.into(),
            use_cache: false,
            registry: crate::registry::Registry::default(),
        }
    }

    /// The sample dataset under [`default_data_dir`].
    pub fn default_dataset() -> Self {
        Self::new(default_data_dir().join(default_dataset_filename()))
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn cache_path(&self) -> PathBuf {
        common_io::get_cache_path(&self.path, "bin")
    }

    fn parse_source(&self) -> Result<CountryDataset> {
        let reader = common_io::open_stream(&self.path)?;
        let raw: crate::model::RawDataset = serde_json::from_reader(reader)?;
        CountryDataset::from_raw(raw, &self.registry)
    }
}

#[cfg(feature = "json")]
impl DatasetLoader for FileLoader {
    fn load(&self) -> Result<CountryDataset> {
        if !self.use_cache {
            return self.parse_source();
        }

        // 1) Try binary cache first
        let cache_path = self.cache_path();
        if common_io::is_fresh(&cache_path, &self.path) {
            match cache::read(&cache_path, &self.registry) {
                Ok(dataset) => {
                    log::debug!("using dataset cache {}", cache_path.display());
                    return Ok(dataset);
                }
                Err(e) => log::debug!("ignoring dataset cache {}: {e}", cache_path.display()),
            }
        }

        // 2) Fallback: parse the source
        let dataset = self.parse_source()?;

        // 3) Best-effort: write cache
        cache::write(&cache_path, &dataset);
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Hands out clones of an in-memory dataset.
#[derive(Debug, Clone)]
pub struct StaticLoader {
    dataset: CountryDataset,
}

impl StaticLoader {
    pub fn new(dataset: CountryDataset) -> Self {
        StaticLoader { dataset }
    }
}

impl DatasetLoader for StaticLoader {
    fn load(&self) -> Result<CountryDataset> {
        Ok(self.dataset.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory dataset ({} countries)", self.dataset.len())
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::error::UpdatesError;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "FR": [{
            "Date Issued": "2016-11-15 (corrected 2016-11-22)",
            "Edition/Newsletter": "Online Browsing Platform (OBP)",
            "Code/Subdivision Change": "Deletion of region FR-A",
            "Description of Change in Newsletter": "Regional reorganisation"
        }],
        "dE": []
    }"#;

    fn write_sample(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_json_and_accepts_alternate_description_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir, "updates.json", SAMPLE);
        let ds = FileLoader::new(&path).load().unwrap();
        assert_eq!(ds.stats().countries, 2);
        let fr = crate::registry::Registry::default().normalize("FR").unwrap();
        assert_eq!(ds.get(fr).unwrap()[0].description_of_change, "Regional reorganisation");
    }

    #[test]
    fn cache_is_written_and_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir, "updates.json", SAMPLE);
        let loader = FileLoader::new(&path).with_cache(true);
        let first = loader.load().unwrap();
        assert!(loader.cache_path().exists());
        assert_eq!(loader.load().unwrap(), first);
    }

    #[test]
    fn malformed_record_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(
            &dir,
            "broken.json",
            r#"{ "FR": [{ "Date Issued": "someday" }] }"#,
        );
        assert!(FileLoader::new(&path).load().is_err());
    }

    #[test]
    fn unknown_code_is_invalid_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir, "unknown.json", r#"{ "QQ": [] }"#);
        assert!(matches!(
            FileLoader::new(&path).load(),
            Err(UpdatesError::InvalidDataset(_))
        ));
    }

    #[cfg(feature = "compact")]
    #[test]
    fn reads_gzipped_source() {
        use flate2::{write::GzEncoder, Compression};
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updates.json.gz");
        let mut enc = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        enc.write_all(SAMPLE.as_bytes()).unwrap();
        enc.finish().unwrap();
        assert_eq!(FileLoader::new(&path).load().unwrap().stats().records, 1);
    }
}
