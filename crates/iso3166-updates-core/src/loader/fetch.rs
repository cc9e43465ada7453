// crates/iso3166-updates-core/src/loader/fetch.rs
#![cfg(feature = "fetch")]

use super::DATA_REPO_URL;
use crate::error::Result;
use crate::model::{CountryDataset, RawDataset};
use crate::registry::Registry;
use crate::traits::DatasetLoader;

pub const USER_AGENT: &str = concat!("iso3166-updates/", env!("CARGO_PKG_VERSION"));

/// Downloads the dataset JSON from a URL (for example a public bucket
/// object) on every load.
pub struct HttpLoader {
    url: String,
    client: reqwest::blocking::Client,
    registry: Registry,
}

impl HttpLoader {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(HttpLoader {
            url: url.into(),
            client,
            registry: Registry::default(),
        })
    }

    /// Loader for the published upstream dataset ([`DATA_REPO_URL`]).
    pub fn default_dataset() -> Result<Self> {
        Self::new(DATA_REPO_URL)
    }
}

impl DatasetLoader for HttpLoader {
    fn load(&self) -> Result<CountryDataset> {
        log::debug!("fetching dataset from {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .text()?;
        let raw: RawDataset = serde_json::from_str(&body)?;
        CountryDataset::from_raw(raw, &self.registry)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dataset_points_upstream() {
        let loader = HttpLoader::default_dataset().unwrap();
        assert_eq!(loader.describe(), DATA_REPO_URL);
        assert!(USER_AGENT.starts_with("iso3166-updates/"));
    }
}
