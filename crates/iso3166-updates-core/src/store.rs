// crates/iso3166-updates-core/src/store.rs

//! # Update Record Store
//!
//! Owns the current dataset generation. Readers clone an `Arc` to the
//! snapshot and never hold the lock while querying; a reload builds the new
//! dataset first and swaps the pointer in one step.

use crate::common::DatasetStats;
use crate::error::Result;
use crate::model::{ChangeRecord, CountryDataset};
use crate::registry::CountryCode;
use crate::traits::DatasetLoader;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug)]
pub struct UpdateStore {
    current: RwLock<Arc<CountryDataset>>,
    generation: AtomicU64,
}

impl UpdateStore {
    pub fn new(dataset: CountryDataset) -> Self {
        UpdateStore {
            current: RwLock::new(Arc::new(dataset)),
            generation: AtomicU64::new(1),
        }
    }

    /// Build a store from the loader's first snapshot.
    pub fn load(loader: &dyn DatasetLoader) -> Result<Self> {
        let dataset = loader.load()?;
        let stats = dataset.stats();
        log::info!(
            "loaded {} records for {} countries from {}",
            stats.records,
            stats.countries,
            loader.describe()
        );
        Ok(UpdateStore::new(dataset))
    }

    /// The current generation. Stays valid after a reload.
    pub fn snapshot(&self) -> Arc<CountryDataset> {
        Arc::clone(&self.current.read())
    }

    /// Number of datasets installed so far, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Swap in a new dataset and return the new generation number.
    pub fn replace(&self, dataset: CountryDataset) -> u64 {
        let next = Arc::new(dataset);
        let mut guard = self.current.write();
        *guard = next;
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Load a fresh dataset and swap it in.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned to the caller that asked for the reload.
    pub fn reload(&self, loader: &dyn DatasetLoader) -> Result<DatasetStats> {
        match loader.load() {
            Ok(dataset) => {
                let stats = dataset.stats();
                let generation = self.replace(dataset);
                log::info!(
                    "reloaded {} records for {} countries from {} (generation {generation})",
                    stats.records,
                    stats.countries,
                    loader.describe()
                );
                Ok(stats)
            }
            Err(e) => {
                log::warn!(
                    "reload from {} failed, keeping generation {}: {e}",
                    loader.describe(),
                    self.generation()
                );
                Err(e)
            }
        }
    }

    /// Records for one country in the current snapshot.
    pub fn lookup(&self, code: CountryCode) -> Option<Vec<ChangeRecord>> {
        self.snapshot().get(code).map(<[ChangeRecord]>::to_vec)
    }

    pub fn stats(&self) -> DatasetStats {
        self.snapshot().stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdatesError;
    use crate::loader::StaticLoader;
    use crate::registry::Registry;

    struct FailingLoader;

    impl DatasetLoader for FailingLoader {
        fn load(&self) -> Result<CountryDataset> {
            Err(UpdatesError::NotFound("nowhere".into()))
        }

        fn describe(&self) -> String {
            "failing loader".into()
        }
    }

    fn dataset(code: &str, date: &str) -> CountryDataset {
        let registry = Registry::default();
        let record = ChangeRecord::new(date, "", "", "").unwrap();
        [(registry.normalize(code).unwrap(), vec![record])]
            .into_iter()
            .collect()
    }

    #[test]
    fn reload_swaps_and_old_snapshot_survives() {
        let store = UpdateStore::new(dataset("FR", "2010-05-01"));
        let before = store.snapshot();

        let stats = store.reload(&StaticLoader::new(dataset("DE", "2012-01-01"))).unwrap();
        assert_eq!(stats.countries, 1);
        assert_eq!(store.generation(), 2);

        let fr = Registry::default().normalize("FR").unwrap();
        assert!(before.get(fr).is_some());
        assert!(store.lookup(fr).is_none());
    }

    #[test]
    fn failed_reload_keeps_last_good_snapshot() {
        let store = UpdateStore::new(dataset("FR", "2010-05-01"));
        assert!(store.reload(&FailingLoader).is_err());
        assert_eq!(store.generation(), 1);
        let fr = Registry::default().normalize("FR").unwrap();
        assert_eq!(store.lookup(fr).map(|r| r.len()), Some(1));
    }

    #[test]
    fn concurrent_readers_see_whole_generations() {
        let store = Arc::new(UpdateStore::new(dataset("FR", "2010-05-01")));
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let snap = store.snapshot();
                        assert_eq!(snap.stats().records, 1);
                    }
                })
            })
            .collect();
        for i in 0..50 {
            let code = if i % 2 == 0 { "DE" } else { "FR" };
            store.replace(dataset(code, "2011-01-01"));
        }
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(store.generation(), 51);
    }
}
