//! Recently viewed cities.
//!
//! The list is ordered most recent first and never holds the same name
//! twice. Use cases see it through two narrow capabilities,
//! [`CityRecencyReader`] and [`CityRecencyWriter`], both implemented by
//! [`RecentCityRegistry`].

use parking_lot::Mutex;
use std::fmt::Debug;

use crate::error::PersistenceError;

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Backing storage for the recency list. Every write replaces the whole list.
pub trait RecencyStore: Send + Sync + Debug {
    fn read(&self) -> Result<Vec<String>, PersistenceError>;
    fn write(&self, cities: &[String]) -> Result<(), PersistenceError>;
}

pub trait CityRecencyReader: Send + Sync {
    fn recent_cities(&self) -> Result<Vec<String>, PersistenceError>;

    fn most_recent_city(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.recent_cities()?.into_iter().next())
    }
}

pub trait CityRecencyWriter: Send + Sync {
    /// Move `city` to the front of the list, adding it if absent.
    fn add_city(&self, city: &str) -> Result<(), PersistenceError>;
}

/// Build the list that results from promoting `city` over `existing`.
pub fn promote(existing: Vec<String>, city: &str) -> Vec<String> {
    let mut cities = Vec::with_capacity(existing.len() + 1);
    cities.push(city.to_owned());
    cities.extend(existing.into_iter().filter(|name| name != city));
    cities
}

/// Write-through registry over a [`RecencyStore`].
///
/// Reads and writes go through one lock, so overlapping `add_city` calls
/// cannot lose each other's updates.
#[derive(Debug)]
pub struct RecentCityRegistry {
    store: Mutex<Box<dyn RecencyStore>>,
}

impl RecentCityRegistry {
    /// Open the registry. An unreadable store is only logged here; each use
    /// case reports it when it next reads or writes.
    pub fn open(store: impl RecencyStore + 'static) -> Self {
        match store.read() {
            Ok(cities) => tracing::debug!("Loaded {} recent cities", cities.len()),
            Err(err) => tracing::warn!("Recent cities are unavailable: {err}"),
        }

        Self { store: Mutex::new(Box::new(store)) }
    }
}

impl CityRecencyReader for RecentCityRegistry {
    fn recent_cities(&self) -> Result<Vec<String>, PersistenceError> {
        self.store.lock().read()
    }
}

impl CityRecencyWriter for RecentCityRegistry {
    fn add_city(&self, city: &str) -> Result<(), PersistenceError> {
        let store = self.store.lock();

        let cities = promote(store.read()?, city);
        store.write(&cities).inspect_err(|err| {
            tracing::error!("Could not record '{city}' as recent: {err}");
        })?;

        tracing::info!("Recorded '{city}' as most recent city ({} total)", cities.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingStore;

    fn registry() -> RecentCityRegistry {
        RecentCityRegistry::open(MemoryStore::default())
    }

    #[test]
    fn promote_moves_existing_city_to_front() {
        let existing = vec!["C".to_string(), "A".to_string(), "B".to_string()];
        assert_eq!(promote(existing, "B"), vec!["B", "C", "A"]);
    }

    #[test]
    fn promote_prepends_new_city() {
        assert_eq!(promote(vec!["A".to_string()], "Z"), vec!["Z", "A"]);
        assert_eq!(promote(Vec::new(), "Z"), vec!["Z"]);
    }

    #[test]
    fn empty_registry_is_not_an_error() {
        let registry = registry();
        assert!(registry.recent_cities().unwrap().is_empty());
        assert_eq!(registry.most_recent_city().unwrap(), None);
    }

    #[test]
    fn add_city_keeps_relative_order_of_others() {
        let registry = registry();

        registry.add_city("B").unwrap();
        registry.add_city("A").unwrap();
        registry.add_city("C").unwrap();
        assert_eq!(registry.recent_cities().unwrap(), vec!["C", "A", "B"]);

        registry.add_city("B").unwrap();
        assert_eq!(registry.recent_cities().unwrap(), vec!["B", "C", "A"]);
        assert_eq!(registry.most_recent_city().unwrap().as_deref(), Some("B"));
    }

    #[test]
    fn last_added_city_is_first_and_unique() {
        let registry = registry();
        let calls = ["Oslo", "Lima", "Oslo", "Rome", "Lima", "Lima", "Kyiv", "Oslo"];

        for city in calls {
            registry.add_city(city).unwrap();
        }

        let cities = registry.recent_cities().unwrap();
        assert_eq!(cities[0], "Oslo");

        let mut deduped = cities.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), cities.len());
    }

    #[test]
    fn failed_write_leaves_previous_list_in_place() {
        let store = FailingStore::failing_writes(vec!["Paris".to_string()]);
        let registry = RecentCityRegistry::open(store);

        let err = registry.add_city("Berlin").unwrap_err();
        assert_eq!(err.operation, crate::error::PersistenceOperation::Write);
        assert_eq!(registry.recent_cities().unwrap(), vec!["Paris"]);
    }

    #[test]
    fn unreadable_store_still_opens_and_fails_per_call() {
        let registry = RecentCityRegistry::open(FailingStore::failing_reads());

        let err = registry.recent_cities().unwrap_err();
        assert_eq!(err.operation, crate::error::PersistenceOperation::Read);
        assert!(registry.add_city("Oslo").is_err());
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        let registry = std::sync::Arc::new(registry());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.add_city(&format!("City{i}")).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.recent_cities().unwrap().len(), 8);
    }
}
