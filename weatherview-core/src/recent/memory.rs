use parking_lot::RwLock;

use crate::error::PersistenceError;

use super::RecencyStore;

/// Non-persistent store, useful for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cities: RwLock<Vec<String>>,
}

impl MemoryStore {
    pub fn with_cities(cities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { cities: RwLock::new(cities.into_iter().map(Into::into).collect()) }
    }
}

impl RecencyStore for MemoryStore {
    fn read(&self) -> Result<Vec<String>, PersistenceError> {
        Ok(self.cities.read().clone())
    }

    fn write(&self, cities: &[String]) -> Result<(), PersistenceError> {
        *self.cities.write() = cities.to_vec();
        Ok(())
    }
}
