use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::{PersistenceError, PersistenceOperation};

use super::RecencyStore;

/// Recency list stored as a JSON array of strings.
///
/// A missing file reads as an empty list. Writes go to a temporary file in
/// the same directory which is then renamed over the target, so a failed
/// write never leaves a half-written list behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(
        &self,
        operation: PersistenceOperation,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> PersistenceError {
        PersistenceError::new(operation, &self.path, source)
    }

    fn write_atomically(&self, contents: &[u8]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        Ok(())
    }
}

impl RecencyStore for JsonFileStore {
    fn read(&self) -> Result<Vec<String>, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.error(PersistenceOperation::Read, err)),
        };

        serde_json::from_str(&contents).map_err(|err| self.error(PersistenceOperation::Parse, err))
    }

    fn write(&self, cities: &[String]) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec(cities)
            .map_err(|err| self.error(PersistenceOperation::Write, err))?;

        self.write_atomically(&json)
            .map_err(|err| self.error(PersistenceOperation::Write, err))
    }
}
