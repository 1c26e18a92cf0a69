use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use refi_core::store::KeyValueStore;
use refi_core::{RefiError, RefiResult};

/// One `<key>.json` file per key under a directory, created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> RefiResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RefiError::Storage(format!("invalid store key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> RefiResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RefiError::Storage(format!(
                "failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> RefiResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            RefiError::Storage(format!("failed to create '{}': {}", self.dir.display(), e))
        })?;
        fs::write(&path, value).map_err(|e| {
            RefiError::Storage(format!("failed to write '{}': {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "store entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refi_core::store::{OfferBook, OFFERS_KEY};

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get(OFFERS_KEY).unwrap(), None);
    }

    #[test]
    fn test_offer_book_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        let mut book = OfferBook::default();
        book.add_option();
        book.save(&mut store).unwrap();

        assert!(dir.path().join("nested").join("mortgage-banks.json").is_file());
        assert_eq!(OfferBook::load(&store).unwrap(), book);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
