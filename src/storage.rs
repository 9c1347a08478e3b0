//! Durable session storage owned by the application.
//!
//! The web client kept its credential in browser localStorage and patched
//! `localStorage.clear` to stop extensions from wiping it. Here the store is
//! a single JSON file that only this application writes, so an external
//! clear is structurally impossible instead of defended against.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Key under which the bearer credential is persisted.
pub const TOKEN_KEY: &str = "token";

/// Key under which the JSON-serialized identity is persisted.
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage file is not a JSON object of strings: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// String key-value store persisted as a JSON object in one file.
///
/// A missing file reads as an empty store, and removals of absent keys
/// succeed, so a fresh install and a logged-out session look the same.
/// Mutations are read-modify-write on the whole file; the session store
/// serializes them under its own write lock.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Open a store backed by the given file. No I/O happens until the
    /// first read or write; the file and its parent directories are
    /// created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store location under the platform data directory
    /// (e.g. `~/.local/share/engage/session.json`).
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("engage")
            .join("session.json")
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    /// Store `value` under `key`, creating the file if needed.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    /// Remove `key`. Idempotent: removing an absent key (or from a missing
    /// file) succeeds without touching disk.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }

    /// Remove several keys in a single write, so related entries (the
    /// credential and its identity) never survive each other on disk.
    pub fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        let mut dirty = false;
        for key in keys {
            dirty |= map.remove(*key).is_some();
        }
        if dirty {
            self.write_map(&map)?;
        }
        Ok(())
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(map)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path().join("session.json"));
        (dir, storage)
    }

    #[test]
    fn test_get_on_missing_file_is_none() {
        let (_dir, storage) = temp_store();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_get_round_trip() {
        let (_dir, storage) = temp_store();
        storage.set(TOKEN_KEY, "abc123").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));

        // Overwrite replaces the previous value
        storage.set(TOKEN_KEY, "def456").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("def456"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, storage) = temp_store();
        // Removing from a missing file succeeds and creates nothing
        storage.remove(TOKEN_KEY).unwrap();
        assert!(!storage.path().exists());

        storage.set(TOKEN_KEY, "abc").unwrap();
        storage.remove(TOKEN_KEY).unwrap();
        storage.remove(TOKEN_KEY).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_remove_all_clears_both_keys() {
        let (_dir, storage) = temp_store();
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "{\"id\":1}").unwrap();

        storage.remove_all(&[TOKEN_KEY, USER_KEY]).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let storage = Storage::open(&path);
        storage.set(TOKEN_KEY, "persisted").unwrap();
        drop(storage);

        let reopened = Storage::open(&path);
        assert_eq!(
            reopened.get(TOKEN_KEY).unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn test_unrelated_keys_untouched_by_remove() {
        let (_dir, storage) = temp_store();
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "usr").unwrap();

        storage.remove(TOKEN_KEY).unwrap();
        assert_eq!(storage.get(USER_KEY).unwrap().as_deref(), Some("usr"));
    }

    #[test]
    fn test_corrupt_file_reports_malformed() {
        let (_dir, storage) = temp_store();
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), "not json").unwrap();

        assert!(matches!(
            storage.get(TOKEN_KEY),
            Err(StorageError::Malformed(_))
        ));
    }
}
