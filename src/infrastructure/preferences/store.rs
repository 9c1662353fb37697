// SPDX-License-Identifier: MPL-2.0
//! Key-value preference stores.
//!
//! The file store keeps a flat string map in CBOR (Concise Binary Object
//! Representation), the same format used for the dialog state file, so it
//! stays separate from the user-editable TOML settings.

use crate::application::port::KeyValueStore;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

/// CBOR file holding a string map.
///
/// Every `get` reads the file and every `set` rewrites it, so values written
/// by one instance are visible to the next one opened on the same path.
#[derive(Debug, Clone)]
pub struct CborFileStore {
    path: PathBuf,
}

impl CborFileStore {
    /// Opens a store at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => {
                return Err(Error::Preference(format!(
                    "cannot read {}: {err}",
                    self.path.display()
                )))
            }
        };

        ciborium::from_reader(BufReader::new(file)).map_err(|err| {
            Error::Preference(format!("cannot parse {}: {err}", self.path.display()))
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                Error::Preference(format!("cannot create {}: {err}", parent.display()))
            })?;
        }

        let file = fs::File::create(&self.path).map_err(|err| {
            Error::Preference(format!("cannot create {}: {err}", self.path.display()))
        })?;
        ciborium::into_writer(entries, BufWriter::new(file)).map_err(|err| {
            Error::Preference(format!("cannot write {}: {err}", self.path.display()))
        })
    }
}

impl KeyValueStore for CborFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking every future write
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable preference file");
            Entries::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// In-memory store for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Entries,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = Entries::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().expect("failed to create temp dir");
        let store = CborFileStore::new(dir.path().join("prefs.cbor"));
        assert_eq!(store.get("theme").expect("read succeeds"), None);
    }

    #[test]
    fn set_then_get_across_instances() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("prefs.cbor");

        let mut store = CborFileStore::new(&path);
        store.set("theme", "dark").expect("write succeeds");
        store.set("other", "value").expect("write succeeds");

        let reopened = CborFileStore::new(&path);
        assert_eq!(reopened.get("theme").unwrap(), Some("dark".to_string()));
        assert_eq!(reopened.get("other").unwrap(), Some("value".to_string()));
    }

    #[test]
    fn corrupt_file_is_a_read_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("prefs.cbor");
        fs::write(&path, [0xff, 0x00, 0x13]).expect("write garbage");

        let store = CborFileStore::new(&path);
        assert!(matches!(store.get("theme"), Err(Error::Preference(_))));
    }

    #[test]
    fn set_replaces_corrupt_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("prefs.cbor");
        fs::write(&path, b"not cbor").expect("write garbage");

        let mut store = CborFileStore::new(&path);
        store.set("theme", "light").expect("write succeeds");
        assert_eq!(store.get("theme").unwrap(), Some("light".to_string()));
    }

    #[test]
    fn unwritable_location_reports_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file").expect("create blocker file");

        // Parent "directory" is a regular file
        let mut store = CborFileStore::new(blocker.join("prefs.cbor"));
        assert!(matches!(
            store.set("theme", "dark"),
            Err(Error::Preference(_))
        ));
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));
        assert_eq!(
            MemoryStore::with_entry("theme", "light").get("theme").unwrap(),
            Some("light".to_string())
        );
    }
}
