//! Persisted set of record identifiers that were already delivered.
//!
//! On disk the set is a JSON array of strings, pretty-printed with four-space
//! indentation, in the order the identifiers were added. It is never pruned.
//! There is no file locking: two relays sharing one file will race.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use relay_common::error::RelayError;

pub struct SentIdStore {
    path: PathBuf,
    ids: Vec<String>,
    index: HashSet<String>,
}

impl SentIdStore {
    /// Load the store from `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, RelayError> {
        let path = path.into();

        let ids: Vec<String> = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No sent-id file yet, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        let index = ids.iter().cloned().collect();
        Ok(Self { path, ids, index })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: &str) -> bool {
        if !self.index.insert(id.to_string()) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Overwrite the file with the full list.
    pub fn save(&self) -> Result<(), RelayError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.ids.serialize(&mut serializer)?;

        std::fs::write(&self.path, buf)?;
        tracing::debug!(path = %self.path.display(), count = self.ids.len(), "Saved sent ids");
        Ok(())
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SentIdStore::load(dir.path().join("id_sent.json")).unwrap();
        assert!(store.is_empty());
        assert!(!store.contains("r1"));
    }

    #[test]
    fn test_save_writes_four_space_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_sent.json");

        let mut store = SentIdStore::load(&path).unwrap();
        assert!(store.insert("r1"));
        assert!(store.insert("r2"));
        store.save().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n    \"r1\",\n    \"r2\"\n]");
    }

    #[test]
    fn test_empty_store_saves_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_sent.json");
        SentIdStore::load(&path).unwrap().save().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_reload_preserves_order_and_membership() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_sent.json");
        std::fs::write(&path, r#"["b", "a", "c"]"#).unwrap();

        let mut store = SentIdStore::load(&path).unwrap();
        assert!(store.contains("a"));
        assert!(!store.insert("a"));
        assert!(store.insert("d"));
        store.save().unwrap();

        let reloaded = SentIdStore::load(&path).unwrap();
        assert_eq!(reloaded.ids(), &["b", "a", "c", "d"]);
        assert_eq!(reloaded.len(), 4);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_sent.json");
        std::fs::write(&path, "{\"not\": \"a list\"}").unwrap();

        let err = SentIdStore::load(&path).err().unwrap();
        assert!(matches!(err, RelayError::Json(_)));
    }
}
