//! File-backed key-value storage.
//!
//! The whole store is one JSON object mapping keys to string values. The
//! file is re-read on every access, so several stores pointed at the same
//! path see each other's writes.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use refoodify_core::{KeyValueStore, StorageError};

/// Key-value storage persisted as a JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry. A missing file is empty; a corrupt one is logged and
    /// treated as empty.
    fn read_entries(&self, key: &str) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::Read {
                    key: key.to_owned(),
                    message: format!("{}: {e}", self.path.display()),
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Data file is corrupt, treating as empty"
            );
            BTreeMap::new()
        }))
    }

    /// Replace the file contents atomically via a sibling temp file.
    fn write_entries(
        &self,
        key: &str,
        entries: &BTreeMap<String, String>,
    ) -> Result<(), StorageError> {
        let body = serde_json::to_string_pretty(entries)?;
        let write_err = |e: io::Error| StorageError::Write {
            key: key.to_owned(),
            message: format!("{}: {e}", self.path.display()),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp).map_err(write_err)?;
        file.write_all(body.as_bytes()).map_err(write_err)?;
        file.write_all(b"\n").map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            write_err(e)
        })?;

        tracing::debug!(path = %self.path.display(), key, "Data file written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "refoodify".into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries(key)?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_entries(key)?;
        entries.insert(key.to_owned(), value);
        self.write_entries(key, &entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries(key)?;
        if entries.remove(key).is_some() {
            self.write_entries(key, &entries)?;
        }
        Ok(())
    }
}
