// SPDX-License-Identifier: MPL-2.0
//! Persistence store implementations.
//!
//! [`SessionStore`] keeps values in memory for the lifetime of the process,
//! which is the lifetime of one browsing session for this client.
//! [`DurableStore`] mirrors its map to a CBOR file in the data directory and
//! rewrites the file on every change.

use crate::app::paths;
use crate::application::port::PersistenceStore;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// State file name within the app data directory.
const STORE_FILE: &str = "store.cbor";

type Map = BTreeMap<String, String>;

fn lock(map: &Mutex<Map>) -> MutexGuard<'_, Map> {
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct SessionStore {
    values: Mutex<Map>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.values).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.values).is_empty()
    }
}

impl PersistenceStore for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.values).remove(key);
        Ok(())
    }
}

/// File-backed store that survives restarts.
#[derive(Debug)]
pub struct DurableStore {
    path: PathBuf,
    values: Mutex<Map>,
}

impl DurableStore {
    /// Opens the store in the default data directory.
    ///
    /// A missing or unreadable file yields an empty store; the warning is
    /// logged and the file is replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined.
    pub fn open() -> Result<Self> {
        Self::open_in(None)
    }

    /// Opens the store in `base_dir`, or the default data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined.
    pub fn open_in(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = paths::get_app_data_dir_with_override(base_dir)
            .ok_or_else(|| Error::Io("no data directory available".to_string()))?;
        Ok(Self::open_file(dir.join(STORE_FILE)))
    }

    /// Opens the store backed by exactly `path`.
    pub fn open_file(path: PathBuf) -> Self {
        let values = match read_map(&path) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable store");
                Map::new()
            }
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, change: impl FnOnce(&mut Map)) -> Result<()> {
        let mut values = lock(&self.values);
        change(&mut values);
        write_map(&self.path, &values)
    }
}

fn read_map(path: &Path) -> Result<Map> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let reader = BufReader::new(fs::File::open(path)?);
    ciborium::from_reader(reader).map_err(|e| Error::Decode(e.to_string()))
}

fn write_map(path: &Path, values: &Map) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(fs::File::create(path)?);
    ciborium::into_writer(values, writer).map_err(|e| Error::Io(e.to_string()))
}

impl PersistenceStore for DurableStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}
