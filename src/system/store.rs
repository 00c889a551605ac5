// src/system/store.rs

use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Represents errors raised by the durable key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A filesystem I/O error occurred while reading or writing the state file.
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    /// The temporary state file could not be moved over the real one.
    #[error("Error with temporary file: {0}")]
    TempFile(#[from] tempfile::PersistError),
    /// An error occurred while deserializing data from `bincode` binary format.
    #[error("Failed to decode from binary format: {0}")]
    BincodeDecode(#[from] bincode::error::DecodeError),
    /// An error occurred while serializing data to `bincode` binary format.
    #[error("Failed to encode to binary format: {0}")]
    BincodeEncode(#[from] bincode::error::EncodeError),
    /// The store refused the write (used by in-memory stores).
    #[error("State store is read-only")]
    ReadOnly,
}

/// Durable key-value storage scoped to the whole install, surviving restarts.
///
/// Values are opaque `bincode` blobs; use [`StateStoreExt`] for typed access.
pub trait StateStore {
    /// Returns the raw bytes stored under `key`, if any.
    fn get_raw(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `bytes` under `key` and makes the change durable.
    fn update_raw(&mut self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;
}

/// Typed helpers on top of [`StateStore`].
pub trait StateStoreExt: StateStore {
    /// Reads and decodes `key`, falling back to `default` when the key is
    /// missing or its bytes no longer decode.
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(bytes) = self.get_raw(key) else {
            return default;
        };
        match bincode::serde::decode_from_slice::<T, _>(&bytes, bincode::config::standard()) {
            Ok((value, _)) => value,
            Err(e) => {
                log::warn!("Ignoring unreadable state for key '{}': {}", key, e);
                default
            }
        }
    }

    /// Encodes `value` and writes it under `key`.
    fn update<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = bincode::serde::encode_to_vec(value, bincode::config::standard())?;
        self.update_raw(key, bytes)
    }
}

impl<S: StateStore + ?Sized> StateStoreExt for S {}

/// The whole store is one `bincode` file: a map of key to encoded value.
/// Every update rewrites the file atomically.
#[derive(Debug)]
pub struct BincodeFileStore {
    path: PathBuf,
    records: BTreeMap<String, Vec<u8>>,
}

impl BincodeFileStore {
    /// Opens the store at `path`. A missing file yields an empty store; a
    /// corrupt one is logged and treated as empty so the session can proceed.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match load_records(&path) {
            Ok(records) => records,
            Err(e) => {
                log::warn!(
                    "Could not read state file '{}', starting with defaults: {}",
                    path.display(),
                    e
                );
                BTreeMap::new()
            }
        };
        log::debug!(
            "Opened state store '{}' with {} record(s)",
            path.display(),
            records.len()
        );
        Self { path, records }
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let bytes = bincode::serde::encode_to_vec(&self.records, bincode::config::standard())?;
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&bytes)?;
        temp.flush()?;
        temp.persist(&self.path)?;
        log::debug!("State store written to '{}'", self.path.display());
        Ok(())
    }
}

fn load_records(path: &Path) -> Result<BTreeMap<String, Vec<u8>>, StoreError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let bytes = fs::read(path)?;
    let (records, _): (BTreeMap<String, Vec<u8>>, usize) =
        bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
    Ok(records)
}

impl StateStore for BincodeFileStore {
    fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.records.get(key).cloned()
    }

    fn update_raw(&mut self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        // Another process may have written since `open`: pick up its records
        // so only `key` is replaced on disk.
        match load_records(&self.path) {
            Ok(on_disk) => self.records.extend(on_disk),
            Err(e) => log::warn!(
                "Could not re-read state file '{}' before writing: {}",
                self.path.display(),
                e
            ),
        }

        // The in-memory record stays updated even when the flush fails.
        self.records.insert(key.to_string(), bytes);
        self.flush()
    }
}

/// Volatile store, used by tests and as a last resort when no config
/// directory is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, Vec<u8>>,
    read_only: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with [`StoreError::ReadOnly`].
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl StateStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.records.get(key).cloned()
    }

    fn update_raw(&mut self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.records.insert(key.to_string(), bytes);
        Ok(())
    }
}
