//! A key/value store that keeps one JSON record per key.
//!
//! Each record lives in a file named after the SHA-256 digest of its key,
//! so keys can contain anything without worrying about what the backing
//! file system accepts in a file name. The key is stored again inside the
//! record so that a file remains self-describing if it is inspected or
//! moved on its own.
//!
//! The store does not lock. Two processes writing the same key at the
//! same time may clobber each other, and a reader may observe a partially
//! written record.

mod mem_fs;
pub use mem_fs::MemFs;

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Extension given to every record file.
pub const RECORD_EXTENSION: &str = "json";

/// The record written to disk for each key.
///
/// Reading is lenient: a missing field decodes as an empty string, and the
/// capitalized `Key`/`Val` spellings are accepted alongside `key`/`val`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct KvPair {
    #[serde(alias = "Key")]
    pub key: String,
    #[serde(alias = "Val")]
    pub val: String,
}

/// The file operations a [`KeyedStore`] needs from its backing storage.
///
/// Names passed in are plain file names relative to the store's root.
/// Handles are closed when dropped.
pub trait StoreFs {
    type Reader: Read;
    type Writer: Write;

    /// Create `name`, or truncate it if it already exists.
    fn create(&self, name: &str) -> io::Result<Self::Writer>;

    /// Open `name` for reading. A missing file must be reported as an
    /// `io::Error` of kind `NotFound`.
    fn open(&self, name: &str) -> io::Result<Self::Reader>;
}

/// Return the lowercase hex SHA-256 digest of `key`.
pub fn key_digest(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Return the name of the file that holds the record for `key`.
pub fn record_file_name(key: &str) -> String {
    format!("{}.{}", key_digest(key), RECORD_EXTENSION)
}

/// Maps string keys to string values, one file per key.
#[derive(Debug)]
pub struct KeyedStore<F> {
    fs: F,
}

impl<F: StoreFs> KeyedStore<F> {
    /// Create a store backed by `fs`. Every record is written directly
    /// inside the root that `fs` represents.
    pub fn new(fs: F) -> Self {
        KeyedStore { fs }
    }

    /// Return the backing storage.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let file = record_file_name(key);
        let record = KvPair {
            key: key.to_owned(),
            val: value.to_owned(),
        };
        let bytes = serde_json::to_vec_pretty(&record).map_err(Error::SerializeError)?;

        let mut writer = self.fs.create(&file)?;
        writer.write_all(&bytes)?;
        writer.flush()?;

        debug!(%file, len = bytes.len(), "wrote record");
        Ok(())
    }

    /// Return the value stored under `key`.
    ///
    /// Returns `Error::KeyNotFound` if nothing was ever stored for `key`
    /// and `Error::CorruptRecord` if the file can't be read as a record.
    pub fn get(&self, key: &str) -> Result<String> {
        let file = record_file_name(key);
        let mut reader = match self.fs.open(&file) {
            Ok(reader) => reader,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::KeyNotFound(key.to_owned()))
            }
            Err(err) => return Err(err.into()),
        };

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let record: KvPair = serde_json::from_slice(&bytes).map_err(|source| {
            Error::CorruptRecord {
                file: file.clone(),
                source,
            }
        })?;

        if record.key != key {
            warn!(%file, stored_key = %record.key, "record holds a different key");
        }

        debug!(%file, "read record");
        Ok(record.val)
    }

    /// Return `true` if a record exists for `key`.
    ///
    /// The record's contents are not checked.
    pub fn contains(&self, key: &str) -> Result<bool> {
        match self.fs.open(&record_file_name(key)) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
