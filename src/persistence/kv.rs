//! String-keyed durable storage with optional per-entry expiry.

use super::files::{atomic_write, read_file};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(test)]
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Durable get/set store keyed by string
pub trait KeyValueStore {
    /// Read a value; expired entries read as absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one. `expiry` counts from now.
    fn set(&mut self, key: &str, value: &str, expiry: Option<Duration>) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str, expiry: Option<Duration>) -> Result<()> {
        (**self).set(key, value, expiry)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    value: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn new(value: &str, expiry: Option<Duration>, now: DateTime<Utc>) -> Self {
        Self {
            value: value.to_string(),
            expires_at: expiry.map(|d| now + d),
        }
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

/// Store backed by a single JSON document on disk
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Entry>> {
        let content = read_file(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed store file: {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        let now = Utc::now();
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, expiry: Option<Duration>) -> Result<()> {
        // A corrupt document is replaced rather than blocking every later write
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable store file");
                BTreeMap::new()
            }
        };

        let now = Utc::now();
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(key.to_string(), Entry::new(value, expiry, now));

        let json = serde_json::to_string_pretty(&entries)?;
        atomic_write(&self.path, &json)
    }
}

/// In-process store for tests; counts writes
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Entry>,
    writes: usize,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Expiry recorded for a key, if any
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).and_then(|entry| entry.expires_at)
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Utc::now();
        Ok(self
            .entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, expiry: Option<Duration>) -> Result<()> {
        self.entries
            .insert(key.to_string(), Entry::new(value, expiry, Utc::now()));
        self.writes += 1;
        Ok(())
    }
}
