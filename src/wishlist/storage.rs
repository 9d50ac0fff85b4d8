//! # Wishlist Persistence
//!
//! Two layers live here:
//!
//! - `KeyValueStorage` is the durable string store the browser (or any host)
//!   provides. `MemoryStorage` and `FileStorage` implement it.
//! - `PartitionStore` is the persistence adapter. It keeps one JSON blob of
//!   shape `{ actorId: WishlistItem[] }` under a single key and reads or
//!   rewrites exactly one actor's partition per call.
//!
//! ## Invariants
//!
//! - `load` never fails. Missing, unreadable, or malformed data yields an
//!   empty partition and a log line.
//! - `save` and `clear` rewrite the whole blob but copy every other actor's
//!   partition through as raw JSON, byte for byte.
//! - Nothing touches the backend until the hydration guard is open.

use crate::shared::config::WishlistConfig;
use crate::shared::error::{StorageError, WishlistError};
use crate::shared::wishlist::WishlistItem;
use crate::wishlist::hydration::HydrationGuard;
use crate::wishlist::sync::StorageEvents;
use serde_json::value::RawValue;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Durable string key-value store
///
/// All methods take `&self`; implementations use interior mutability so one
/// backend can be shared by several stores (tabs).
pub trait KeyValueStorage: Send + Sync + Debug {
    /// Read a value. `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Succeeds if the key did not exist.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Change notifications for this backend, if it publishes any
    fn events(&self) -> Option<StorageEvents> {
        None
    }
}

fn check_quota(key: &str, value: &str, quota: Option<usize>) -> Result<(), StorageError> {
    match quota {
        Some(limit) if value.len() > limit => Err(StorageError::quota(key, value.len(), limit)),
        _ => Ok(()),
    }
}

/// In-process backend, the equivalent of one browser profile's local storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota: RwLock<Option<usize>>,
    events: StorageEvents,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values longer than `limit` bytes
    pub fn with_quota(self, limit: usize) -> Self {
        self.set_quota(Some(limit));
        self
    }

    /// Set or lift the quota on a shared backend
    pub fn set_quota(&self, limit: Option<usize>) {
        if let Ok(mut quota) = self.quota.write() {
            *quota = limit;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every key and notify subscribers with an unknown-key event
    pub fn clear(&self) -> Result<(), StorageError> {
        self.entries
            .write()
            .map_err(|_| StorageError::unavailable("memory storage lock poisoned"))?
            .clear();
        self.events.publish_cleared();
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::unavailable("memory storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let quota = self.quota.read().map(|q| *q).unwrap_or_default();
        check_quota(key, value, quota)?;
        self.entries
            .write()
            .map_err(|_| StorageError::unavailable("memory storage lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        self.events.publish(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let removed = self
            .entries
            .write()
            .map_err(|_| StorageError::unavailable("memory storage lock poisoned"))?
            .remove(key);
        if removed.is_some() {
            self.events.publish(key);
        }
        Ok(())
    }

    fn events(&self) -> Option<StorageEvents> {
        Some(self.events.clone())
    }
}

/// One file per key under a data directory
///
/// Writes go to a temporary sibling and are renamed into place, so a reader
/// never observes a half-written value.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    quota: Option<usize>,
    events: StorageEvents,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            quota: None,
            events: StorageEvents::default(),
        })
    }

    /// Open the directory and quota named by the configuration
    pub fn from_config(config: &WishlistConfig) -> Result<Self, StorageError> {
        let mut storage = Self::open(&config.data_dir)?;
        storage.quota = config.quota_bytes;
        Ok(storage)
    }

    pub fn with_quota(mut self, limit: usize) -> Self {
        self.quota = Some(limit);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a key; anything outside `[A-Za-z0-9_-]` is hex-escaped
    fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + 5);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
        name.push_str(".json");
        self.dir.join(name)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(key, value, self.quota)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        self.events.publish(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => {
                self.events.publish(key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn events(&self) -> Option<StorageEvents> {
        Some(self.events.clone())
    }
}

/// Blob shape: actor id to that actor's raw, untouched partition JSON
type PartitionMap = BTreeMap<String, Box<RawValue>>;

/// Result of reading one partition
#[derive(Debug, Default)]
pub struct LoadedPartition {
    pub items: Vec<WishlistItem>,
    /// Set when data existed but could not be used
    pub problem: Option<WishlistError>,
}

/// Persistence adapter over a shared key-value backend
#[derive(Debug, Clone)]
pub struct PartitionStore {
    storage: Arc<dyn KeyValueStorage>,
    storage_key: String,
    guard: HydrationGuard,
}

impl PartitionStore {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        storage_key: impl Into<String>,
        guard: HydrationGuard,
    ) -> Self {
        Self {
            storage,
            storage_key: storage_key.into(),
            guard,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Load one actor's items. Never fails.
    pub fn load(&self, actor_id: &str) -> Vec<WishlistItem> {
        self.load_partition(actor_id).items
    }

    /// Load one actor's items and report whether stored data had to be discarded
    pub fn load_partition(&self, actor_id: &str) -> LoadedPartition {
        if !self.guard.is_open() {
            tracing::debug!("[STORAGE] Load before hydration ignored");
            return LoadedPartition::default();
        }

        let raw = match self.storage.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadedPartition::default(),
            Err(e) => {
                tracing::warn!("[STORAGE] Failed to read '{}': {}", self.storage_key, e);
                return LoadedPartition::default();
            }
        };

        let map: PartitionMap = match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("[STORAGE] Corrupt wishlist blob, treating as empty: {}", e);
                return LoadedPartition {
                    items: Vec::new(),
                    problem: Some(WishlistError::corrupt(e.to_string())),
                };
            }
        };

        let Some(partition) = map.get(actor_id) else {
            return LoadedPartition::default();
        };

        match serde_json::from_str::<Vec<WishlistItem>>(partition.get()) {
            Ok(items) => {
                let (items, dropped) = dedup_items(items);
                if dropped > 0 {
                    tracing::warn!(actor = actor_id, dropped, "[STORAGE] Dropped duplicate wishlist entries");
                }
                tracing::debug!(actor = actor_id, count = items.len(), "[STORAGE] Partition loaded");
                LoadedPartition {
                    items,
                    problem: None,
                }
            }
            Err(e) => {
                tracing::warn!(actor = actor_id, "[STORAGE] Corrupt partition, treating as empty: {}", e);
                LoadedPartition {
                    items: Vec::new(),
                    problem: Some(WishlistError::corrupt(e.to_string())),
                }
            }
        }
    }

    /// Replace one actor's partition
    pub fn save(&self, actor_id: &str, items: &[WishlistItem]) -> Result<(), StorageError> {
        if !self.guard.is_open() {
            tracing::debug!("[STORAGE] Save before hydration ignored");
            return Ok(());
        }

        let mut map = self.read_map()?;
        map.insert(actor_id.to_string(), serde_json::value::to_raw_value(items)?);
        self.write_map(&map)?;
        tracing::debug!(actor = actor_id, count = items.len(), "[STORAGE] Partition saved");
        Ok(())
    }

    /// Drop one actor's partition entirely
    pub fn clear(&self, actor_id: &str) -> Result<(), StorageError> {
        if !self.guard.is_open() {
            tracing::debug!("[STORAGE] Clear before hydration ignored");
            return Ok(());
        }

        let mut map = self.read_map()?;
        if map.remove(actor_id).is_none() {
            return Ok(());
        }
        self.write_map(&map)?;
        tracing::debug!(actor = actor_id, "[STORAGE] Partition cleared");
        Ok(())
    }

    /// Current blob for read-modify-write. A corrupt blob cannot be preserved
    /// and is replaced; a read failure aborts the write.
    fn read_map(&self) -> Result<PartitionMap, StorageError> {
        match self.storage.get(&self.storage_key)? {
            None => Ok(PartitionMap::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(map) => Ok(map),
                Err(e) => {
                    tracing::warn!("[STORAGE] Overwriting corrupt wishlist blob: {}", e);
                    Ok(PartitionMap::new())
                }
            },
        }
    }

    fn write_map(&self, map: &PartitionMap) -> Result<(), StorageError> {
        let blob = serde_json::to_string(map)?;
        self.storage.set(&self.storage_key, &blob)
    }
}

/// Keep the first item per dedup key. Items are stored newest first, so the
/// newest entry wins.
fn dedup_items(items: Vec<WishlistItem>) -> (Vec<WishlistItem>, usize) {
    let before = items.len();
    let mut seen = HashSet::with_capacity(before);
    let items: Vec<WishlistItem> = items.into_iter().filter(|item| seen.insert(item.key())).collect();
    let dropped = before - items.len();
    (items, dropped)
}
