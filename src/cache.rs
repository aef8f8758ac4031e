//! Timestamped, expiring entries on top of a [`KeyValueStorage`].
//!
//! Each entry is stored as `{"payload": ..., "timestamp": <unix millis>}` under its own key.
//! Entries are checked for age on every read; stale or unreadable entries are removed and
//! reported as a miss.

use crate::clock::Clock;
use crate::errors::StorageResult;
use crate::storage::KeyValueStorage;
use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// --- Well-known keys ---

pub const SHOWDOWN_MOVES_KEY: &str = "showdown-moves-v1";
pub const SHOWDOWN_LEARNSETS_KEY: &str = "showdown-learnsets-v1";
pub const SHOWDOWN_POKEDEX_KEY: &str = "showdown-pokedex-v1";
pub const SHOWDOWN_ITEMS_KEY: &str = "showdown-items-v1";
pub const SHOWDOWN_ABILITIES_KEY: &str = "showdown-abilities-v1";

pub const SHOWDOWN_KEYS: [&str; 5] = [
    SHOWDOWN_MOVES_KEY,
    SHOWDOWN_LEARNSETS_KEY,
    SHOWDOWN_POKEDEX_KEY,
    SHOWDOWN_ITEMS_KEY,
    SHOWDOWN_ABILITIES_KEY,
];

/// Prefix shared by every roster listing key.
pub const LISTING_PREFIX: &str = "dex-";

pub fn generation_listing_key(generation: u8) -> String {
    format!("{}gen-{}-v1", LISTING_PREFIX, generation)
}

pub fn game_listing_key(game_slug: &str) -> String {
    format!("{}game-{}-v1", LISTING_PREFIX, game_slug)
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    payload: T,
    timestamp: i64,
}

/// Which entries [`CacheStore::clear`] removes.
#[derive(Debug, Clone, Copy)]
pub enum ClearScope<'a> {
    Keys(&'a [&'a str]),
    Prefix(&'a str),
}

pub struct CacheStore {
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Return the payload stored under `key` if it is younger than `max_age`.
    pub fn read<T: DeserializeOwned>(&self, key: &str, max_age: Duration) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("cache miss: {}", key);
                return None;
            }
            Err(err) => {
                log::warn!("cache read failed for {}: {}", key, err);
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("discarding unreadable cache entry {}: {}", key, err);
                self.discard(key);
                return None;
            }
        };

        let age = self.clock.now_millis() - entry.timestamp;
        if age < max_age.num_milliseconds() {
            log::debug!("cache hit: {} (age {} ms)", key, age);
            Some(entry.payload)
        } else {
            log::debug!("cache expired: {} (age {} ms)", key, age);
            self.discard(key);
            None
        }
    }

    /// Store `payload` under `key`, stamped with the current time.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, payload: &T) -> StorageResult<()> {
        let entry = CacheEntry {
            payload,
            timestamp: self.clock.now_millis(),
        };
        let raw = serde_json::to_string(&entry)?;
        self.storage.set(key, &raw)
    }

    /// Remove matching entries and return how many were removed.
    pub fn clear(&self, scope: ClearScope<'_>) -> StorageResult<usize> {
        let keys: Vec<String> = match scope {
            ClearScope::Keys(keys) => keys.iter().map(|key| key.to_string()).collect(),
            ClearScope::Prefix(prefix) => self
                .storage
                .keys()?
                .into_iter()
                .filter(|key| key.starts_with(prefix))
                .collect(),
        };

        let mut removed = 0;
        for key in &keys {
            if self.storage.get(key)?.is_some() {
                self.storage.remove(key)?;
                removed += 1;
            }
        }
        log::info!("cleared {} cache entries", removed);
        Ok(removed)
    }

    fn discard(&self, key: &str) {
        if let Err(err) = self.storage.remove(key) {
            log::warn!("could not remove stale cache entry {}: {}", key, err);
        }
    }
}
