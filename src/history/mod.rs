//! Most-recent-first query history. Storage failures are logged, never returned.

mod entries;
mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

pub const ROUTE_HISTORY_KEY: &str = "route_search_history";
pub const ROUTE_HISTORY_CAPACITY: usize = 12;
pub const PLACE_HISTORY_KEY: &str = "place_search_history";
pub const PLACE_HISTORY_CAPACITY: usize = 10;

pub trait HistoryEntry: Clone + Serialize + DeserializeOwned + Send {
    const STORAGE_KEY: &'static str;
    const CAPACITY: usize;

    fn id(&self) -> Uuid;

    fn is_blank(&self) -> bool;

    /// Whether `other` describes the same query and should replace this entry.
    fn same_query(&self, other: &Self) -> bool;

    /// Trims text, recomputes the stable id and stamps the entry as touched at `now`.
    fn touch(&mut self, now: DateTime<Utc>);
}

pub struct HistoryStore<T> {
    storage: Arc<dyn KeyValueStore>,
    items: Vec<T>,
    loaded: bool,
}

impl<T: HistoryEntry> HistoryStore<T> {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            items: Vec::new(),
            loaded: false,
        }
    }

    pub fn load(&mut self) -> &[T] {
        if !self.loaded {
            self.items = self.read();
            self.loaded = true;
        }

        &self.items
    }

    pub fn items(&mut self) -> &[T] {
        self.load()
    }

    /// Inserts `item` at the front, replacing an entry for the same query.
    /// Returns `false` without touching anything when the item is blank.
    #[tracing::instrument(skip_all, fields(key = T::STORAGE_KEY))]
    pub fn add(&mut self, mut item: T) -> bool {
        self.load();

        if item.is_blank() {
            tracing::debug!("ignoring history entry with blank text");
            return false;
        }

        item.touch(Utc::now());

        if let Some(index) = self.items.iter().position(|existing| existing.same_query(&item)) {
            tracing::debug!(id = %item.id(), "moving existing history entry to front");
            self.items.remove(index);
        }

        self.items.insert(0, item);
        self.items.truncate(T::CAPACITY);
        self.persist();

        true
    }

    #[tracing::instrument(skip(self), fields(key = T::STORAGE_KEY))]
    pub fn remove(&mut self, id: Uuid) -> bool {
        self.load();

        let before = self.items.len();
        self.items.retain(|existing| existing.id() != id);
        let removed = self.items.len() != before;

        self.persist();
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.loaded = true;
        self.persist();
    }

    fn read(&self) -> Vec<T> {
        let raw = match self.storage.get(T::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(key = T::STORAGE_KEY, "failed to read history: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(mut items) => {
                items.truncate(T::CAPACITY);
                items
            }
            Err(err) => {
                tracing::warn!(key = T::STORAGE_KEY, "discarding corrupt history: {}", err);
                Vec::new()
            }
        }
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(key = T::STORAGE_KEY, "failed to encode history: {}", err);
                return;
            }
        };

        if let Err(err) = self.storage.set(T::STORAGE_KEY, &encoded) {
            tracing::warn!(key = T::STORAGE_KEY, "failed to persist history: {}", err);
        }
    }
}
