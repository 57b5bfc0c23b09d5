//! Recent-queries history with an explicit persistence interface.
//!
//! DESIGN
//! ======
//! `History` is the pure model: a most-recent-first list capped at
//! [`MAX_HISTORY_ITEMS`]. `RecentQueries` pairs it with a [`HistoryStore`]
//! and writes through on every change. Stores deal in the raw JSON array so
//! that every backend (browser `localStorage`, a file, memory) shares one
//! decode path, and entries whose `type` this build does not recognize are
//! dropped on load.
//!
//! Persistence is best-effort. There is a single writer, so a failed write
//! is logged and the in-memory list stays authoritative.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::warn;

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

pub const MAX_HISTORY_ITEMS: usize = 20;

/// Browser storage key holding the serialized history.
pub const HISTORY_STORAGE_KEY: &str = "captionCraftHistory";

// =============================================================================
// MODEL
// =============================================================================

/// Which panel produced a history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Caption,
    Post,
}

impl HistoryKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Caption => "caption",
            Self::Post => "post",
        }
    }
}

/// One past submission. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub query: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    items: Vec<HistoryItem>,
}

impl History {
    /// Build from items already in most-recent-first order, truncating to the cap.
    #[must_use]
    pub fn from_items(mut items: Vec<HistoryItem>) -> Self {
        items.truncate(MAX_HISTORY_ITEMS);
        Self { items }
    }

    /// Decode a persisted JSON array, keeping only entries this build understands.
    ///
    /// A value that is not a JSON array decodes to an empty history.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let values = match serde_json::from_str::<Vec<Value>>(raw) {
            Ok(values) => values,
            Err(e) => {
                warn!(error = %e, "history: discarding unreadable stored history");
                return Self::default();
            }
        };
        let items = values
            .into_iter()
            .filter_map(|v| serde_json::from_value::<HistoryItem>(v).ok())
            .collect();
        Self::from_items(items)
    }

    /// Serialize as the JSON array stores persist.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures, which do not occur for this shape in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    #[must_use]
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Prepend a new entry stamped with `now` and drop the oldest past the cap.
    pub fn push(&mut self, kind: HistoryKind, query: impl Into<String>, now: OffsetDateTime) -> &HistoryItem {
        let id = self.unique_id(timestamp_id(now));
        self.items.insert(0, HistoryItem { id, kind, query: query.into() });
        self.items.truncate(MAX_HISTORY_ITEMS);
        &self.items[0]
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn unique_id(&self, base: String) -> String {
        if self.get(&base).is_none() {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
#[must_use]
pub fn timestamp_id(now: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    now.to_offset(time::UtcOffset::UTC)
        .format(&format)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

// =============================================================================
// STORES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum HistoryStoreError {
    #[error("history storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("history storage unavailable: {0}")]
    Unavailable(String),
}

/// Backend holding the serialized history under a single key.
pub trait HistoryStore: Send + Sync {
    /// Raw stored JSON, or `None` when nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError`] when the backend cannot be read.
    fn load(&self) -> Result<Option<String>, HistoryStoreError>;

    /// Replace the stored JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError`] when the backend cannot be written.
    fn save(&self, raw: &str) -> Result<(), HistoryStoreError>;

    /// Remove the stored value entirely.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError`] when the backend cannot be written.
    fn clear(&self) -> Result<(), HistoryStoreError>;
}

/// In-process store, used by tests and as a fallback when no backend exists.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryHistoryStore {
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Mutex::new(Some(raw.into())) }
    }

    /// Currently stored JSON.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.raw
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Option<String>, HistoryStoreError> {
        Ok(self.raw())
    }

    fn save(&self, raw: &str) -> Result<(), HistoryStoreError> {
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryStoreError> {
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// JSON file store for native clients.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Option<String>, HistoryStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, raw: &str) -> Result<(), HistoryStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// PERSISTED HISTORY
// =============================================================================

/// History bound to a store; every mutation is written through.
#[derive(Clone)]
pub struct RecentQueries {
    history: History,
    store: Arc<dyn HistoryStore>,
}

impl RecentQueries {
    /// Load from `store`. An unreadable store starts empty.
    #[must_use]
    pub fn open(store: Arc<dyn HistoryStore>) -> Self {
        let history = match store.load() {
            Ok(Some(raw)) => History::parse(&raw),
            Ok(None) => History::default(),
            Err(e) => {
                warn!(error = %e, "history: load failed, starting empty");
                History::default()
            }
        };
        Self { history, store }
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn items(&self) -> &[HistoryItem] {
        self.history.items()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.history.get(id)
    }

    /// Record a submission and persist the new list.
    pub fn add(&mut self, kind: HistoryKind, query: impl Into<String>, now: OffsetDateTime) -> HistoryItem {
        let item = self.history.push(kind, query, now).clone();
        self.persist();
        item
    }

    /// Empty the list and remove the persisted value.
    pub fn clear(&mut self) {
        self.history.clear();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "history: clear failed");
        }
    }

    fn persist(&self) {
        let result = self
            .history
            .to_json()
            .map_err(HistoryStoreError::from)
            .and_then(|raw| self.store.save(&raw));
        if let Err(e) = result {
            warn!(error = %e, items = self.history.len(), "history: save failed");
        }
    }
}

impl std::fmt::Debug for RecentQueries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentQueries")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
