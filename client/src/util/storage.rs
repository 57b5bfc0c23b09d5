//! Browser `localStorage` backend for the recent-queries history.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes hydrate-only read/write behavior behind [`HistoryStore`] so
//! the shell never touches web-sys directly. On the server the store reads
//! as empty and writes are dropped, keeping SSR output deterministic.

use std::sync::Arc;

use prompts::history::{HISTORY_STORAGE_KEY, HistoryStore, HistoryStoreError, RecentQueries};

/// History store keyed under [`HISTORY_STORAGE_KEY`] in `window.localStorage`.
///
/// Holds no browser handles; each call looks the storage up again, so the
/// store stays `Send + Sync`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageHistoryStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, HistoryStoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| HistoryStoreError::Unavailable("localStorage".to_owned()))
}

#[cfg(feature = "hydrate")]
fn js_error(e: &wasm_bindgen::JsValue) -> HistoryStoreError {
    HistoryStoreError::Unavailable(format!("{e:?}"))
}

impl HistoryStore for LocalStorageHistoryStore {
    fn load(&self) -> Result<Option<String>, HistoryStoreError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(HISTORY_STORAGE_KEY).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(None)
        }
    }

    fn save(&self, raw: &str) -> Result<(), HistoryStoreError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .set_item(HISTORY_STORAGE_KEY, raw)
                .map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = raw;
            Ok(())
        }
    }

    fn clear(&self) -> Result<(), HistoryStoreError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .remove_item(HISTORY_STORAGE_KEY)
                .map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(())
        }
    }
}

/// Open the browser-backed history.
pub fn open_history() -> RecentQueries {
    RecentQueries::open(Arc::new(LocalStorageHistoryStore))
}
