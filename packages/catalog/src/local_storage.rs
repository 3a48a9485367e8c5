//! # Browser `localStorage` store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the web platform. The
//! storage handle is looked up on every call; `web_sys::Storage` is not `Send`
//! and the lookup is cheap.
//!
//! Errors from the browser (storage disabled, quota exceeded) are surfaced as
//! [`SessionStoreError::Storage`] with the JS error's debug text.

use crate::session::{KeyValueStore, SessionStoreError};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage, SessionStoreError> {
        let window = web_sys::window()
            .ok_or_else(|| SessionStoreError::Storage("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| SessionStoreError::Storage(format!("{e:?}")))?
            .ok_or_else(|| SessionStoreError::Storage("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| SessionStoreError::Storage(format!("{e:?}")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| SessionStoreError::Storage(format!("{e:?}")))
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| SessionStoreError::Storage(format!("{e:?}")))
    }
}
