//! Environment-safe key/value storage
//!
//! [`KeyValueStore`] is the raw, fallible store (browser LocalStorage or an
//! in-memory map). [`SafeStorage`] is the facade the rest of the crate uses:
//! it never fails, logs backend errors and turns into a no-op when there is
//! no store at all (server-side rendering).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Failures reported by a raw store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Write would exceed the store's capacity
    #[error("storage quota exceeded ({needed} bytes needed, limit is {limit})")]
    QuotaExceeded { needed: usize, limit: usize },
    /// Error raised by the underlying platform store
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A persistent string-to-string store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map, like several handles to one
/// `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<BTreeMap<String, String>>>,
    /// Capacity in bytes (keys + values), unlimited if `None`
    limit: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys + values exceed `limit` bytes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Rc::default(),
            limit: Some(limit),
        }
    }

    /// Number of stored slots
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn used_bytes_except(&self, key: &str) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.limit {
            let needed = self.used_bytes_except(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.items.borrow_mut().clear();
        Ok(())
    }
}

/// Browser `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct BrowserStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    /// Grab LocalStorage from the global window, if there is one
    pub fn from_window() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .ok_or_else(|| StorageError::Backend("no window object".into()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Backend("localStorage is disabled".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(value: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.storage.clear().map_err(js_error)
    }
}

/// Storage accessor that is safe to call in any execution context.
///
/// Holds `None` when the platform has no persistent store; every operation
/// then degrades to an empty result or a no-op. Backend failures are logged
/// and never reach the caller.
#[derive(Clone, Default)]
pub struct SafeStorage {
    store: Option<Rc<dyn KeyValueStore>>,
}

impl fmt::Debug for SafeStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeStorage")
            .field("live", &self.is_live())
            .finish()
    }
}

impl SafeStorage {
    /// Accessor over a live store
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Some(Rc::new(store)),
        }
    }

    /// Accessor for a context without persistent storage
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    /// Whether a persistent store backs this accessor
    pub fn is_live(&self) -> bool {
        self.store.is_some()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Error reading storage key \"{key}\": {e}");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.set_item(key, value) {
            log::error!("Error writing storage key \"{key}\": {e}");
        }
    }

    pub fn remove(&self, key: &str) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.remove_item(key) {
            log::error!("Error removing storage key \"{key}\": {e}");
        }
    }

    pub fn clear(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.clear() {
            log::error!("Error clearing storage: {e}");
        }
    }
}
