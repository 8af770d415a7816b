//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage capability (LocalStorage on web, none during server-side rendering)
//!
//! The capability is resolved once at start-up with [`detect_storage`] and the
//! resulting [`SafeStorage`] handle is passed down to whoever needs it.

pub mod storage;

pub use storage::{KeyValueStore, MemoryStore, SafeStorage, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStore;

/// Resolve the persistent-store capability for this execution context.
#[cfg(target_arch = "wasm32")]
pub fn detect_storage() -> SafeStorage {
    match BrowserStore::from_window() {
        Ok(store) => {
            log::info!("LocalStorage available");
            SafeStorage::new(store)
        }
        Err(e) => {
            log::warn!("LocalStorage unavailable: {e}");
            SafeStorage::unavailable()
        }
    }
}

/// Native builds have no browser store; everything degrades to no-ops.
#[cfg(not(target_arch = "wasm32"))]
pub fn detect_storage() -> SafeStorage {
    log::debug!("No browser environment, storage disabled");
    SafeStorage::unavailable()
}
