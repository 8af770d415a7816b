//! Values mirrored to persistent storage
//!
//! A [`Persisted`] holds a value in memory for the UI to bind against and
//! writes every change through a [`SafeStorage`] as JSON. It starts detached
//! (server-side render) and is activated once when mounted in a live
//! environment, at which point it adopts whatever was saved earlier.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::platform::SafeStorage;

/// Lifecycle of a persisted binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// Not yet activated in a live environment
    Uninitialized,
    /// Loaded from (and writing to) a live store
    Ready,
}

type Listener<T> = Box<dyn FnMut(&T)>;

/// In-memory value kept in sync with a storage slot
pub struct Persisted<T> {
    key: String,
    value: T,
    /// Set on successful activation, never cleared
    storage: Option<SafeStorage>,
    listeners: Vec<Listener<T>>,
}

impl<T> std::fmt::Debug for Persisted<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("state", &self.state())
            .finish()
    }
}

impl<T> Persisted<T> {
    /// Storage slot this value is mirrored to
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current in-memory value
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.clone()
    }

    pub fn state(&self) -> BindingState {
        if self.storage.is_some() {
            BindingState::Ready
        } else {
            BindingState::Uninitialized
        }
    }

    /// True once activated in a live environment
    pub fn is_ready(&self) -> bool {
        self.state() == BindingState::Ready
    }
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(key: impl Into<String>, initial: T) -> Self {
        Self {
            key: key.into(),
            value: initial,
            storage: None,
            listeners: Vec::new(),
        }
    }

    /// Attach to the environment's storage and load any saved value.
    ///
    /// Returns whether the binding is ready. Storage without a persistent
    /// store is not a live environment, so the binding stays uninitialized.
    /// A saved value that fails to decode is logged and the current value
    /// is kept. Once ready, further calls do nothing.
    pub fn activate(&mut self, storage: SafeStorage) -> bool {
        if self.is_ready() {
            return true;
        }
        if !storage.is_live() {
            log::debug!("Storage key \"{}\" not activated: no live store", self.key);
            return false;
        }

        if let Some(text) = storage.get(&self.key) {
            match serde_json::from_str::<T>(&text) {
                Ok(value) => {
                    log::debug!("Loaded storage key \"{}\"", self.key);
                    self.value = value;
                    self.notify();
                }
                Err(e) => {
                    log::error!("Error reading storage key \"{}\": {e}", self.key);
                }
            }
        }

        self.storage = Some(storage);
        true
    }

    /// Replace the value and write it through
    pub fn set_value(&mut self, value: T) {
        self.value = value;
        self.notify();
        self.write_through();
    }

    /// Read-modify-write against the current value
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.value);
        self.set_value(next);
    }

    /// Register a callback run after every change to the in-memory value
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.value);
        }
    }

    fn write_through(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        match serde_json::to_string(&self.value) {
            Ok(json) => storage.set(&self.key, &json),
            Err(e) => log::error!("Error setting storage key \"{}\": {e}", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{KeyValueStore, MemoryStore, StorageError};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn live() -> (MemoryStore, SafeStorage) {
        let store = MemoryStore::new();
        let storage = SafeStorage::new(store.clone());
        (store, storage)
    }

    #[test]
    fn test_readiness_is_one_way() {
        let (_, storage) = live();
        let mut count = Persisted::new("count", 0_i32);
        assert!(!count.is_ready());
        assert_eq!(count.state(), BindingState::Uninitialized);

        assert!(count.activate(storage.clone()));
        assert!(count.is_ready());

        count.set_value(4);
        assert!(count.activate(SafeStorage::unavailable()));
        assert!(count.is_ready());
        assert_eq!(*count.value(), 4);
    }

    #[test]
    fn test_ready_even_when_nothing_saved() {
        let (_, storage) = live();
        let mut name = Persisted::new("name", String::from("guest"));
        assert!(name.activate(storage));
        assert!(name.is_ready());
        assert_eq!(name.value(), "guest");
    }

    #[test]
    fn test_count_scenario() {
        let mut count = Persisted::new("count", 0_i32);

        // Server render: no store
        let server = SafeStorage::unavailable();
        assert_eq!(server.get("count"), None);
        assert!(!count.activate(server));
        assert!(!count.is_ready());
        assert_eq!(*count.value(), 0);

        // Hydrated in the browser where "5" was saved earlier
        let (store, storage) = live();
        store.set_item("count", "5").unwrap();
        assert!(count.activate(storage));
        assert!(count.is_ready());
        assert_eq!(*count.value(), 5);
    }

    #[test]
    fn test_undecodable_value_keeps_initial() {
        let (store, storage) = live();
        store.set_item("count", "not json{").unwrap();

        let mut count = Persisted::new("count", 1_u32);
        assert!(count.activate(storage));
        assert!(count.is_ready());
        assert_eq!(*count.value(), 1);
        // Slot untouched until the next write
        assert_eq!(store.get_item("count").unwrap().as_deref(), Some("not json{"));
    }

    #[test]
    fn test_wrong_shape_keeps_initial() {
        let (store, storage) = live();
        store.set_item("flags", "\"text\"").unwrap();

        let mut flags = Persisted::new("flags", vec![true, false]);
        flags.activate(storage);
        assert_eq!(flags.get(), vec![true, false]);
    }

    #[test]
    fn test_update_uses_current_value() {
        let (store, storage) = live();
        let mut count = Persisted::new("count", 1_i64);
        count.activate(storage);

        count.update(|x| x + 1);
        count.update(|x| x + 1);
        assert_eq!(*count.value(), 3);
        assert_eq!(store.get_item("count").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn test_detached_setter_stays_in_memory() {
        let mut count = Persisted::new("count", 1_i64);
        count.activate(SafeStorage::unavailable());
        count.update(|x| x * 10);
        assert_eq!(*count.value(), 10);

        // Activation later loads nothing because nothing was written
        let (store, storage) = live();
        count.activate(storage);
        assert_eq!(*count.value(), 10);
        assert!(store.is_empty());
    }

    #[test]
    fn test_writes_are_json() {
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Draft {
            title: String,
            tags: Vec<String>,
        }

        let (store, storage) = live();
        let mut draft = Persisted::new(
            "draft",
            Draft {
                title: String::new(),
                tags: Vec::new(),
            },
        );
        draft.activate(storage.clone());
        draft.update(|d| Draft {
            title: "hello".into(),
            tags: d.tags.iter().cloned().chain(["a".to_string()]).collect(),
        });

        assert_eq!(
            store.get_item("draft").unwrap().as_deref(),
            Some(r#"{"title":"hello","tags":["a"]}"#)
        );

        let mut reloaded = Persisted::new(
            "draft",
            Draft {
                title: String::new(),
                tags: Vec::new(),
            },
        );
        reloaded.activate(storage);
        assert_eq!(reloaded.value(), draft.value());
    }

    #[test]
    fn test_encode_failure_is_swallowed() {
        // Tuple keys cannot be JSON object keys
        let (store, storage) = live();
        let mut grid: Persisted<BTreeMap<(u8, u8), u8>> = Persisted::new("grid", BTreeMap::new());
        grid.activate(storage);

        grid.update(|g| {
            let mut g = g.clone();
            g.insert((1, 2), 3);
            g
        });
        assert_eq!(grid.value().get(&(1, 2)), Some(&3));
        assert!(store.is_empty());
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let (store, storage) = live();
        store.set_item("count", "5").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut count = Persisted::new("count", 0_i32);
        let sink = seen.clone();
        count.subscribe(move |v| sink.borrow_mut().push(*v));

        count.activate(storage);
        count.set_value(6);
        count.update(|x| x * 2);
        assert_eq!(*seen.borrow(), vec![5, 6, 12]);
    }

    /// Store that rejects every operation, like LocalStorage in a locked-down iframe
    struct DeniedStore;

    impl KeyValueStore for DeniedStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Backend("SecurityError".into()))
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("SecurityError".into()))
        }
        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("SecurityError".into()))
        }
        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Backend("SecurityError".into()))
        }
    }

    #[test]
    fn test_failing_store_still_activates() {
        let mut count = Persisted::new("count", 7_i32);
        assert!(count.activate(SafeStorage::new(DeniedStore)));
        assert!(count.is_ready());
        assert_eq!(*count.value(), 7);

        // Writes fail quietly, memory still moves
        count.update(|x| x + 1);
        assert_eq!(*count.value(), 8);
        assert!(count.is_ready());
    }

    proptest! {
        #[test]
        fn prop_round_trip_through_store(
            key in "[a-z_]{1,16}",
            value in proptest::collection::vec((any::<i64>(), ".*", any::<Option<bool>>()), 0..8),
        ) {
            let (_, storage) = live();
            let mut writer = Persisted::new(key.clone(), Vec::new());
            writer.activate(storage.clone());
            writer.set_value(value.clone());

            let mut reader: Persisted<Vec<(i64, String, Option<bool>)>> = Persisted::new(key, Vec::new());
            reader.activate(storage);
            prop_assert_eq!(reader.value(), &value);
        }
    }
}
