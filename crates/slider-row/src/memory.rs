//! Durable, globally shared memory of coupling-relevant entity states.
//!
//! Keys are plain entity ids with no per-row namespace, so every row on every
//! dashboard sees the same entries. Interleaved writes from different rows
//! are last-write-wins.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// The durable key-value store the memory lives in (`localStorage` in the
/// browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    fn keys(&self) -> Vec<String>;
}

/// A process-local store, for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: BTreeMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Several rows sharing one store, as rows on one page share `localStorage`.
impl<S: KeyValueStore> KeyValueStore for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Option<String> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.borrow_mut().set(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.borrow_mut().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.borrow().keys()
    }
}

/// Entity id → last observed state token, for entities observed in a
/// tracked condition. A missing key means "not in that condition".
#[derive(Debug)]
pub struct VisibilityMemory<S> {
    store: S,
}

impl<S: KeyValueStore> VisibilityMemory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record that `entity` is currently in the tracked condition.
    pub fn remember(&mut self, entity: &str, state: &str) {
        if self.store.get(entity).as_deref() != Some(state) {
            tracing::trace!(entity, state, "remembering entity state");
            self.store.set(entity, state);
        }
    }

    /// Clear any record for `entity`.
    pub fn forget(&mut self, entity: &str) {
        if self.store.get(entity).is_some() {
            tracing::trace!(entity, "forgetting entity state");
            self.store.remove(entity);
        }
    }

    pub fn recall(&self, entity: &str) -> Option<String> {
        self.store.get(entity)
    }

    /// Whether any remembered entity id starts with `prefix`.
    pub fn any_with_prefix(&self, prefix: &str) -> bool {
        self.store.keys().iter().any(|key| key.starts_with(prefix))
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_and_forget() {
        let mut memory = VisibilityMemory::new(InMemoryStore::new());
        memory.remember("cover.window_5", "open");
        assert_eq!(memory.recall("cover.window_5").as_deref(), Some("open"));
        memory.forget("cover.window_5");
        assert_eq!(memory.recall("cover.window_5"), None);
        // Forgetting twice is harmless.
        memory.forget("cover.window_5");
    }

    #[test]
    fn test_prefix_scan() {
        let mut memory = VisibilityMemory::new(InMemoryStore::new());
        assert!(!memory.any_with_prefix("cover.window_"));
        memory.remember("cover.window_kitchen", "open");
        assert!(memory.any_with_prefix("cover.window_"));
        assert!(!memory.any_with_prefix("cover.door_"));
    }

    #[test]
    fn test_shared_store_is_last_write_wins() {
        let shared = Rc::new(RefCell::new(InMemoryStore::new()));
        let mut a = VisibilityMemory::new(Rc::clone(&shared));
        let mut b = VisibilityMemory::new(Rc::clone(&shared));
        a.remember("cover.window_1", "open");
        assert_eq!(b.recall("cover.window_1").as_deref(), Some("open"));
        b.forget("cover.window_1");
        assert_eq!(a.recall("cover.window_1"), None);
        assert!(shared.borrow().keys().is_empty());
    }
}
