//! A keyed, insertion-order-preserving registry (§4.4.3 "the registry
//! preserves insertion order and `*/list` emits that order; re-registering
//! the same key replaces the prior entry... and removal is idempotent").

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Registry<T> {
    entries: IndexMap<String, T>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Inserts or replaces the entry under `key`. Last writer wins; the
    /// key's position is only set on first insertion (re-registration
    /// does not move it to the back).
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), value);
    }

    /// Idempotent: removing an absent key is a no-op, not an error.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.entries.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// A point-in-time snapshot in insertion order — the caller owns the
    /// resulting `Vec`, so a concurrent add/remove afterward cannot tear
    /// the view the caller already took (§5 "Ordering guarantees").
    pub fn list(&self) -> Vec<&T> {
        self.entries.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_preserves_insertion_order() {
        let mut registry = Registry::new();
        registry.insert("c", 3);
        registry.insert("a", 1);
        registry.insert("b", 2);
        assert_eq!(registry.list(), vec![&3, &1, &2]);
    }

    #[test]
    fn reregistration_replaces_value_without_moving_position() {
        let mut registry = Registry::new();
        registry.insert("a", 1);
        registry.insert("b", 2);
        registry.insert("a", 99);
        assert_eq!(registry.list(), vec![&99, &2]);
    }

    #[test]
    fn removal_is_idempotent() {
        let mut registry: Registry<i32> = Registry::new();
        assert!(registry.remove("missing").is_none());
        registry.insert("a", 1);
        assert_eq!(registry.remove("a"), Some(1));
        assert!(registry.remove("a").is_none());
    }
}
