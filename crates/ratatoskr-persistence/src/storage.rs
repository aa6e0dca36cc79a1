//! Key/value storage seam.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

/// A synchronous string key/value store, shaped like the browser's
/// `localStorage`.
///
/// Methods take `&self`: the browser store is a shared handle, and event
/// callbacks only ever hold shared references to it.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store.
///
/// Clones share the same map, so a "reloaded" session built from a clone sees
/// everything written before. Also counts writes, which tests use to observe
/// throttling.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    items: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set_item` calls made through any clone.
    pub fn write_count(&self) -> usize {
        self.inner.writes.get()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.inner.writes.set(self.inner.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_contents() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set_item("k", "v").unwrap();
        assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(other.write_count(), 1);
    }
}
