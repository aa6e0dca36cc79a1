//! `localStorage` backend.

use ratatoskr_persistence::{PersistenceError, Result, Storage};
use wasm_bindgen::JsValue;

/// The window's `localStorage`, if the browser grants one.
///
/// Without it every call fails with [`PersistenceError::Unavailable`]; the
/// widget then runs with an in-memory selection only.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open(window: &web_sys::Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!(error = ?e, "localStorage access denied");
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| PersistenceError::Unavailable {
                reason: "localStorage is not available".to_string(),
            })
    }
}

fn unavailable(operation: &str, error: &JsValue) -> PersistenceError {
    PersistenceError::Unavailable {
        reason: format!("localStorage {operation} failed: {error:?}"),
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| unavailable("read", &e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| unavailable("write", &e))
    }
}
