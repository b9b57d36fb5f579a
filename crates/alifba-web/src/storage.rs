use wasm_bindgen::JsValue;
use web_sys::Storage;

use alifba_core::{KeyValueStore, StoreError};

/// Browser `localStorage` behind the core's key-value seam.
///
/// Opening never fails: when storage is blocked every call reports
/// `StoreError::Unavailable`, which the progress tracker treats as empty.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage is not available; progress will not be saved");
        }
        Self { storage }
    }

    fn handle(&self) -> Result<&Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage is not accessible".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.handle()?.get_item(key).map_err(|err| StoreError::Read {
            key: key.to_string(),
            reason: describe(&err),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.handle()?.set_item(key, value).map_err(|err| StoreError::Write {
            key: key.to_string(),
            reason: describe(&err),
        })
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
