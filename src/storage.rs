use leptos::logging::error;
use std::fmt::Debug;
use wasm_bindgen::JsValue;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const IS_ADMIN_KEY: &str = "isAdmin";

/// Key-value store the session is persisted to.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// The browser's `window.localStorage`. Failures are logged and swallowed,
/// the session then simply does not survive a reload.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                error!("Local storage unavailable {err:?}");
                None
            }
        }
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).unwrap_or_else(|err: JsValue| {
            error!("Could not read {key} {err:?}");
            None
        })
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            checked("write", key, storage.set_item(key, value));
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            checked("remove", key, storage.remove_item(key));
        }
    }
}

/// Logs a failed storage write. A token that cannot be removed survives
/// logout and is restored on the next load.
fn checked<E: Debug>(action: &str, key: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            error!("Could not {action} {key} {err:?}");
            false
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
