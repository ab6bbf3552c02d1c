//! Session token persistence in the browser's local storage.

use gloo::storage::{LocalStorage, Storage};

const TOKEN_KEY: &str = "token";

pub fn load_token() -> Option<String> {
    LocalStorage::get(TOKEN_KEY).ok()
}

pub fn save_token(token: &str) {
    if let Err(e) = LocalStorage::set(TOKEN_KEY, token) {
        tracing::error!("Failed to store token: {:?}", e);
    }
}

pub fn clear_token() {
    LocalStorage::delete(TOKEN_KEY);
}
