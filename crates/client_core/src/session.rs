//! Injected session/token storage. The bearer credential obtained at login
//! lives here; nothing else reads or writes it ambiently.

use std::sync::{Mutex, PoisonError};

pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: String);
    fn clear(&self);
}

/// Process-lifetime token cell. Set on login success, cleared on explicit
/// logout or expiry.
#[derive(Default)]
pub struct InMemorySessionStore {
    token: Mutex<Option<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: String) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear_lifecycle() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(), None);
        store.set("tok-1".into());
        assert_eq!(store.get(), Some("tok-1".into()));
        store.set("tok-2".into());
        assert_eq!(store.get(), Some("tok-2".into()));
        store.clear();
        assert_eq!(store.get(), None);
    }
}
