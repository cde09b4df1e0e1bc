//! `window.localStorage`-backed SessionStore.
//!
//! localStorage has no expiry of its own, so the session is stored inside an
//! [`Envelope`] and checked on every load. An expired envelope is removed.

use std::time::Duration;

use crate::session::{now_millis, Envelope, Session, SessionStore, DEFAULT_SESSION_TTL, SESSION_COOKIE};

#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    key: String,
    ttl: Duration,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            key: SESSION_COOKIE.to_string(),
            ttl,
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> Option<Session> {
        let storage = Self::storage()?;
        let raw = storage.get_item(&self.key).ok()??;
        let envelope: Envelope = serde_json::from_str(&raw).ok()?;
        let live = envelope.into_live(now_millis());
        if live.is_none() {
            let _ = storage.remove_item(&self.key);
        }
        live
    }

    fn save(&self, session: &Session) {
        let Some(storage) = Self::storage() else {
            return;
        };
        let envelope = Envelope::new(session.clone(), now_millis(), self.ttl);
        if let Ok(raw) = serde_json::to_string(&envelope) {
            let _ = storage.set_item(&self.key, &raw);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
