use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::session::{now_millis, Envelope, Session, SessionStore, DEFAULT_SESSION_TTL};

/// In-memory SessionStore for testing and non-browser fallback.
///
/// Sessions are kept as serialized JSON so a record that would not survive
/// the cookie round trip does not survive this one either.
#[derive(Clone, Debug)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<String>>>,
    ttl: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            ttl,
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        let raw = self.slot.lock().ok()?.clone()?;
        let envelope: Envelope = serde_json::from_str(&raw).ok()?;
        envelope.into_live(now_millis())
    }

    fn save(&self, session: &Session) {
        let envelope = Envelope::new(session.clone(), now_millis(), self.ttl);
        let Ok(raw) = serde_json::to_string(&envelope) else {
            return;
        };
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(raw);
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
