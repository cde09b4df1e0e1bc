//! # Client session — who is logged in on this browser
//!
//! A [`Session`] holds exactly one [`UserRecord`]. It lives in client-side
//! storage behind the [`SessionStore`] trait so the router never cares where
//! it is kept:
//!
//! | Implementation | Backing | Expiry |
//! |----------------|---------|--------|
//! | [`crate::MemorySessionStore`] | process memory | tracked in an [`Envelope`] |
//! | `CookieStore` (wasm, `web`) | `document.cookie`, key [`SESSION_COOKIE`] | the cookie's own `expires` attribute |
//! | `LocalStorageStore` (wasm, `web`) | `window.localStorage` | tracked in an [`Envelope`] |
//!
//! Expiry is sliding: every [`save`](SessionStore::save) pushes it `ttl` into
//! the future (the router re-saves on each refresh). An absent, empty,
//! malformed or expired payload is the anonymous state.
//!
//! Like the rest of the storage layer, the trait methods swallow backend
//! errors: a broken store degrades to "nobody is logged in".

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::models::UserRecord;

/// Cookie / storage key holding the session.
pub const SESSION_COOKIE: &str = "proximity.user";

/// Default sliding lifetime of a session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// The logged-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    pub user: UserRecord,
}

impl Session {
    pub fn new(user: UserRecord) -> Self {
        Self { user }
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "{}" {
            return Err(SessionError::Empty);
        }
        Ok(serde_json::from_str(raw)?)
    }
}

/// Storage for the current session.
pub trait SessionStore {
    /// The stored session, if present and not expired.
    fn load(&self) -> Option<Session>;
    /// Store `session`, restarting its expiry.
    fn save(&self, session: &Session);
    /// Forget the session.
    fn clear(&self);
}

impl<T: SessionStore + ?Sized> SessionStore for Box<T> {
    fn load(&self) -> Option<Session> {
        (**self).load()
    }

    fn save(&self, session: &Session) {
        (**self).save(session)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// A session plus its absolute expiry, for backends without native expiry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub session: Session,
    /// Unix time in milliseconds.
    pub expires_at: u64,
}

impl Envelope {
    pub fn new(session: Session, now_ms: u64, ttl: Duration) -> Self {
        Self {
            session,
            expires_at: now_ms.saturating_add(ttl.as_millis() as u64),
        }
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }

    /// The session if it is still valid at `now_ms`.
    pub fn into_live(self, now_ms: u64) -> Option<Session> {
        (!self.is_expired(now_ms)).then_some(self.session)
    }
}

/// Current Unix time in milliseconds.
pub fn now_millis() -> u64 {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Location};

    fn session() -> Session {
        Session::new(UserRecord {
            uid: Some(3),
            name: "TestUser3".to_string(),
            pass: None,
            age: 23,
            gender: Gender::Male,
            looking_for_m: true,
            looking_for_f: true,
            loc: Some(Location::new(3.93, 51.03)),
        })
    }

    #[test]
    fn test_session_json_is_the_bare_user() {
        let json = session().to_json().unwrap();
        assert!(json.starts_with(r#"{"uid":3,"name":"TestUser3""#));
        assert_eq!(Session::from_json(&json).unwrap(), session());
    }

    #[test]
    fn test_empty_payloads_are_rejected() {
        assert!(matches!(Session::from_json(""), Err(SessionError::Empty)));
        assert!(matches!(Session::from_json("{}"), Err(SessionError::Empty)));
        assert!(matches!(
            Session::from_json("{\"name\":"),
            Err(SessionError::Malformed(_))
        ));
    }

    #[test]
    fn test_envelope_expiry() {
        let envelope = Envelope::new(session(), 1_000, Duration::from_secs(1));
        assert_eq!(envelope.expires_at, 2_000);
        assert!(!envelope.is_expired(1_999));
        assert!(envelope.is_expired(2_000));
        assert_eq!(envelope.clone().into_live(1_500), Some(session()));
        assert_eq!(envelope.into_live(2_500), None);
    }
}
