//! # Cookie session store — the browser default
//!
//! [`CookieStore`] keeps the session in a single cookie named
//! [`SESSION_COOKIE`](crate::SESSION_COOKIE) whose value is the URI-encoded JSON
//! of the user record:
//!
//! ```text
//! proximity.user=%7B%22uid%22%3A1%2C...%7D; expires=Sat, 17 Oct 2026 10:30:00 GMT; path=/; SameSite=Lax
//! ```
//!
//! `save` sets `expires` to now + ttl (30 minutes by default); `clear`
//! overwrites the cookie with an empty value that expired one second ago, so
//! the browser drops it immediately.
//!
//! Parsing `document.cookie` is plain string work and lives in [`find_cookie`]
//! so it is testable off the browser.

/// Find the raw value of cookie `name` in a `document.cookie` string.
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Build a `document.cookie` assignment.
pub fn cookie_assignment(name: &str, value: &str, expires: &str) -> String {
    format!("{name}={value}; expires={expires}; path=/; SameSite=Lax")
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::CookieStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser {
    use std::time::Duration;

    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    use super::{cookie_assignment, find_cookie};
    use crate::session::{Session, SessionStore, DEFAULT_SESSION_TTL, SESSION_COOKIE};

    /// `document.cookie`-backed SessionStore.
    #[derive(Clone, Debug)]
    pub struct CookieStore {
        name: String,
        ttl: Duration,
    }

    impl Default for CookieStore {
        fn default() -> Self {
            Self::with_ttl(DEFAULT_SESSION_TTL)
        }
    }

    impl CookieStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_ttl(ttl: Duration) -> Self {
            Self {
                name: SESSION_COOKIE.to_string(),
                ttl,
            }
        }

        fn document() -> Option<HtmlDocument> {
            web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
        }

        /// UTC timestamp `offset_ms` from now, in cookie `expires` format.
        fn expires_in(offset_ms: f64) -> String {
            let date = js_sys::Date::new_0();
            date.set_time(js_sys::Date::now() + offset_ms);
            String::from(date.to_utc_string())
        }

        fn write(&self, value: &str, offset_ms: f64) {
            let Some(document) = Self::document() else {
                return;
            };
            let assignment = cookie_assignment(&self.name, value, &Self::expires_in(offset_ms));
            if let Err(e) = document.set_cookie(&assignment) {
                tracing::warn!("could not write session cookie: {:?}", e);
            }
        }
    }

    impl SessionStore for CookieStore {
        fn load(&self) -> Option<Session> {
            let cookies = Self::document()?.cookie().ok()?;
            let raw = find_cookie(&cookies, &self.name)?;
            if raw.is_empty() {
                return None;
            }
            let json = js_sys::decode_uri_component(raw).ok()?;
            Session::from_json(&String::from(json)).ok()
        }

        fn save(&self, session: &Session) {
            let Ok(json) = session.to_json() else {
                return;
            };
            let encoded = String::from(js_sys::encode_uri_component(&json));
            self.write(&encoded, self.ttl.as_millis() as f64);
        }

        fn clear(&self) {
            self.write("", -1000.0);
        }
    }
}
