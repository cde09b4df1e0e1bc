//! Platform-appropriate session store.
//!
//! - **Web** (WASM + `web` feature): the `proximity.user` cookie, or
//!   `localStorage` when asked for
//! - **Everywhere else** (server render, tests): process memory

use std::time::Duration;

use store::SessionStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionBackend {
    #[default]
    Cookie,
    LocalStorage,
    Memory,
}

/// Create the session store for `backend` with a sliding lifetime of `ttl`.
///
/// Browser backends fall back to memory when the build has no browser access.
pub fn make_session_store(backend: SessionBackend, ttl: Duration) -> Box<dyn SessionStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        match backend {
            SessionBackend::Cookie => Box::new(store::CookieStore::with_ttl(ttl)),
            SessionBackend::LocalStorage => Box::new(store::LocalStorageStore::with_ttl(ttl)),
            SessionBackend::Memory => Box::new(store::MemorySessionStore::with_ttl(ttl)),
        }
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        if backend != SessionBackend::Memory {
            tracing::debug!(?backend, "no browser storage, keeping session in memory");
        }
        Box::new(store::MemorySessionStore::with_ttl(ttl))
    }
}
