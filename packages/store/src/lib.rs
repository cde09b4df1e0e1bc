pub mod config;
pub mod cookie;
pub mod error;
pub mod geo;
pub mod models;
pub mod session;
pub mod validation;

mod memory;
pub use memory::MemorySessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use cookie::CookieStore;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use config::ProximityConfig;
pub use error::{GeolocationError, NetworkError, ProximityError, ValidationError};
pub use geo::Bounds;
pub use models::{Gender, Location, UserId, UserRecord};
pub use session::{Session, SessionStore, DEFAULT_SESSION_TTL, SESSION_COOKIE};
pub use validation::{validate_login, LoginFields};
