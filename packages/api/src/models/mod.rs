//! Server-side data models.

#[cfg(feature = "server")]
mod user;

#[cfg(feature = "server")]
pub use user::User;
pub use store::UserRecord;
