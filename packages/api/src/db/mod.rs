//! # Database module — PostgreSQL persistence for user records
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so client (WASM) builds
//! never pull in SQLx.
//!
//! - [`get_pool`] — process-wide pool, opened lazily from `DATABASE_URL`.
//! - [`users`] — the queries behind the user server functions.
//! - [`seed`] — fixed test users for local development.
//!
//! The schema lives in `packages/api/migrations` and is applied by the web
//! server on startup.

#[cfg(feature = "server")]
mod pool;
#[cfg(feature = "server")]
pub mod seed;
#[cfg(feature = "server")]
pub mod users;

#[cfg(feature = "server")]
pub use pool::{get_pool, DbError};
