//! # User row as stored by the server
//!
//! [`User`] is the complete row of the `users` table and derives
//! [`sqlx::FromRow`]:
//!
//! - `uid` — primary key (`BIGSERIAL`), the id the client addresses users by.
//! - `name`, `age`, `gender`, `looking_for_m`, `looking_for_f` — profile fields
//!   collected by the login form.
//! - `password_hash` — Argon2id PHC string; never leaves the server.
//! - `longitude` / `latitude` — last reported position.
//! - `created_at` / `updated_at` — audit timestamps.
//!
//! [`User::to_record`] projects a row into the client-facing
//! [`UserRecord`](store::UserRecord), dropping the hash and timestamps.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::{Gender, Location, UserRecord};

/// Full user row from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub uid: i64,
    pub name: String,
    pub password_hash: String,
    pub age: i32,
    pub gender: String,
    pub looking_for_m: bool,
    pub looking_for_f: bool,
    pub longitude: f64,
    pub latitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Convert to a UserRecord for client consumption.
    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            uid: Some(self.uid),
            name: self.name.clone(),
            pass: None,
            age: self.age.max(0) as u32,
            gender: Gender::from_code(&self.gender).unwrap_or(Gender::Male),
            looking_for_m: self.looking_for_m,
            looking_for_f: self.looking_for_f,
            loc: Some(self.location()),
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.longitude, self.latitude)
    }
}
