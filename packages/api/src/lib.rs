//! # API crate — server functions behind the Proximity client
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated
//! with `#[get(...)]`, `#[post(...)]` or `#[put(...)]` and compiled twice: once
//! with full server logic (behind `#[cfg(feature = "server")]`) and once as a
//! thin client stub that forwards the call over HTTP.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Argon2id password hashing and verification |
//! | [`db`] | `server` | PostgreSQL pool and `users` queries |
//! | [`models`] | — | The `users` row (`User`, server only) and the client-facing `UserRecord` |
//! | [`settings`] | `server` | `proximity.toml` loading |
//!
//! ## Server functions exposed here
//!
//! | Route | Function |
//! |-------|----------|
//! | `GET /api/users` | [`get_users`] |
//! | `GET /api/users/:uid` | [`get_user`] |
//! | `GET /api/users_near/:uid` | [`get_users_near`] |
//! | `POST /api/users` | [`create_user`] |
//! | `PUT /api/users/:uid` | [`update_user`] |
//! | `POST /api/users/load` | [`load_users`] (debug builds only) |
//!
//! Errors are returned as `ServerFnError` whose message is shown to the user
//! verbatim ("Not found", a validation message, or a database error).

use dioxus::prelude::*;

pub mod auth;
pub mod db;
pub mod models;
#[cfg(feature = "server")]
pub mod settings;

pub use models::UserRecord;

/// List every user.
#[cfg(feature = "server")]
#[get("/api/users")]
pub async fn get_users() -> Result<Vec<UserRecord>, ServerFnError> {
    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let users = db::users::all(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(users.iter().map(|u| u.to_record()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/users")]
pub async fn get_users() -> Result<Vec<UserRecord>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Fetch one user by id.
#[cfg(feature = "server")]
#[get("/api/users/:uid")]
pub async fn get_user(uid: i64) -> Result<UserRecord, ServerFnError> {
    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user = db::users::find(pool, uid)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    user.map(|u| u.to_record())
        .ok_or_else(|| ServerFnError::new("Not found"))
}

#[cfg(not(feature = "server"))]
#[get("/api/users/:uid")]
pub async fn get_user(uid: i64) -> Result<UserRecord, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Users within the configured radius of user `uid`, nearest first.
///
/// The user itself is part of the result.
#[cfg(feature = "server")]
#[get("/api/users_near/:uid")]
pub async fn get_users_near(uid: i64) -> Result<Vec<UserRecord>, ServerFnError> {
    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = db::users::find(pool, uid)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?
    else {
        return Err(ServerFnError::new("Not found"));
    };

    let everyone = db::users::all(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let radius = settings::settings().nearby.radius_meters;
    let near = store::geo::nearest_within(
        user.location(),
        radius,
        everyone.iter().map(|u| u.to_record()),
    );
    tracing::debug!(uid, radius, found = near.len(), "users near");
    Ok(near)
}

#[cfg(not(feature = "server"))]
#[get("/api/users_near/:uid")]
pub async fn get_users_near(uid: i64) -> Result<Vec<UserRecord>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Persist a user coming from the login form.
///
/// A user whose name and password match an existing account is that account
/// logging in again: its profile and location are updated instead of creating
/// a duplicate.
#[cfg(feature = "server")]
#[post("/api/users")]
pub async fn create_user(user: UserRecord) -> Result<UserRecord, ServerFnError> {
    store::validation::validate_record(&user, true)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let (Some(loc), Some(pass)) = (user.loc, user.pass.as_deref()) else {
        return Err(ServerFnError::new("Bad request"));
    };

    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let namesakes = db::users::find_by_name(pool, user.name.trim())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    for existing in namesakes {
        if !auth::verify_password(pass, &existing.password_hash).unwrap_or(false) {
            continue;
        }
        let updated = db::users::update(pool, existing.uid, &user, loc, None)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?
            .ok_or_else(|| ServerFnError::new("Not found"))?;
        tracing::info!(uid = updated.uid, "returning user logged in");
        return Ok(updated.to_record());
    }

    let password_hash = auth::hash_password(pass).map_err(|e| ServerFnError::new(e.to_string()))?;

    let created = db::users::insert(pool, &user, loc, &password_hash)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(uid = created.uid, "user created");
    Ok(created.to_record())
}

#[cfg(not(feature = "server"))]
#[post("/api/users")]
pub async fn create_user(user: UserRecord) -> Result<UserRecord, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update an existing user, typically with a fresh location.
#[cfg(feature = "server")]
#[put("/api/users/:uid")]
pub async fn update_user(uid: i64, user: UserRecord) -> Result<UserRecord, ServerFnError> {
    store::validation::validate_record(&user, false)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let Some(loc) = user.loc else {
        return Err(ServerFnError::new("Bad request"));
    };

    let password_hash = match user.pass.as_deref().filter(|p| !p.is_empty()) {
        Some(pass) => Some(auth::hash_password(pass).map_err(|e| ServerFnError::new(e.to_string()))?),
        None => None,
    };

    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let updated = db::users::update(pool, uid, &user, loc, password_hash.as_deref())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?
        .ok_or_else(|| ServerFnError::new("Not found"))?;

    tracing::debug!(uid, "user updated");
    Ok(updated.to_record())
}

#[cfg(not(feature = "server"))]
#[put("/api/users/:uid")]
pub async fn update_user(uid: i64, user: UserRecord) -> Result<UserRecord, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Replace every user with the fixed development users (`TestUser1`..`3`,
/// passwords `pass1`..`3`).
#[cfg(all(feature = "server", debug_assertions))]
#[post("/api/users/load")]
pub async fn load_users() -> Result<Vec<UserRecord>, ServerFnError> {
    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let users = db::seed::load(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(count = users.len(), "seeded users");
    Ok(users.iter().map(|u| u.to_record()).collect())
}

#[cfg(all(not(feature = "server"), debug_assertions))]
#[post("/api/users/load")]
pub async fn load_users() -> Result<Vec<UserRecord>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
