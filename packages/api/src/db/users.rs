//! Queries on the `users` table.

use sqlx::PgPool;
use store::{Location, UserRecord};

use crate::models::User;

/// `age` as stored in the `INTEGER` column.
fn age_column(age: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(age).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

pub async fn all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY uid")
        .fetch_all(pool)
        .await
}

pub async fn find(pool: &PgPool, uid: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE uid = $1")
        .bind(uid)
        .fetch_optional(pool)
        .await
}

/// Every user registered under `name`, oldest first.
pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE name = $1 ORDER BY uid")
        .bind(name)
        .fetch_all(pool)
        .await
}

pub async fn insert(
    pool: &PgPool,
    user: &UserRecord,
    loc: Location,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let age = age_column(user.age)?;
    sqlx::query_as(
        "INSERT INTO users (name, password_hash, age, gender, looking_for_m, looking_for_f, longitude, latitude) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(user.name.trim())
    .bind(password_hash)
    .bind(age)
    .bind(user.gender.code())
    .bind(user.looking_for_m)
    .bind(user.looking_for_f)
    .bind(loc.longitude)
    .bind(loc.latitude)
    .fetch_one(pool)
    .await
}

/// Overwrite the profile and position of `uid`. The password hash is only
/// replaced when a new one is given. Returns `None` if no such user exists.
pub async fn update(
    pool: &PgPool,
    uid: i64,
    user: &UserRecord,
    loc: Location,
    password_hash: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    let age = age_column(user.age)?;
    sqlx::query_as(
        "UPDATE users SET name = $2, password_hash = COALESCE($3, password_hash), age = $4, gender = $5, \
         looking_for_m = $6, looking_for_f = $7, longitude = $8, latitude = $9, updated_at = NOW() \
         WHERE uid = $1 RETURNING *",
    )
    .bind(uid)
    .bind(user.name.trim())
    .bind(password_hash)
    .bind(age)
    .bind(user.gender.code())
    .bind(user.looking_for_m)
    .bind(user.looking_for_f)
    .bind(loc.longitude)
    .bind(loc.latitude)
    .fetch_optional(pool)
    .await
}

/// Remove every user.
pub async fn clear(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let done = sqlx::query("DELETE FROM users").execute(pool).await?;
    Ok(done.rows_affected())
}
