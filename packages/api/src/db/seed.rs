//! Fixed test users for local development.

use sqlx::PgPool;
use store::{Gender, Location, UserRecord};

use crate::auth::hash_password;
use crate::models::User;

/// Three users a few kilometres apart, with plaintext passwords.
pub fn seed_users() -> Vec<UserRecord> {
    let user = |n: u32, gender, looking_for_m, looking_for_f| UserRecord {
        uid: None,
        name: format!("TestUser{n}"),
        pass: Some(format!("pass{n}")),
        age: 20 + n,
        gender,
        looking_for_m,
        looking_for_f,
        loc: Some(Location::new(3.9 + n as f64 / 100.0, 51.0 + n as f64 / 100.0)),
    };
    vec![
        user(1, Gender::Male, false, true),
        user(2, Gender::Female, true, false),
        user(3, Gender::Male, true, true),
    ]
}

/// Replace every user with [`seed_users`].
pub async fn load(pool: &PgPool) -> Result<Vec<User>, SeedError> {
    let removed = super::users::clear(pool).await?;
    tracing::info!(removed, "cleared users before seeding");

    let mut created = Vec::new();
    for user in seed_users() {
        let (Some(loc), Some(pass)) = (user.loc, user.pass.as_deref()) else {
            continue;
        };
        let hash = hash_password(pass)?;
        created.push(super::users::insert(pool, &user, loc, &hash).await?);
    }
    Ok(created)
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Password(#[from] crate::auth::PasswordError),
}
