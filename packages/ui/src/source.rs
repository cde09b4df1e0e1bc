//! Where user records come from.
//!
//! [`UserSource`] is the seam between the router and the network. The
//! application uses [`ServerUserSource`], which calls the server functions in
//! the `api` crate; tests use an in-memory fake.

use std::future::Future;

use dioxus::prelude::ServerFnError;
use store::{NetworkError, UserId, UserRecord};

/// Async access to the remote user collection.
pub trait UserSource {
    /// Every known user.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<UserRecord>, NetworkError>>;

    /// Users near user `uid`.
    fn fetch_near(&self, uid: UserId) -> impl Future<Output = Result<Vec<UserRecord>, NetworkError>>;

    /// Persist `user`: create when it has no uid yet, update otherwise.
    fn save(&self, user: UserRecord) -> impl Future<Output = Result<UserRecord, NetworkError>>;
}

/// UserSource backed by the `/api/users*` server functions.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerUserSource;

impl UserSource for ServerUserSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, NetworkError> {
        api::get_users()
            .await
            .map_err(network_error)
    }

    async fn fetch_near(&self, uid: UserId) -> Result<Vec<UserRecord>, NetworkError> {
        api::get_users_near(uid)
            .await
            .map_err(network_error)
    }

    async fn save(&self, user: UserRecord) -> Result<UserRecord, NetworkError> {
        let result = match user.uid {
            Some(uid) => api::update_user(uid, user).await,
            None => api::create_user(user).await,
        };
        result.map_err(network_error)
    }
}

/// Keep only the server's own message when there is one; transport failures
/// keep their full description.
fn network_error(error: ServerFnError) -> NetworkError {
    match error {
        ServerFnError::ServerError { message, .. } => NetworkError::new(message),
        other => NetworkError::new(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use store::ProximityError;

    use super::*;

    #[test]
    fn test_server_message_reaches_the_panel_unwrapped() {
        let error = network_error(ServerFnError::new("Not found"));
        assert_eq!(error.message, "Not found");
        assert_eq!(
            ProximityError::SaveFailed(error).to_string(),
            "Could not save user: Not found"
        );
    }
}
