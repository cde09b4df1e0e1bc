//! # Error taxonomy
//!
//! Every failure in Proximity is recoverable: it ends up as one line in the
//! error panel. The `Display` output of each type below is that line, so
//! callers only ever need `error.to_string()`.
//!
//! | Type | Raised by |
//! |------|-----------|
//! | [`GeolocationError`] | The geolocation tracker, from the browser's `PositionError` code. |
//! | [`ValidationError`] | Login form validation (and the server's mirror of it). |
//! | [`NetworkError`] | The user data source, wrapping a transport or server message. |
//! | [`SessionError`] | Decoding a stored session payload. |
//! | [`ProximityError`] | The router and the map view; wraps the above and adds their own failures. |

use thiserror::Error;

/// Why the browser could not give us a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Could not get current position: User denied the request for Geolocation.")]
    PermissionDenied,
    #[error("Could not get current position: Location information is unavailable.")]
    Unavailable,
    #[error("Could not get current position: The request to get user location timed out.")]
    Timeout,
    #[error("Could not get current position: An unknown error occurred.")]
    Unknown,
    #[error("Browser does not support GeoLocation.")]
    Unsupported,
}

impl GeolocationError {
    /// Map a `PositionError.code` to its reason.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::Unavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::Unavailable => "unavailable",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
            Self::Unsupported => "unsupported",
        }
    }
}

/// First failing check of the login form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in your name.")]
    MissingName,
    #[error("Please fill in your password.")]
    MissingPassword,
    #[error("Please fill in your age.")]
    MissingAge,
    #[error("Please fill in your gender.")]
    MissingGender,
    #[error("Please fill in if you're looking for men or women.")]
    MissingPreference,
    #[error("Age must be a positive number.")]
    InvalidAge,
    #[error("Location required to log in.")]
    MissingLocation,
}

impl ValidationError {
    /// Name of the form field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingPassword => "pass",
            Self::MissingAge | Self::InvalidAge => "age",
            Self::MissingGender => "gender",
            Self::MissingPreference => "looking_for",
            Self::MissingLocation => "loc",
        }
    }
}

/// A transport or server failure, carrying the message to display.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NetworkError {
    pub message: String,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session payload is empty")]
    Empty,
    #[error("malformed session payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Anything the router can show in the error panel.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ProximityError {
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Location required to log in.")]
    LocationRequired,
    #[error("Could not save user: {0}")]
    SaveFailed(NetworkError),
    #[error("Could not fetch users: {0}")]
    FetchFailed(NetworkError),
    #[error("Error fetching users near current user, try logging in again.")]
    NearbyUnavailable,
    #[error("Could not load the map: {0}")]
    MapUnavailable(String),
}
