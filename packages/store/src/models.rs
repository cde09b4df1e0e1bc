//! # Domain models for users and their positions
//!
//! Defines the records exchanged between the Proximity client, the session
//! store, and the server functions in the `api` crate. Every type is
//! `Serialize + Deserialize` so the same struct crosses the server/client
//! boundary and is mirrored into the session cookie untouched.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`UserRecord`] | One user: identity, profile fields, preferences and last known location. The wire names (`uid`, `pass`, `looking_for_m`, `looking_for_f`, `loc`) are the ones the HTTP API speaks. |
//! | [`Location`] | A `[longitude, latitude]` pair, serialized as a two-element array. |
//! | [`Gender`] | `"m"` or `"f"`. |
//!
//! A record is created by the login form without a `uid` or a location, gets its
//! location from the geolocation tracker, and receives its `uid` from the server
//! when it is first persisted. The password only travels client → server; the
//! server never fills it in on the way back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned user identifier.
pub type UserId = i64;

/// A geographic position stored as `[longitude, latitude]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

impl Location {
    pub const ORIGIN: Location = Location {
        longitude: 0.0,
        latitude: 0.0,
    };

    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<[f64; 2]> for Location {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Location> for [f64; 2] {
    fn from(loc: Location) -> Self {
        [loc.longitude, loc.latitude]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Gender {
    /// Parse the value of the gender radio group.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "m" => Some(Self::Male),
            "f" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("Male"),
            Self::Female => f.write_str("Female"),
        }
    }
}

/// A Proximity user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Assigned by the server on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<UserId>,
    pub name: String,
    /// Plaintext password, only present on records headed for the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    pub age: u32,
    pub gender: Gender,
    pub looking_for_m: bool,
    pub looking_for_f: bool,
    /// Last known position; required before the record can be saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Location>,
}

impl UserRecord {
    /// Attach a location, replacing any previous one.
    pub fn with_location(mut self, loc: Location) -> Self {
        self.loc = Some(loc);
        self
    }

    /// Whether both records refer to the same persisted user.
    pub fn same_user(&self, other: &UserRecord) -> bool {
        matches!((self.uid, other.uid), (Some(a), Some(b)) if a == b)
    }

    /// Human-readable description of who this user is looking for.
    pub fn seeking_label(&self) -> &'static str {
        match (self.looking_for_m, self.looking_for_f) {
            (true, true) => "Men and women",
            (true, false) => "Men",
            (false, true) => "Women",
            (false, false) => "Nobody",
        }
    }

    /// Label/value pairs shown in a map popup.
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Age", self.age.to_string()),
            ("Gender", self.gender.to_string()),
            ("Looking for", self.seeking_label().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserRecord {
        UserRecord {
            uid: Some(7),
            name: "TestUser1".to_string(),
            pass: None,
            age: 21,
            gender: Gender::Male,
            looking_for_m: false,
            looking_for_f: true,
            loc: Some(Location::new(3.91, 51.01)),
        }
    }

    #[test]
    fn test_wire_format_uses_api_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["uid"], 7);
        assert_eq!(json["gender"], "m");
        assert_eq!(json["looking_for_f"], true);
        assert_eq!(json["loc"][0], 3.91);
        assert_eq!(json["loc"][1], 51.01);
        assert!(json.get("pass").is_none());
    }

    #[test]
    fn test_record_without_uid_or_location_parses() {
        let json = r#"{"name":"Jos","pass":"secret","age":23,"gender":"f","looking_for_m":true,"looking_for_f":false}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.uid, None);
        assert_eq!(user.loc, None);
        assert_eq!(user.pass.as_deref(), Some("secret"));
        assert_eq!(user.gender, Gender::Female);
    }

    #[test]
    fn test_same_user_requires_both_ids() {
        let a = sample();
        let mut b = sample();
        assert!(a.same_user(&b));
        b.uid = None;
        assert!(!a.same_user(&b));
        assert!(!b.same_user(&b));
    }

    #[test]
    fn test_display_fields() {
        let fields = sample().display_fields();
        assert_eq!(fields[0], ("Age", "21".to_string()));
        assert_eq!(fields[1], ("Gender", "Male".to_string()));
        assert_eq!(fields[2], ("Looking for", "Women".to_string()));
    }
}
