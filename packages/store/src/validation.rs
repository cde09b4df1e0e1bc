//! Login form validation.
//!
//! [`validate_login`] runs the checks in a fixed order and stops at the first
//! failure; the server runs [`validate_record`] on whatever it receives.

use crate::error::ValidationError;
use crate::models::{Gender, UserRecord};

/// Raw values read from the login form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginFields {
    pub name: String,
    pub pass: String,
    pub age: String,
    /// Value of the checked gender radio, if any.
    pub gender: Option<String>,
    pub looking_for_m: bool,
    pub looking_for_f: bool,
}

/// Validate the form and build the candidate record (no uid, no location).
pub fn validate_login(fields: &LoginFields) -> Result<UserRecord, ValidationError> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if fields.pass.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if fields.age.trim().is_empty() {
        return Err(ValidationError::MissingAge);
    }
    let gender = fields
        .gender
        .as_deref()
        .and_then(Gender::from_code)
        .ok_or(ValidationError::MissingGender)?;
    if !fields.looking_for_m && !fields.looking_for_f {
        return Err(ValidationError::MissingPreference);
    }
    let age = parse_age(&fields.age).ok_or(ValidationError::InvalidAge)?;

    Ok(UserRecord {
        uid: None,
        name: name.to_string(),
        pass: Some(fields.pass.clone()),
        age,
        gender,
        looking_for_m: fields.looking_for_m,
        looking_for_f: fields.looking_for_f,
        loc: None,
    })
}

/// Parse an age: a whole number greater than one that fits the `age` column.
pub fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| age_in_range(*age))
}

fn age_in_range(age: u32) -> bool {
    age > 1 && i32::try_from(age).is_ok()
}

/// Server-side check of a record about to be persisted.
///
/// `require_password` is false for updates addressed by uid.
pub fn validate_record(user: &UserRecord, require_password: bool) -> Result<(), ValidationError> {
    if user.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if require_password && user.pass.as_deref().map_or(true, str::is_empty) {
        return Err(ValidationError::MissingPassword);
    }
    if !user.looking_for_m && !user.looking_for_f {
        return Err(ValidationError::MissingPreference);
    }
    if !age_in_range(user.age) {
        return Err(ValidationError::InvalidAge);
    }
    if user.loc.is_none() {
        return Err(ValidationError::MissingLocation);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn filled() -> LoginFields {
        LoginFields {
            name: "Jos".to_string(),
            pass: "pass1".to_string(),
            age: "25".to_string(),
            gender: Some("m".to_string()),
            looking_for_m: false,
            looking_for_f: true,
        }
    }

    #[test]
    fn test_valid_form_builds_candidate() {
        let user = validate_login(&filled()).unwrap();
        assert_eq!(user.name, "Jos");
        assert_eq!(user.pass.as_deref(), Some("pass1"));
        assert_eq!(user.age, 25);
        assert_eq!(user.gender, Gender::Male);
        assert!(!user.looking_for_m);
        assert!(user.looking_for_f);
        assert_eq!(user.uid, None);
        assert_eq!(user.loc, None);
    }

    #[test]
    fn test_negative_age_is_rejected() {
        let fields = LoginFields {
            age: "-5".to_string(),
            ..filled()
        };
        assert_eq!(validate_login(&fields), Err(ValidationError::InvalidAge));
    }

    #[test]
    fn test_age_must_be_whole_and_above_one() {
        assert_eq!(parse_age("25"), Some(25));
        assert_eq!(parse_age(" 40 "), Some(40));
        assert_eq!(parse_age("1"), None);
        assert_eq!(parse_age("0"), None);
        assert_eq!(parse_age("2.5"), None);
        assert_eq!(parse_age("abc"), None);
        assert_eq!(parse_age("2147483647"), Some(2_147_483_647));
        assert_eq!(parse_age("3000000000"), None);
    }

    #[test]
    fn test_oversized_age_is_rejected_everywhere() {
        let fields = LoginFields {
            age: "3000000000".to_string(),
            ..filled()
        };
        assert_eq!(validate_login(&fields), Err(ValidationError::InvalidAge));

        let mut user = validate_login(&filled())
            .unwrap()
            .with_location(Location::new(3.9, 51.0));
        user.age = 3_000_000_000;
        assert_eq!(validate_record(&user, true), Err(ValidationError::InvalidAge));
    }

    #[test]
    fn test_first_failing_check_wins() {
        let empty = LoginFields::default();
        assert_eq!(validate_login(&empty), Err(ValidationError::MissingName));

        let no_pass = LoginFields {
            pass: String::new(),
            age: String::new(),
            ..filled()
        };
        assert_eq!(validate_login(&no_pass), Err(ValidationError::MissingPassword));

        let no_age = LoginFields {
            age: "  ".to_string(),
            gender: None,
            ..filled()
        };
        assert_eq!(validate_login(&no_age), Err(ValidationError::MissingAge));

        let no_gender = LoginFields {
            gender: None,
            age: "-5".to_string(),
            ..filled()
        };
        assert_eq!(validate_login(&no_gender), Err(ValidationError::MissingGender));

        let no_preference = LoginFields {
            looking_for_m: false,
            looking_for_f: false,
            age: "x".to_string(),
            ..filled()
        };
        assert_eq!(
            validate_login(&no_preference),
            Err(ValidationError::MissingPreference)
        );
    }

    #[test]
    fn test_unknown_gender_code_counts_as_missing() {
        let fields = LoginFields {
            gender: Some("x".to_string()),
            ..filled()
        };
        assert_eq!(validate_login(&fields), Err(ValidationError::MissingGender));
    }

    #[test]
    fn test_validate_record_requires_location() {
        let user = validate_login(&filled()).unwrap();
        assert_eq!(
            validate_record(&user, true),
            Err(ValidationError::MissingLocation)
        );

        let located = user.with_location(Location::new(3.9, 51.0));
        assert_eq!(validate_record(&located, true), Ok(()));

        let mut anonymous_update = located.clone();
        anonymous_update.pass = None;
        assert_eq!(
            validate_record(&anonymous_update, true),
            Err(ValidationError::MissingPassword)
        );
        assert_eq!(validate_record(&anonymous_update, false), Ok(()));
    }
}
