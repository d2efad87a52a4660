//! User identity records.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{Error, Role};

/// Store-assigned user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i32)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistent user record.
///
/// The password field never leaves the domain: representations project
/// users through [`crate::inbound::http::representations::UserRepresentation`],
/// which omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Validated payload for creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub role: Role,
}

const FIELD_LIMIT: usize = 50;

impl UserDraft {
    /// Validate raw payload fields into a draft.
    ///
    /// Required fields must be non-blank, the email must have a
    /// plausible mailbox shape, and the role must parse into the
    /// closed set. Failures signal [`ErrorCode::InvalidInput`] and
    /// never reach the store.
    ///
    /// [`ErrorCode::InvalidInput`]: crate::domain::ErrorCode::InvalidInput
    pub fn try_new(
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Self, Error> {
        let username = required_field("username", username, FIELD_LIMIT)?;
        let email = required_field("email", email, FIELD_LIMIT)?;
        if !has_mailbox_shape(&email) {
            return Err(Error::invalid_input("email must be a valid address")
                .with_details(json!({ "field": "email", "code": "invalid_email" })));
        }
        if password.is_empty() {
            return Err(blank_field_error("password"));
        }
        if password.len() > FIELD_LIMIT {
            return Err(too_long_error("password", FIELD_LIMIT));
        }
        let role: Role = role
            .parse()
            .map_err(|err: crate::domain::ParseRoleError| {
                Error::invalid_input(err.to_string())
                    .with_details(json!({ "field": "role", "code": "unknown_role" }))
            })?;

        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
            role,
        })
    }
}

pub(crate) fn required_field(field: &'static str, value: &str, limit: usize) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(blank_field_error(field));
    }
    if trimmed.len() > limit {
        return Err(too_long_error(field, limit));
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn blank_field_error(field: &'static str) -> Error {
    Error::invalid_input(format!("{field} must not be blank"))
        .with_details(json!({ "field": field, "code": "blank_field" }))
}

pub(crate) fn too_long_error(field: &'static str, limit: usize) -> Error {
    Error::invalid_input(format!("{field} must be at most {limit} characters"))
        .with_details(json!({ "field": field, "code": "too_long" }))
}

fn has_mailbox_shape(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn accepts_valid_payload_and_trims() {
        let draft = UserDraft::try_new("  ada  ", "ada@example.org", "s3cret", "admin")
            .expect("valid draft");
        assert_eq!(draft.username, "ada");
        assert_eq!(draft.role, Role::Admin);
    }

    #[rstest]
    #[case("", "a@b.c", "pw", "User", "username")]
    #[case("ada", "   ", "pw", "User", "email")]
    #[case("ada", "a@b.c", "", "User", "password")]
    fn rejects_blank_required_fields(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] role: &str,
        #[case] field: &str,
    ) {
        let err = UserDraft::try_new(username, email, password, role).expect_err("invalid");
        assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some(field));
    }

    #[rstest]
    #[case("not-an-address")]
    #[case("@domain")]
    #[case("local@")]
    fn rejects_malformed_email(#[case] email: &str) {
        let err = UserDraft::try_new("ada", email, "pw", "User").expect_err("invalid email");
        assert_eq!(
            err.details().and_then(|d| d["code"].as_str()),
            Some("invalid_email")
        );
    }

    #[rstest]
    fn rejects_unknown_role() {
        let err = UserDraft::try_new("ada", "a@b.c", "pw", "root").expect_err("invalid role");
        assert_eq!(
            err.details().and_then(|d| d["code"].as_str()),
            Some("unknown_role")
        );
    }

    #[rstest]
    fn rejects_overlong_fields() {
        let long = "x".repeat(51);
        let err = UserDraft::try_new(&long, "a@b.c", "pw", "User").expect_err("too long");
        assert_eq!(
            err.details().and_then(|d| d["code"].as_str()),
            Some("too_long")
        );
    }
}
