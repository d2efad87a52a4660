//! The closed role set driving every authorization decision.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role attribute of a [`crate::domain::User`].
///
/// The set is closed: every policy rule and every token claim keys on
/// one of these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// Full access to every operation on every entity kind.
    Admin,
    /// Read-only access to list/get operations.
    User,
}

impl Role {
    /// Canonical string form stored on the user record and in tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure for a role string that is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`, expected `Admin` or `User`")]
pub struct ParseRoleError(pub String);

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Admin", Role::Admin)]
    #[case("admin", Role::Admin)]
    #[case(" USER ", Role::User)]
    fn parses_known_roles(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>().expect("role"), expected);
    }

    #[rstest]
    #[case("root")]
    #[case("")]
    fn rejects_unknown_roles(#[case] input: &str) {
        assert!(input.parse::<Role>().is_err());
    }

    #[rstest]
    fn serialises_canonical_names() {
        assert_eq!(
            serde_json::to_value(Role::Admin).expect("role JSON"),
            serde_json::json!("Admin")
        );
    }
}
