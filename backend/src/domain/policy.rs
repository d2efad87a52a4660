//! Role-based authorization policy.
//!
//! The policy is data: one static table keyed by (entity kind,
//! operation) consumed by every service and by both API versions, so
//! role lists cannot drift between surfaces. [`authorize`] runs before
//! a facade touches the store; denial carries zero side effects.

use serde_json::json;

use crate::domain::{Error, Role};

/// The three entity kinds exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Event,
    Attendance,
}

impl EntityKind {
    /// Lowercase name used in error details and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Event => "event",
            EntityKind::Attendance => "attendance",
        }
    }
}

/// The operations a facade exposes per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Lowercase name used in error details and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

const BOTH_ROLES: &[Role] = &[Role::Admin, Role::User];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// One row per (entity kind, operation) pair. Reads are open to both
/// roles; every mutation is admin-only.
static POLICY: [(EntityKind, Operation, &[Role]); 15] = [
    (EntityKind::User, Operation::List, BOTH_ROLES),
    (EntityKind::User, Operation::Get, BOTH_ROLES),
    (EntityKind::User, Operation::Create, ADMIN_ONLY),
    (EntityKind::User, Operation::Update, ADMIN_ONLY),
    (EntityKind::User, Operation::Delete, ADMIN_ONLY),
    (EntityKind::Event, Operation::List, BOTH_ROLES),
    (EntityKind::Event, Operation::Get, BOTH_ROLES),
    (EntityKind::Event, Operation::Create, ADMIN_ONLY),
    (EntityKind::Event, Operation::Update, ADMIN_ONLY),
    (EntityKind::Event, Operation::Delete, ADMIN_ONLY),
    (EntityKind::Attendance, Operation::List, BOTH_ROLES),
    (EntityKind::Attendance, Operation::Get, BOTH_ROLES),
    (EntityKind::Attendance, Operation::Create, ADMIN_ONLY),
    (EntityKind::Attendance, Operation::Update, ADMIN_ONLY),
    (EntityKind::Attendance, Operation::Delete, ADMIN_ONLY),
];

/// Whether `role` may perform `operation` on `kind`.
pub fn is_allowed(role: Role, kind: EntityKind, operation: Operation) -> bool {
    POLICY
        .iter()
        .find(|(k, op, _)| *k == kind && *op == operation)
        .is_some_and(|(_, _, roles)| roles.contains(&role))
}

/// Check the policy table, mapping denial to [`ErrorCode::Forbidden`].
///
/// [`ErrorCode::Forbidden`]: crate::domain::ErrorCode::Forbidden
pub fn authorize(role: Role, kind: EntityKind, operation: Operation) -> Result<(), Error> {
    if is_allowed(role, kind, operation) {
        Ok(())
    } else {
        Err(Error::forbidden(format!(
            "role {role} may not {} {} records",
            operation.as_str(),
            kind.as_str()
        ))
        .with_details(json!({
            "role": role.as_str(),
            "entity": kind.as_str(),
            "operation": operation.as_str(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const KINDS: [EntityKind; 3] = [EntityKind::User, EntityKind::Event, EntityKind::Attendance];

    #[rstest]
    fn admin_may_do_everything() {
        for kind in KINDS {
            for operation in [
                Operation::List,
                Operation::Get,
                Operation::Create,
                Operation::Update,
                Operation::Delete,
            ] {
                assert!(is_allowed(Role::Admin, kind, operation), "{kind:?}/{operation:?}");
            }
        }
    }

    #[rstest]
    fn user_role_is_read_only() {
        for kind in KINDS {
            assert!(is_allowed(Role::User, kind, Operation::List));
            assert!(is_allowed(Role::User, kind, Operation::Get));
            for operation in [Operation::Create, Operation::Update, Operation::Delete] {
                assert!(!is_allowed(Role::User, kind, operation), "{kind:?}/{operation:?}");
            }
        }
    }

    #[rstest]
    fn denial_is_forbidden_with_context() {
        let err = authorize(Role::User, EntityKind::Event, Operation::Delete)
            .expect_err("must be denied");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(
            err.details().and_then(|d| d["operation"].as_str()),
            Some("delete")
        );
    }
}
