//! Attendance join records linking a user to an event.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Event, EventId, User, UserId};

/// Store-assigned attendance identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i32)]
pub struct AttendanceId(i32);

impl AttendanceId {
    /// Wrap a raw identifier.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for AttendanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistent attendance record.
///
/// Both foreign keys are mandatory; the store never holds a row whose
/// event or user is missing. `is_attending` is a status flag, not a
/// deletion marker: a "not attending" row is a valid row, distinct
/// from absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attendance {
    pub id: AttendanceId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub is_attending: bool,
}

/// Attendance joined with both referenced entities.
///
/// List and get operations serve this view so representations can embed
/// the simplified event and user shapes without further lookups, and so
/// sorting by event name or username works over one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceWithRefs {
    pub attendance: Attendance,
    pub event: Event,
    pub user: User,
}

/// Payload for creating or replacing an attendance record.
///
/// Field presence is enforced by deserialization; referential checks
/// belong to [`crate::domain::ReferentialIntegrity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceDraft {
    pub event_id: EventId,
    pub user_id: UserId,
    pub is_attending: bool,
}
