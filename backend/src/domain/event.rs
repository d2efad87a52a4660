//! Event records and the attendee view embedded in event responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::required_field;
use crate::domain::{Attendance, Error, User};

/// Store-assigned event identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i32)]
pub struct EventId(i32);

impl EventId {
    /// Wrap a raw identifier.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistent event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

/// One attendance row joined with the attending user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAttendee {
    pub attendance: Attendance,
    pub user: User,
}

/// Event joined with its attendance rows, as served by list/get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWithAttendees {
    pub event: Event,
    pub attendees: Vec<EventAttendee>,
}

const NAME_LIMIT: usize = 100;
const LOCATION_LIMIT: usize = 200;

/// Validated payload for creating or replacing an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

impl EventDraft {
    /// Validate raw payload fields into a draft.
    pub fn try_new(name: &str, location: &str, date: DateTime<Utc>) -> Result<Self, Error> {
        Ok(Self {
            name: required_field("name", name, NAME_LIMIT)?,
            location: required_field("location", location, LOCATION_LIMIT)?,
            date,
        })
    }
}
