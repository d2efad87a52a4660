//! Version-specific response shapes built from domain data.
//!
//! Both API versions serve the same fields; v2 additionally embeds
//! hypermedia links. Link emission depends only on the entity id and
//! the request's base URL, never on what the caller is authorized to
//! do with the linked routes.

use actix_web::HttpRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Attendance, AttendanceWithRefs, Event, EventId, EventWithAttendees, Role, User, UserId,
};

/// Which representation flavour a scope serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Plain shapes.
    V1,
    /// Shapes with hypermedia links.
    V2,
}

/// One hypermedia link on a v2 representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

/// Scheme and host the request arrived on, honouring proxy headers the
/// way `ConnectionInfo` does.
pub fn base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

/// Self/update/delete link triple for one resource.
///
/// Links always point at the v2 surface regardless of which version
/// served the enclosing representation.
fn resource_links(collection: &str, noun: &str, id: i32, base_url: &str) -> Vec<Link> {
    let href = format!("{base_url}/api/v2/{collection}/{id}");
    vec![
        Link {
            href: href.clone(),
            rel: "self".into(),
            method: "GET".into(),
        },
        Link {
            href: href.clone(),
            rel: format!("update_{noun}"),
            method: "PUT".into(),
        },
        Link {
            href,
            rel: format!("delete_{noun}"),
            method: "DELETE".into(),
        },
    ]
}

impl ApiVersion {
    fn links_for(self, collection: &str, noun: &str, id: i32, base_url: &str) -> Option<Vec<Link>> {
        match self {
            Self::V1 => None,
            Self::V2 => Some(resource_links(collection, noun, id, base_url)),
        }
    }
}

/// Wire shape for a user. The stored credential is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRepresentation {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl UserRepresentation {
    pub fn new(user: User, version: ApiVersion, base_url: &str) -> Self {
        Self {
            links: version.links_for("users", "user", user.id.value(), base_url),
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Reference shape for a user embedded in another representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Reference shape for an event embedded in another representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub name: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

impl From<Event> for EventSummary {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            location: event.location,
            date: event.date,
        }
    }
}

/// One attendee row embedded in an event representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeRepresentation {
    pub id: i32,
    pub is_attending: bool,
    pub user: UserSummary,
}

/// Wire shape for an event with its attendee list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRepresentation {
    pub id: EventId,
    pub name: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub attendances: Vec<AttendeeRepresentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl EventRepresentation {
    pub fn new(event: EventWithAttendees, version: ApiVersion, base_url: &str) -> Self {
        let attendances = event
            .attendees
            .into_iter()
            .map(|attendee| AttendeeRepresentation {
                id: attendee.attendance.id.value(),
                is_attending: attendee.attendance.is_attending,
                user: attendee.user.into(),
            })
            .collect();
        Self {
            links: version.links_for("events", "event", event.event.id.value(), base_url),
            id: event.event.id,
            name: event.event.name,
            location: event.event.location,
            date: event.event.date,
            attendances,
        }
    }
}

/// Wire shape for an attendance row with both references embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRepresentation {
    pub id: i32,
    pub is_attending: bool,
    pub event: EventSummary,
    pub user: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl AttendanceRepresentation {
    pub fn new(row: AttendanceWithRefs, version: ApiVersion, base_url: &str) -> Self {
        let Attendance {
            id, is_attending, ..
        } = row.attendance;
        Self {
            links: version.links_for("attendances", "attendance", id.value(), base_url),
            id: id.value(),
            is_attending,
            event: row.event.into(),
            user: row.user.into(),
        }
    }
}
