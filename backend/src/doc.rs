//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the specification for the REST API: every
//! entity endpoint, the login endpoint, all request/response schemas,
//! and the bearer token security scheme. Endpoints are documented once
//! under their `/api/v2` paths; the `/api/v1` mirror differs only in
//! the absence of hypermedia links.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Role};
use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::representations::{
    AttendanceRepresentation, AttendeeRepresentation, EventRepresentation, EventSummary, Link,
    UserRepresentation, UserSummary,
};
use crate::inbound::http::{attendances, auth, events, users};

/// Enrich the generated document with the bearer token scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Token issued by POST /api/v2/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Eventify backend API",
        description = "Role-gated CRUD over users, events, and attendance records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        auth::login,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        events::list_events,
        events::get_event,
        events::create_event,
        events::update_event,
        events::delete_event,
        attendances::list_attendances,
        attendances::get_attendance,
        attendances::create_attendance,
        attendances::update_attendance,
        attendances::delete_attendance,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Link,
        LoginRequest,
        LoginResponse,
        users::UserPayload,
        events::EventPayload,
        attendances::AttendancePayload,
        UserRepresentation,
        UserSummary,
        EventRepresentation,
        EventSummary,
        AttendeeRepresentation,
        AttendanceRepresentation,
    )),
    tags(
        (name = "auth", description = "Credential verification and token issue"),
        (name = "users", description = "User management"),
        (name = "events", description = "Event management"),
        (name = "attendances", description = "Attendance records linking users to events")
    )
)]
pub struct ApiDoc;
