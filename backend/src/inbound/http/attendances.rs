//! Attendances API handlers.
//!
//! Create and update bodies carry raw entity ids; the domain rejects
//! dangling references with a 400 rather than creating orphan rows.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::PagedResult;
use serde::{Deserialize, Serialize};

use crate::domain::query::AttendanceSortKey;
use crate::domain::{AttendanceDraft, AttendanceId, Error, EventId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Actor;
use crate::inbound::http::query::ListQuery;
use crate::inbound::http::representations::{ApiVersion, AttendanceRepresentation, base_url};
use crate::inbound::http::state::HttpState;

/// Create/replace request body for attendance rows.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePayload {
    pub event_id: i32,
    pub user_id: i32,
    pub is_attending: bool,
}

impl From<AttendancePayload> for AttendanceDraft {
    fn from(payload: AttendancePayload) -> Self {
        Self {
            event_id: EventId::new(payload.event_id),
            user_id: UserId::new(payload.user_id),
            is_attending: payload.is_attending,
        }
    }
}

/// Paged attendance listing with both references embedded.
#[utoipa::path(
    get,
    path = "/api/v2/attendances",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of attendances", body = PagedResult<AttendanceRepresentation>),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["attendances"],
    operation_id = "listAttendances"
)]
#[get("/attendances")]
pub async fn list_attendances(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<PagedResult<AttendanceRepresentation>>> {
    let params = query.into_inner().into_params(AttendanceSortKey::parse);
    let page = state.attendances.list(&actor.0, params).await?;
    let base = base_url(&req);
    Ok(web::Json(page.map(|row| {
        AttendanceRepresentation::new(row, **version, &base)
    })))
}

/// Fetch one attendance row.
#[utoipa::path(
    get,
    path = "/api/v2/attendances/{id}",
    params(("id" = i32, Path, description = "Attendance identifier")),
    responses(
        (status = 200, description = "The attendance", body = AttendanceRepresentation),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such attendance", body = Error)
    ),
    tags = ["attendances"],
    operation_id = "getAttendance"
)]
#[get("/attendances/{id}")]
pub async fn get_attendance(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    id: web::Path<i32>,
) -> ApiResult<web::Json<AttendanceRepresentation>> {
    let row = state
        .attendances
        .get(&actor.0, AttendanceId::new(*id))
        .await?;
    Ok(web::Json(AttendanceRepresentation::new(
        row,
        **version,
        &base_url(&req),
    )))
}

/// Record a user's attendance for an event.
#[utoipa::path(
    post,
    path = "/api/v2/attendances",
    request_body = AttendancePayload,
    responses(
        (status = 201, description = "Created attendance", body = AttendanceRepresentation),
        (status = 400, description = "Invalid payload or dangling reference", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["attendances"],
    operation_id = "createAttendance"
)]
#[post("/attendances")]
pub async fn create_attendance(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    payload: web::Json<AttendancePayload>,
) -> ApiResult<HttpResponse> {
    let row = state
        .attendances
        .create(&actor.0, payload.into_inner().into())
        .await?;
    let rep = AttendanceRepresentation::new(row, **version, &base_url(&req));
    Ok(HttpResponse::Created().json(rep))
}

/// Replace an existing attendance row.
#[utoipa::path(
    put,
    path = "/api/v2/attendances/{id}",
    params(("id" = i32, Path, description = "Attendance identifier")),
    request_body = AttendancePayload,
    responses(
        (status = 200, description = "Updated attendance", body = AttendanceRepresentation),
        (status = 400, description = "Invalid payload or dangling reference", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such attendance", body = Error)
    ),
    tags = ["attendances"],
    operation_id = "updateAttendance"
)]
#[put("/attendances/{id}")]
pub async fn update_attendance(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    id: web::Path<i32>,
    payload: web::Json<AttendancePayload>,
) -> ApiResult<web::Json<AttendanceRepresentation>> {
    let row = state
        .attendances
        .update(&actor.0, AttendanceId::new(*id), payload.into_inner().into())
        .await?;
    Ok(web::Json(AttendanceRepresentation::new(
        row,
        **version,
        &base_url(&req),
    )))
}

/// Delete one attendance row.
#[utoipa::path(
    delete,
    path = "/api/v2/attendances/{id}",
    params(("id" = i32, Path, description = "Attendance identifier")),
    responses(
        (status = 204, description = "Attendance deleted"),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such attendance", body = Error)
    ),
    tags = ["attendances"],
    operation_id = "deleteAttendance"
)]
#[delete("/attendances/{id}")]
pub async fn delete_attendance(
    state: web::Data<HttpState>,
    actor: Actor,
    id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .attendances
        .delete(&actor.0, AttendanceId::new(*id))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
