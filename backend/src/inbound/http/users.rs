//! Users API handlers.
//!
//! ```text
//! GET    /api/{v1,v2}/users?page=&pageSize=&sortBy=&descending=
//! GET    /api/{v1,v2}/users/{id}
//! POST   /api/{v1,v2}/users
//! PUT    /api/{v1,v2}/users/{id}
//! DELETE /api/{v1,v2}/users/{id}
//! ```
//!
//! The same handlers serve both version scopes; the scope's
//! [`ApiVersion`] decides whether hypermedia links are emitted.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::PagedResult;
use serde::{Deserialize, Serialize};

use crate::domain::query::UserSortKey;
use crate::domain::{Error, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Actor;
use crate::inbound::http::query::ListQuery;
use crate::inbound::http::representations::{ApiVersion, UserRepresentation, base_url};
use crate::inbound::http::state::HttpState;

/// Create/replace request body for users.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Role name, `Admin` or `User` (case-insensitive).
    pub role: String,
}

impl UserPayload {
    fn into_draft(self) -> Result<UserDraft, Error> {
        UserDraft::try_new(&self.username, &self.email, &self.password, &self.role)
    }
}

/// Paged user listing.
#[utoipa::path(
    get,
    path = "/api/v2/users",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of users", body = PagedResult<UserRepresentation>),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<PagedResult<UserRepresentation>>> {
    let params = query.into_inner().into_params(UserSortKey::parse);
    let page = state.users.list(&actor.0, params).await?;
    let base = base_url(&req);
    Ok(web::Json(page.map(|user| {
        UserRepresentation::new(user, **version, &base)
    })))
}

/// Fetch one user by id.
#[utoipa::path(
    get,
    path = "/api/v2/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserRepresentation),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    id: web::Path<i32>,
) -> ApiResult<web::Json<UserRepresentation>> {
    let user = state.users.get(&actor.0, UserId::new(*id)).await?;
    Ok(web::Json(UserRepresentation::new(
        user,
        **version,
        &base_url(&req),
    )))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v2/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Created user", body = UserRepresentation),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let user = state.users.create(&actor.0, draft).await?;
    let rep = UserRepresentation::new(user, **version, &base_url(&req));
    Ok(HttpResponse::Created().json(rep))
}

/// Replace an existing user.
#[utoipa::path(
    put,
    path = "/api/v2/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = UserRepresentation),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    id: web::Path<i32>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<UserRepresentation>> {
    let draft = payload.into_inner().into_draft()?;
    let user = state.users.update(&actor.0, UserId::new(*id), draft).await?;
    Ok(web::Json(UserRepresentation::new(
        user,
        **version,
        &base_url(&req),
    )))
}

/// Delete a user together with their attendance rows.
#[utoipa::path(
    delete,
    path = "/api/v2/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User and their attendances deleted"),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    actor: Actor,
    id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.users.delete(&actor.0, UserId::new(*id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
