//! Login endpoint and bearer-token request authentication.
//!
//! ```text
//! POST /api/v2/auth/login {"username":"admin","password":"password"}
//! ```
//!
//! Every protected handler takes an [`Actor`] parameter; extraction
//! fails with `401` before the handler body runs when the bearer token
//! is missing, malformed, expired, or signed with the wrong key.

use std::future::{Ready, ready};

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::TokenError;
use crate::domain::{Claims, Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v2/auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload: the opaque bearer token.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_input("username must not be empty")
            .with_details(json!({ "field": "username", "code": "blank_field" })),
        LoginValidationError::EmptyPassword => Error::invalid_input("password must not be empty")
            .with_details(json!({ "field": "password", "code": "blank_field" })),
    }
}

/// Authenticate credentials and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/v2/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let issued = state.login.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        token: issued.token,
    }))
}

/// Verified caller identity, extracted from the `Authorization` header.
///
/// Both API versions accept the same tokens; the login endpoint only
/// lives in the v2 surface.
#[derive(Debug, Clone)]
pub struct Actor(pub Claims);

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthenticated("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthenticated("malformed authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthenticated("authorization scheme must be Bearer"))
}

fn extract_actor(req: &HttpRequest) -> Result<Actor, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not registered"))?;
    let token = bearer_token(req)?;
    let claims = state.signer.verify(token).map_err(|err| match err {
        TokenError::Expired => Error::unauthenticated("token has expired"),
        _ => Error::unauthenticated("invalid bearer token"),
    })?;
    Ok(Actor(claims))
}

impl FromRequest for Actor {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_actor(req))
    }
}
