//! Events API handlers.
//!
//! Same surface shape as users; event representations embed the
//! attendee list joined by the store.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use pagination::PagedResult;
use serde::{Deserialize, Serialize};

use crate::domain::query::EventSortKey;
use crate::domain::{Error, EventDraft, EventId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Actor;
use crate::inbound::http::query::ListQuery;
use crate::inbound::http::representations::{ApiVersion, EventRepresentation, base_url};
use crate::inbound::http::state::HttpState;

/// Create/replace request body for events.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub name: String,
    pub location: String,
    /// Either a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date,
    /// which is taken as midnight UTC.
    #[serde(deserialize_with = "deserialize_event_date")]
    #[schema(value_type = String, example = "2025-06-01T18:00:00Z")]
    pub date: DateTime<Utc>,
}

impl EventPayload {
    fn into_draft(self) -> Result<EventDraft, Error> {
        EventDraft::try_new(&self.name, &self.location, self.date)
    }
}

fn deserialize_event_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(instant) = raw.parse::<DateTime<Utc>>() {
        return Ok(instant);
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            serde::de::Error::custom("date must be an RFC 3339 timestamp or a YYYY-MM-DD date")
        })
}

/// Paged event listing.
#[utoipa::path(
    get,
    path = "/api/v2/events",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of events", body = PagedResult<EventRepresentation>),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<PagedResult<EventRepresentation>>> {
    let params = query.into_inner().into_params(EventSortKey::parse);
    let page = state.events.list(&actor.0, params).await?;
    let base = base_url(&req);
    Ok(web::Json(page.map(|event| {
        EventRepresentation::new(event, **version, &base)
    })))
}

/// Fetch one event with its attendees.
#[utoipa::path(
    get,
    path = "/api/v2/events/{id}",
    params(("id" = i32, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "The event", body = EventRepresentation),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such event", body = Error)
    ),
    tags = ["events"],
    operation_id = "getEvent"
)]
#[get("/events/{id}")]
pub async fn get_event(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    id: web::Path<i32>,
) -> ApiResult<web::Json<EventRepresentation>> {
    let event = state.events.get(&actor.0, EventId::new(*id)).await?;
    Ok(web::Json(EventRepresentation::new(
        event,
        **version,
        &base_url(&req),
    )))
}

/// Create a new event.
#[utoipa::path(
    post,
    path = "/api/v2/events",
    request_body = EventPayload,
    responses(
        (status = 201, description = "Created event", body = EventRepresentation),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/events")]
pub async fn create_event(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    payload: web::Json<EventPayload>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let event = state.events.create(&actor.0, draft).await?;
    let rep = EventRepresentation::new(event, **version, &base_url(&req));
    Ok(HttpResponse::Created().json(rep))
}

/// Replace an existing event.
#[utoipa::path(
    put,
    path = "/api/v2/events/{id}",
    params(("id" = i32, Path, description = "Event identifier")),
    request_body = EventPayload,
    responses(
        (status = 200, description = "Updated event", body = EventRepresentation),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such event", body = Error)
    ),
    tags = ["events"],
    operation_id = "updateEvent"
)]
#[put("/events/{id}")]
pub async fn update_event(
    req: HttpRequest,
    state: web::Data<HttpState>,
    version: web::Data<ApiVersion>,
    actor: Actor,
    id: web::Path<i32>,
    payload: web::Json<EventPayload>,
) -> ApiResult<web::Json<EventRepresentation>> {
    let draft = payload.into_inner().into_draft()?;
    let event = state
        .events
        .update(&actor.0, EventId::new(*id), draft)
        .await?;
    Ok(web::Json(EventRepresentation::new(
        event,
        **version,
        &base_url(&req),
    )))
}

/// Delete an event together with its attendance rows.
#[utoipa::path(
    delete,
    path = "/api/v2/events/{id}",
    params(("id" = i32, Path, description = "Event identifier")),
    responses(
        (status = 204, description = "Event and its attendances deleted"),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such event", body = Error)
    ),
    tags = ["events"],
    operation_id = "deleteEvent"
)]
#[delete("/events/{id}")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    actor: Actor,
    id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.events.delete(&actor.0, EventId::new(*id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("2025-06-01T18:00:00Z", "2025-06-01T18:00:00Z")]
    #[case("2025-06-01T18:00:00+03:00", "2025-06-01T15:00:00Z")]
    #[case("2025-06-01", "2025-06-01T00:00:00Z")]
    fn event_dates_accept_timestamps_and_bare_dates(#[case] raw: &str, #[case] expected: &str) {
        let payload: EventPayload = serde_json::from_value(json!({
            "name": "Launch", "location": "Main Hall", "date": raw
        }))
        .expect("payload must deserialize");
        assert_eq!(
            payload.date,
            expected.parse::<DateTime<Utc>>().expect("expected instant")
        );
    }

    #[rstest]
    #[case("June 1st")]
    #[case("2025-13-40")]
    #[case("")]
    fn unparseable_event_dates_are_rejected(#[case] raw: &str) {
        let result = serde_json::from_value::<EventPayload>(json!({
            "name": "Launch", "location": "Main Hall", "date": raw
        }));
        assert!(result.is_err());
    }
}
