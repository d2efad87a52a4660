//! Versioned route registration.
//!
//! The same handler set is mounted under `/api/v1` and `/api/v2`; each
//! scope carries its own [`ApiVersion`] so the representation layer
//! knows whether to emit hypermedia links. The login endpoint exists in
//! the v2 surface only, but the tokens it issues authorise both
//! versions.

use actix_web::{Scope, web};

use crate::inbound::http::representations::ApiVersion;
use crate::inbound::http::{attendances, auth, events, users};

fn entity_routes(scope: Scope) -> Scope {
    scope
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(events::list_events)
        .service(events::get_event)
        .service(events::create_event)
        .service(events::update_event)
        .service(events::delete_event)
        .service(attendances::list_attendances)
        .service(attendances::get_attendance)
        .service(attendances::create_attendance)
        .service(attendances::update_attendance)
        .service(attendances::delete_attendance)
}

fn v1_scope() -> Scope {
    entity_routes(web::scope("/api/v1").app_data(web::Data::new(ApiVersion::V1)))
}

fn v2_scope() -> Scope {
    entity_routes(
        web::scope("/api/v2")
            .app_data(web::Data::new(ApiVersion::V2))
            .service(auth::login),
    )
}

/// Register both version scopes on an application or test service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(v1_scope()).service(v2_scope());
}
