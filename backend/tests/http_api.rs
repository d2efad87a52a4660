//! End-to-end tests over the full HTTP surface: login, both version
//! scopes, role gating, referential integrity, and cascade deletes.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{App, test, web};
use chrono::Duration;
use rstest::rstest;
use serde_json::{Value, json};

use eventify_backend::domain::UserDraft;
use eventify_backend::domain::ports::UserStore;
use eventify_backend::inbound::http::headers::security_headers;
use eventify_backend::inbound::http::routes;
use eventify_backend::inbound::http::state::HttpState;
use eventify_backend::outbound::persistence::MemoryStore;
use eventify_backend::outbound::token::HmacTokenSigner;

async fn seeded_app()
-> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_user(
            UserDraft::try_new("admin", "admin@eventify.local", "password", "Admin")
                .expect("admin draft"),
        )
        .await
        .expect("seed admin");
    store
        .insert_user(
            UserDraft::try_new("viewer", "viewer@eventify.local", "password", "User")
                .expect("viewer draft"),
        )
        .await
        .expect("seed viewer");

    let state = web::Data::new(HttpState::for_store(
        store,
        Arc::new(HmacTokenSigner::new(*b"integration-test-key")),
        Duration::hours(1),
    ));
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(security_headers())
            .configure(routes::configure),
    )
    .await
}

async fn login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/v2/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "login must succeed");
    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token string").to_owned()
}

fn authed(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
}

#[rstest]
#[actix_web::test]
async fn login_lives_only_in_the_v2_surface() {
    let app = seeded_app().await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "admin", "password": "password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn bad_credentials_are_rejected_with_401() {
    let app = seeded_app().await;
    let req = test::TestRequest::post()
        .uri("/api/v2/auth/login")
        .set_json(json!({ "username": "admin", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "unauthenticated");
}

#[rstest]
#[actix_web::test]
async fn error_responses_carry_the_security_headers() {
    let app = seeded_app().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v2/users").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let headers = resp.headers();
    assert_eq!(
        headers
            .get("X-Content-Type-Options")
            .expect("header")
            .to_str()
            .expect("ascii header value"),
        "nosniff"
    );
    assert_eq!(
        headers
            .get("X-Frame-Options")
            .expect("header")
            .to_str()
            .expect("ascii header value"),
        "SAMEORIGIN"
    );
    assert!(headers.contains_key("Content-Security-Policy"));
    assert!(headers.contains_key("Referrer-Policy"));
    assert!(headers.contains_key("Permissions-Policy"));
}

#[rstest]
#[actix_web::test]
async fn requests_without_a_token_get_401() {
    let app = seeded_app().await;
    for uri in ["/api/v1/users", "/api/v2/events", "/api/v2/attendances/1"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[rstest]
#[actix_web::test]
async fn a_v2_token_authorises_v1_requests() {
    let app = seeded_app().await;
    let token = login(&app, "admin", "password").await;
    let req = authed(test::TestRequest::get().uri("/api/v1/users"), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn reader_role_gets_403_on_every_mutation() {
    let app = seeded_app().await;
    let token = login(&app, "viewer", "password").await;

    let attempts = [
        test::TestRequest::post().uri("/api/v2/events").set_json(json!({
            "name": "Rogue", "location": "Nowhere", "date": "2025-06-01T18:00:00Z"
        })),
        test::TestRequest::put().uri("/api/v2/users/1").set_json(json!({
            "username": "x", "email": "x@example.org", "password": "x", "role": "User"
        })),
        test::TestRequest::delete().uri("/api/v2/users/1"),
    ];
    for attempt in attempts {
        let resp = test::call_service(&app, authed(attempt, &token).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "forbidden");
    }

    // Nothing changed: still exactly the two seeded users.
    let req = authed(test::TestRequest::get().uri("/api/v2/users"), &token).to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["totalCount"], 2);
}

#[rstest]
#[actix_web::test]
async fn users_are_paged_and_sorted_by_username() {
    let app = seeded_app().await;
    let token = login(&app, "admin", "password").await;

    // Ten more users on top of admin and viewer makes twelve total.
    for n in 1..=10 {
        let req = authed(
            test::TestRequest::post().uri("/api/v2/users").set_json(json!({
                "username": format!("user{n:02}"),
                "email": format!("user{n:02}@example.org"),
                "password": "pw",
                "role": "User"
            })),
            &token,
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = authed(
        test::TestRequest::get().uri("/api/v1/users?page=2&pageSize=5&sortBy=username"),
        &token,
    )
    .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    let usernames: Vec<&str> = body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|u| u["username"].as_str().expect("username"))
        .collect();
    // Ascending order over the twelve usernames: admin, user01..user10,
    // viewer. Page two of five starts at user05.
    assert_eq!(usernames, ["user05", "user06", "user07", "user08", "user09"]);
    assert_eq!(body["totalCount"], 12);
    assert_eq!(body["hasMore"], true);
}

#[rstest]
#[actix_web::test]
async fn v1_is_plain_and_v2_carries_links() {
    let app = seeded_app().await;
    let token = login(&app, "admin", "password").await;

    let req = authed(test::TestRequest::get().uri("/api/v1/users/1"), &token).to_request();
    let v1: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(v1.get("links").is_none());
    assert!(v1.get("password").is_none());

    let req = authed(test::TestRequest::get().uri("/api/v2/users/1"), &token).to_request();
    let v2: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let links = v2["links"].as_array().expect("links array");
    assert_eq!(links.len(), 3);
    assert_eq!(links[0]["rel"], "self");
    assert_eq!(links[1]["rel"], "update_user");
    assert_eq!(links[2]["rel"], "delete_user");
    assert!(
        links[0]["href"]
            .as_str()
            .expect("href")
            .ends_with("/api/v2/users/1")
    );
}

#[rstest]
#[actix_web::test]
async fn attendance_with_dangling_event_is_a_400_and_creates_nothing() {
    let app = seeded_app().await;
    let token = login(&app, "admin", "password").await;

    let req = authed(
        test::TestRequest::post().uri("/api/v2/attendances").set_json(json!({
            "eventId": 99, "userId": 2, "isAttending": true
        })),
        &token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "reference_not_found");

    let req = authed(test::TestRequest::get().uri("/api/v2/attendances"), &token).to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["totalCount"], 0);
}

#[rstest]
#[actix_web::test]
async fn deleting_an_event_cascades_to_its_attendances() {
    let app = seeded_app().await;
    let token = login(&app, "admin", "password").await;

    let req = authed(
        test::TestRequest::post().uri("/api/v2/events").set_json(json!({
            "name": "Launch", "location": "Main Hall", "date": "2025-06-01T18:00:00Z"
        })),
        &token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let event: Value = test::read_body_json(resp).await;
    let event_id = event["id"].as_i64().expect("event id");

    let req = authed(
        test::TestRequest::post().uri("/api/v2/attendances").set_json(json!({
            "eventId": event_id, "userId": 2, "isAttending": true
        })),
        &token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let attendance: Value = test::read_body_json(resp).await;
    let attendance_id = attendance["id"].as_i64().expect("attendance id");
    assert_eq!(attendance["event"]["name"], "Launch");
    assert_eq!(attendance["user"]["username"], "viewer");

    let req = authed(
        test::TestRequest::delete().uri(&format!("/api/v2/events/{event_id}")),
        &token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = authed(
        test::TestRequest::get().uri(&format!("/api/v2/attendances/{attendance_id}")),
        &token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Deleting the same event again reports the miss.
    let req = authed(
        test::TestRequest::delete().uri(&format!("/api/v2/events/{event_id}")),
        &token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn invalid_payloads_are_rejected_with_field_details() {
    let app = seeded_app().await;
    let token = login(&app, "admin", "password").await;

    let req = authed(
        test::TestRequest::post().uri("/api/v2/users").set_json(json!({
            "username": "", "email": "a@example.org", "password": "pw", "role": "User"
        })),
        &token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "invalid_input");
    assert_eq!(body["details"]["field"], "username");
}
