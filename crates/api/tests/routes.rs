//! Router-level integration tests: the real middleware stack and handlers
//! against a real database, driven with `tower::ServiceExt::oneshot`.

use assert_matches::assert_matches;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

use herbanet_api::auth::jwt::JwtConfig;
use herbanet_api::config::ServerConfig;
use herbanet_api::router::build_app_router;
use herbanet_api::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        seed_demo_users: false,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

fn app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Sign up a fresh CUSTOMER and return their access token.
async fn signup(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(post(
            "/api/v1/auth/signup",
            None,
            &json!({
                "username": username,
                "password": "sesame-street",
                "email": format!("{username}@example.com"),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_reports_db(pool: PgPool) {
    let app = app(pool);

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_login_me(pool: PgPool) {
    let app = app(pool);
    let token = signup(&app, "carol").await;

    // The profile endpoint resolves the CUSTOMER role and its grants.
    let response = app
        .clone()
        .oneshot(get("/api/v1/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], "carol");
    assert_eq!(body["role"], "CUSTOMER");
    let privileges = body["privileges"].as_array().unwrap();
    assert!(privileges.contains(&json!("BOOK_ROOM")));
    assert!(!privileges.contains(&json!("MANAGE_USERS")));

    // Logging in again with the same credentials works.
    let response = app
        .oneshot(post(
            "/api/v1/auth/login",
            None,
            &json!({ "username": "carol", "password": "sesame-street" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_rejects_unknown_user(pool: PgPool) {
    let app = app(pool);

    let response = app
        .oneshot(post(
            "/api/v1/auth/login",
            None,
            &json!({ "username": "nobody", "password": "whatever" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_username_maps_to_conflict(pool: PgPool) {
    let app = app(pool);
    signup(&app, "carol").await;

    let response = app
        .oneshot(post(
            "/api/v1/auth/signup",
            None,
            &json!({
                "username": "carol",
                "password": "sesame-street",
                "email": "carol2@example.com",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "DUPLICATE_KEY");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reservations_require_auth(pool: PgPool) {
    let app = app(pool);

    let response = app
        .oneshot(get("/api/v1/reservations/mine", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_customer_cannot_manage_rooms(pool: PgPool) {
    let app = app(pool);
    let token = signup(&app, "carol").await;

    let response = app
        .oneshot(post(
            "/api/v1/rooms",
            Some(&token),
            &json!({ "room_number": "401", "category_id": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_booking_flow_over_http(pool: PgPool) {
    let app = app(pool);
    let token = signup(&app, "carol").await;

    // The seeded catalog is public.
    let response = app.clone().oneshot(get("/api/v1/rooms", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rooms = body_json(response).await;
    assert_matches!(rooms.as_array(), Some(list) if list.len() == 5);

    let room = rooms
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["room_number"] == "101")
        .unwrap();
    let room_id = room["id"].as_i64().unwrap();
    assert_eq!(room["nightly_rate"], 120.0);

    // Quote before booking: 2 nights at 120.
    let response = app
        .clone()
        .oneshot(get(
            &format!("/api/v1/rooms/{room_id}/quote?check_in=2024-06-01&check_out=2024-06-03"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let quote = body_json(response).await;
    assert_eq!(quote["nights"], 2);
    assert_eq!(quote["total_cost"], 240.0);

    // Book it.
    let response = app
        .clone()
        .oneshot(post(
            "/api/v1/reservations",
            Some(&token),
            &json!({
                "room_id": room_id,
                "check_in": "2024-06-01",
                "check_out": "2024-06-03",
                "guest_count": 2,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let reservation = body_json(response).await;
    assert_eq!(reservation["status"], "CONFIRMED");
    assert_eq!(reservation["total_cost"], 240.0);
    let reservation_id = reservation["id"].as_i64().unwrap();

    // A second overlapping booking is refused with a conflict.
    let response = app
        .clone()
        .oneshot(post(
            "/api/v1/reservations",
            Some(&token),
            &json!({
                "room_id": room_id,
                "check_in": "2024-06-02",
                "check_out": "2024-06-04",
                "guest_count": 1,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // An inverted date range never reaches the booking transaction.
    let response = app
        .clone()
        .oneshot(post(
            "/api/v1/reservations",
            Some(&token),
            &json!({
                "room_id": room_id,
                "check_in": "2024-06-10",
                "check_out": "2024-06-09",
                "guest_count": 1,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Paying the wrong amount is refused; the server recomputes the cost.
    let response = app
        .clone()
        .oneshot(post(
            &format!("/api/v1/reservations/{reservation_id}/payments"),
            Some(&token),
            &json!({ "amount": 200.0, "method": "CARD" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The exact stay cost captures.
    let response = app
        .clone()
        .oneshot(post(
            &format!("/api/v1/reservations/{reservation_id}/payments"),
            Some(&token),
            &json!({ "amount": 240.0, "method": "CARD" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let payment = body_json(response).await;
    assert_eq!(payment["status"], "CAPTURED");
    let txn_ref = payment["transaction_ref"].as_str().unwrap();
    assert!(txn_ref.starts_with("HRB-"));

    // The reservation now shows up in the caller's list.
    let response = app
        .oneshot(get("/api/v1/reservations/mine", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mine = body_json(response).await;
    assert_matches!(mine.as_array(), Some(list) if list.len() == 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_customer_cannot_cancel_for_others(pool: PgPool) {
    let app = app(pool);
    let carol = signup(&app, "carol").await;
    let dave = signup(&app, "dave").await;

    // Carol books room 102.
    let response = app.clone().oneshot(get("/api/v1/rooms", None)).await.unwrap();
    let rooms = body_json(response).await;
    let room_id = rooms
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["room_number"] == "102")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let response = app
        .clone()
        .oneshot(post(
            "/api/v1/reservations",
            Some(&carol),
            &json!({
                "room_id": room_id,
                "check_in": "2024-06-01",
                "check_out": "2024-06-03",
                "guest_count": 1,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let reservation_id = body_json(response).await["id"].as_i64().unwrap();

    // Dave holds CANCEL_RESERVATION through the CUSTOMER role, but the
    // reservation is not his and he is not front-desk staff.
    let response = app
        .clone()
        .oneshot(post(
            &format!("/api/v1/reservations/{reservation_id}/cancel"),
            Some(&dave),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Carol cancels her own stay; a second cancel hits the terminal guard.
    let response = app
        .clone()
        .oneshot(post(
            &format!("/api/v1/reservations/{reservation_id}/cancel"),
            Some(&carol),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "CANCELLED");

    let response = app
        .oneshot(post(
            &format!("/api/v1/reservations/{reservation_id}/cancel"),
            Some(&carol),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
