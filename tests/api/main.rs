use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use api::setup_router;
use app::cache::CacheClient;
use app::config::{AdminSeed, Config, ConfigInner};
use app::persistence::admins::ensure_admin;
use app::state::AppState;
use utils::testing::setup_test_db;

async fn test_state() -> AppState {
    let conn = setup_test_db("sqlite::memory:")
        .await
        .expect("Set up db failed!");
    let mut config = ConfigInner::new("sqlite::memory:", "api-test-secret");
    config.bcrypt_cost = 4;
    AppState::new(
        conn,
        Config::new(config),
        CacheClient::in_memory(Duration::from_secs(60)),
    )
}

async fn test_app() -> Router {
    setup_router(test_state().await)
}

fn send_json(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(body.to_string())).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    send_json("POST", uri, body, None)
}

fn session_cookie(res: &axum::response::Response) -> String {
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("login sets a cookie")
        .to_string();
    assert!(cookie.contains("HttpOnly"));
    cookie.split(';').next().unwrap().to_string()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::empty()).unwrap()
}

async fn read_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers and logs in an account, returning the `token=...` cookie pair.
async fn sign_up(app: &Router, role: &str, username: &str) -> String {
    let res = app
        .clone()
        .oneshot(post_json(
            &format!("/auth/{role}/register"),
            json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "password123",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .clone()
        .oneshot(post_json(
            &format!("/auth/{role}/login"),
            json!({ "identifier": username, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;
    let res = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res.into_body()).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn login_cookie_authenticates_by_role() {
    let app = test_app().await;
    let player = sign_up(&app, "player", "gamer").await;
    let organiser = sign_up(&app, "organiser", "host").await;

    let res = app.clone().oneshot(get("/api/player/me", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .clone()
        .oneshot(get("/api/player/me", Some(&organiser)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .clone()
        .oneshot(get("/api/player/me", Some(&player)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res.into_body()).await;
    assert_eq!(body["data"]["username"], "gamer");

    let res = app.oneshot(get("/auth/me", Some(&organiser))).await.unwrap();
    let body = read_json(res.into_body()).await;
    assert_eq!(body["data"]["role"], "organiser");
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = test_app().await;

    let res = app
        .clone()
        .oneshot(post_json(
            "/auth/player/register",
            json!({ "username": "ab", "email": "not-an-email", "password": "short" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res.into_body()).await;
    assert_eq!(body["success"], false);
    assert!(body["data"].get("password").is_some());

    let res = app
        .clone()
        .oneshot(post_json("/auth/player/login", json!({ "identifier": "ghost" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .oneshot(post_json(
            "/auth/player/login",
            json!({ "identifier": "ghost", "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn points_additions_are_bounded() {
    let app = test_app().await;
    let organiser = sign_up(&app, "organiser", "host").await;

    let res = app
        .oneshot(send_json(
            "PATCH",
            "/api/tournament/T1/points",
            json!({ "teamName": "Alpha", "additionalPoints": i32::MAX }),
            Some(&organiser),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res.into_body()).await;
    assert!(body["data"].get("additional_points").is_some());
}

#[tokio::test]
async fn admin_routes_act_as_the_signed_in_admin() {
    let state = test_state().await;
    let seed = AdminSeed {
        username: "root".to_string(),
        email: "root@example.com".to_string(),
        password: "password123".to_string(),
    };
    ensure_admin(&state, &seed).await.unwrap();
    let app = setup_router(state);
    let organiser = sign_up(&app, "organiser", "host").await;

    let res = app
        .clone()
        .oneshot(post_json(
            "/auth/admin/login",
            json!({ "identifier": "root", "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let admin = session_cookie(&res);

    let res = app
        .clone()
        .oneshot(send_json("POST", "/admin/tournaments/missing/approve", json!({}), Some(&organiser)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .clone()
        .oneshot(send_json("POST", "/admin/tournaments/missing/approve", json!({}), Some(&admin)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.oneshot(get("/auth/me", Some(&admin))).await.unwrap();
    let body = read_json(res.into_body()).await;
    assert_eq!(body["data"]["role"], "admin");
}

#[tokio::test]
async fn public_routes_are_rate_limited_per_client() {
    let app = test_app().await;
    let request = |ip: &str| {
        Request::builder()
            .uri("/b2c/leaderboard")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    };

    for _ in 0..25 {
        let res = app.clone().oneshot(request("10.0.0.1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
    let res = app.clone().oneshot(request("10.0.0.1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

    let res = app.clone().oneshot(request("10.0.0.2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Each public router keeps its own budget.
    let res = app
        .oneshot(
            Request::builder()
                .uri("/b2b/summary")
                .header("x-forwarded-for", "10.0.0.1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
