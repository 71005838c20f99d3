mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::test_app;

#[tokio::test]
async fn register_login_logout_flow() {
    let app = test_app(|_| {}).await;
    let credentials = json!({ "username": "alice", "password": "secret1" });

    let registered = app
        .send(Method::POST, "/api/auth/register", Some(credentials.clone()), None)
        .await;
    assert_eq!(registered.status, StatusCode::OK);
    assert_eq!(registered.body["username"], "alice");
    assert!(registered.body.get("passwordHash").is_none());
    let set_cookie = registered.headers["set-cookie"].to_str().unwrap().to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(!set_cookie.contains("Secure"));

    let again = app
        .send(Method::POST, "/api/auth/register", Some(credentials.clone()), None)
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.body["code"], 400);
    assert_eq!(again.body["details"][0]["field"], "username");

    let wrong = app
        .send(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": "nope-nope" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let unknown = app
        .send(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": "bob", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["message"], wrong.body["message"]);

    let login = app
        .send(Method::POST, "/api/auth/login", Some(credentials), None)
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let cookie = login.session_cookie();

    let me = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "alice");

    let logout = app
        .send(Method::POST, "/api/auth/logout", None, Some(&cookie))
        .await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body["success"], true);
    assert!(logout.headers["set-cookie"]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    let after = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after.body["code"], 401);
}

#[tokio::test]
async fn register_validates_input() {
    let app = test_app(|_| {}).await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/register",
            Some(json!({ "username": "al", "password": "123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app(|_| {}).await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": "alice" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 400);
}

#[tokio::test]
async fn logout_without_session_succeeds() {
    let app = test_app(|_| {}).await;

    let response = app.send(Method::POST, "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn production_cookies_are_secure() {
    let app = test_app(|config| config.production = true).await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/register",
            Some(json!({ "username": "carol", "password": "secret1" })),
            None,
        )
        .await;

    assert!(response.headers["set-cookie"]
        .to_str()
        .unwrap()
        .contains("; Secure"));
}
