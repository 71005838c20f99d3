mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::test_app;

#[tokio::test]
async fn portfolio_requires_a_session() {
    let app = test_app(|_| {}).await;

    let response = app.get("/api/portfolio", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["code"], 401);
}

#[tokio::test]
async fn holdings_crud() {
    let app = test_app(|_| {}).await;
    let cookie = app.sign_up("alice").await;

    let first = app
        .send(
            Method::POST,
            "/api/portfolio",
            Some(json!({ "symbol": "nvda", "shares": 10, "avgCost": 120 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.body["id"].is_i64());
    assert!(first.body["addedAt"].is_string());
    assert_eq!(first.body["symbol"], "NVDA");

    let second = app
        .send(
            Method::POST,
            "/api/portfolio",
            Some(json!({ "symbol": "MSFT", "shares": 2.5, "avgCost": 300 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);

    let listed = app.get("/api/portfolio", Some(&cookie)).await;
    let rows = listed.body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], second.body["id"]);
    assert_eq!(rows[1]["id"], first.body["id"]);

    let id = first.body["id"].as_i64().unwrap();
    let updated = app
        .send(
            Method::PATCH,
            &format!("/api/portfolio/{id}"),
            Some(json!({ "shares": 12 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["shares"], 12.0);
    assert_eq!(updated.body["avgCost"], 120.0);

    let missing = app
        .send(
            Method::PATCH,
            "/api/portfolio/9999",
            Some(json!({ "shares": 1 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let removed = app
        .send(Method::DELETE, &format!("/api/portfolio/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.body["success"], true);

    let gone = app
        .send(Method::DELETE, "/api/portfolio/9999", None, Some(&cookie))
        .await;
    assert_eq!(gone.status, StatusCode::OK);
    assert_eq!(gone.body["success"], true);

    let listed = app.get("/api/portfolio", Some(&cookie)).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_holding_reports_fields() {
    let app = test_app(|_| {}).await;
    let cookie = app.sign_up("alice").await;

    let response = app
        .send(
            Method::POST,
            "/api/portfolio",
            Some(json!({ "symbol": "NVDA", "shares": 0, "avgCost": -1 })),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["shares", "avgCost"]);
}

#[tokio::test]
async fn rows_of_other_users_are_invisible() {
    let app = test_app(|_| {}).await;
    let alice = app.sign_up("alice").await;
    let bob = app.sign_up("bobby").await;

    let created = app
        .send(
            Method::POST,
            "/api/portfolio",
            Some(json!({ "symbol": "AMD", "shares": 1, "avgCost": 100 })),
            Some(&alice),
        )
        .await;
    let id = created.body["id"].as_i64().unwrap();

    let listed = app.get("/api/portfolio", Some(&bob)).await;
    assert!(listed.body.as_array().unwrap().is_empty());

    let patched = app
        .send(
            Method::PATCH,
            &format!("/api/portfolio/{id}"),
            Some(json!({ "shares": 5 })),
            Some(&bob),
        )
        .await;
    assert_eq!(patched.status, StatusCode::NOT_FOUND);

    app.send(Method::DELETE, &format!("/api/portfolio/{id}"), None, Some(&bob))
        .await;
    let still_there = app.get("/api/portfolio", Some(&alice)).await;
    assert_eq!(still_there.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn watchlist_add_list_remove() {
    let app = test_app(|_| {}).await;
    let cookie = app.sign_up("alice").await;

    for symbol in ["tsla", "JPM", "TSLA"] {
        let added = app
            .send(
                Method::POST,
                "/api/watchlist",
                Some(json!({ "symbol": symbol })),
                Some(&cookie),
            )
            .await;
        assert_eq!(added.status, StatusCode::OK);
    }

    let listed = app.get("/api/watchlist", Some(&cookie)).await;
    let symbols: Vec<_> = listed
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["symbol"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(symbols, vec!["JPM", "TSLA"]);

    let removed = app
        .send(Method::DELETE, "/api/watchlist/tsla", None, Some(&cookie))
        .await;
    assert_eq!(removed.body["success"], true);

    let listed = app.get("/api/watchlist", Some(&cookie)).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_holding_id_is_a_json_bad_request() {
    let app = test_app(|_| {}).await;
    let cookie = app.sign_up("dana").await;

    let patched = app
        .send(
            Method::PATCH,
            "/api/portfolio/abc",
            Some(json!({ "shares": 1 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(patched.status, StatusCode::BAD_REQUEST);
    assert_eq!(patched.body["code"], 400);
    assert!(patched.body["message"].is_string());

    let removed = app
        .send(Method::DELETE, "/api/portfolio/1.5", None, Some(&cookie))
        .await;
    assert_eq!(removed.status, StatusCode::BAD_REQUEST);
    assert_eq!(removed.body["code"], 400);
}
