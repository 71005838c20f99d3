#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

use investai_server::{api::app_router, build_state, config::Config};

const DEFAULT_CLIENT_IP: &str = "198.51.100.10";

/// Router over a throwaway database. The directory lives as long as this.
pub struct TestApp {
    pub router: Router,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` part of the session cookie, ready for a `Cookie` header.
    pub fn session_cookie(&self) -> String {
        let raw = self
            .headers
            .get(header::SET_COOKIE)
            .expect("set-cookie header")
            .to_str()
            .unwrap();
        raw.split(';').next().unwrap().to_string()
    }
}

pub async fn test_app(configure: impl FnOnce(&mut Config)) -> TestApp {
    let dir = tempdir().unwrap();
    let mut config = Config {
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        ..Config::default()
    };
    configure(&mut config);

    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        self.send_as(DEFAULT_CLIENT_IP, method, uri, body, cookie)
            .await
    }

    /// Bodyless request from another client address.
    pub async fn send_from(&self, client_ip: &str, method: Method, uri: &str) -> TestResponse {
        self.send_as(client_ip, method, uri, None, None).await
    }

    async fn send_as(
        &self,
        client_ip: &str,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", client_ip);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, None, cookie).await
    }

    /// Register `username` and return its session cookie.
    pub async fn sign_up(&self, username: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/api/auth/register",
                Some(serde_json::json!({ "username": username, "password": "secret1" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.session_cookie()
    }
}
