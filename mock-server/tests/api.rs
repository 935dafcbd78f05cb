use std::collections::BTreeMap;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, QueryValues};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, content_type: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, content_type)
        .body(body.to_string())
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- query ---

#[tokio::test]
async fn get_echoes_query() {
    let resp = app()
        .oneshot(empty("GET", "/api/get?name=john&age=30"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let query: QueryValues = body_json(resp).await;
    assert_eq!(query["name"], vec!["john"]);
    assert_eq!(query["age"], vec!["30"]);
}

#[tokio::test]
async fn get_keeps_repeated_keys() {
    let resp = app()
        .oneshot(empty("GET", "/api/get?name=jane&name=john"))
        .await
        .unwrap();

    let query: QueryValues = body_json(resp).await;
    assert_eq!(query["name"], vec!["jane", "john"]);
}

#[tokio::test]
async fn get_without_query_is_empty() {
    let resp = app().oneshot(empty("GET", "/api/get")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let query: QueryValues = body_json(resp).await;
    assert!(query.is_empty());
}


// --- form ---

#[tokio::test]
async fn post_form_echoes_fields() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/api/post-form",
            "application/x-www-form-urlencoded",
            "name=john&age=30",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fields: BTreeMap<String, String> = body_json(resp).await;
    assert_eq!(fields["name"], "john");
    assert_eq!(fields["age"], "30");
}

#[tokio::test]
async fn post_form_rejects_json_bytes() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/api/post-form",
            "application/json",
            r#"{"name":"john"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- json ---

#[tokio::test]
async fn post_json_echoes_body() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/api/post-json",
            "application/json",
            r#"{"name":"john","age":30}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"name": "john", "age": 30}));
}

#[tokio::test]
async fn put_and_patch_echo_body() {
    for (method, uri) in [("PUT", "/api/put-json"), ("PATCH", "/api/patch-json")] {
        let resp = app()
            .oneshot(request(method, uri, "application/json", r#"{"ok":true}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK, "{method}");
        let body: serde_json::Value = body_json(resp).await;
        assert_eq!(body["ok"], true, "{method}");
    }
}

#[tokio::test]
async fn delete_echoes_json_body() {
    let resp = app()
        .oneshot(request(
            "DELETE",
            "/api/delete-json",
            "application/json",
            r#"{"name":"john","age":30}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"name": "john", "age": 30}));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let resp = app()
        .oneshot(request("POST", "/api/post-json", "application/json", "{"))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn wrong_method_is_405() {
    let resp = app().oneshot(empty("GET", "/api/post-json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_headers_query_and_body() {
    let mut req = request("OPTIONS", "/api/echo?a=1", "text/plain", "hello");
    req.headers_mut()
        .insert("x-trace", http::HeaderValue::from_static("abc"));
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "OPTIONS");
    assert_eq!(echo.query["a"], vec!["1"]);
    assert_eq!(echo.headers["x-trace"], "abc");
    assert_eq!(echo.headers["content-type"], "text/plain");
    assert_eq!(echo.body, "hello");
}

// --- raw ---

#[tokio::test]
async fn bytes_route_returns_non_utf8_body() {
    let resp = app().oneshot(empty("GET", "/api/bytes")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert_eq!(&bytes[..], b"caf\xe9");
    assert!(std::str::from_utf8(&bytes).is_err());
}

// --- status ---

#[tokio::test]
async fn status_route_returns_requested_code() {
    let resp = app().oneshot(empty("GET", "/api/status/418")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app().oneshot(empty("GET", "/api/status/abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
