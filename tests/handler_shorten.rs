mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use shortly::api::handlers::shorten_handler;

fn test_server() -> (
    TestServer,
    std::sync::Arc<shortly::infrastructure::persistence::MemoryShortUrlRepository>,
) {
    let (state, repository, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/api/urls", post(shorten_handler))
        .with_state(state);

    (TestServer::new(app).unwrap(), repository)
}

#[tokio::test]
async fn test_shorten_url_success() {
    let (server, repository) = test_server();

    let response = server
        .post("/api/urls")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let short_key = json["shortKey"].as_str().unwrap();
    assert_eq!(short_key.len(), 7);
    assert!(short_key.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["shortUrl"], format!("http://short.ly/{short_key}"));
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_shorten_same_url_returns_same_key() {
    let (server, repository) = test_server();

    let first = server
        .post("/api/urls")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/api/urls")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(first["shortKey"], second["shortKey"]);
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (server, repository) = test_server();

    let response = server
        .post("/api/urls")
        .json(&json!({ "url": "htp://bad" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_non_http_schemes() {
    let (server, _repository) = test_server();

    for url in ["ftp://example.com/file", "javascript:alert(1)", "example.com"] {
        let response = server.post("/api/urls").json(&json!({ "url": url })).await;
        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let (server, _repository) = test_server();

    let response = server.post("/api/urls").json(&json!({ "url": "" })).await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let (server, _repository) = test_server();

    let response = server.post("/api/urls").json(&json!({})).await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_shorten_wrong_field_type() {
    let (server, _repository) = test_server();

    let response = server.post("/api/urls").json(&json!({ "url": 42 })).await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_shorten_rejects_whitespace_and_controls() {
    let (server, repository) = test_server();

    for url in [
        "http://exa\tmple.com",
        "http://example.com/a\nb",
        "  http://example.com",
    ] {
        let response = server.post("/api/urls").json(&json!({ "url": url })).await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["error"]["code"],
            "invalid_url"
        );
    }

    assert!(repository.is_empty());
}
