mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use shortly::api::handlers::{delete_url_handler, metadata_handler};
use shortly::domain::repositories::ShortUrlRepository;

fn test_app(state: shortly::state::AppState) -> TestServer {
    let app = Router::new()
        .route(
            "/api/urls/{short_key}",
            get(metadata_handler).delete(delete_url_handler),
        )
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_metadata_success() {
    let (state, repository, mut rx) = common::create_test_state();
    let server = test_app(state);

    common::create_test_short_url(&repository, "meta001", "https://rust-lang.org").await;
    repository.increment_hits("meta001").await.unwrap();

    let response = server.get("/api/urls/meta001").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["shortKey"], "meta001");
    assert_eq!(json["originalUrl"], "https://rust-lang.org");
    assert_eq!(json["hits"], 1);
    assert!(json["createdAt"].is_string());
    assert!(json["updatedAt"].is_string());

    // Metadata reads are not hits.
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_metadata_not_found() {
    let (state, _repository, _rx) = common::create_test_state();
    let server = test_app(state);

    let response = server.get("/api/urls/missing").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_success() {
    let (state, repository, _rx) = common::create_test_state();
    let server = test_app(state);

    common::create_test_short_url(&repository, "del0001", "https://example.com").await;

    let response = server.delete("/api/urls/del0001").await;

    assert_eq!(response.status_code(), 204);
    assert!(repository.is_empty());

    server
        .get("/api/urls/del0001")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let (state, repository, _rx) = common::create_test_state();
    let server = test_app(state);

    common::create_test_short_url(&repository, "del0002", "https://example.com").await;

    assert_eq!(server.delete("/api/urls/del0002").await.status_code(), 204);

    let response = server.delete("/api/urls/del0002").await;
    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}
