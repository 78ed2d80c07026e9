//! Tests for the bot-side status API client against a mock HTTP server.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use statusboard::telegram::StatusApi;

fn api_for(server: &MockServer) -> StatusApi {
    StatusApi::new(Url::parse(&server.uri()).expect("mock server uri"))
}

#[tokio::test]
async fn latest_parses_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s2", "userId": "u2", "name": "Ben", "status": "later", "createdAt": "2026-08-27T12:01:00.000000Z"},
            {"id": "s1", "userId": "u1", "name": "Ann", "status": "hi", "createdAt": "2026-08-27T12:00:00.000000Z"}
        ])))
        .mount(&server)
        .await;

    let statuses = api_for(&server).latest().await.expect("latest should parse");
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].name, "Ben");
    assert_eq!(statuses[0].status, "later");
    assert_eq!(statuses[1].user_id, "u1");
}

#[tokio::test]
async fn latest_on_empty_board_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let statuses = api_for(&server).latest().await.expect("latest should parse");
    assert!(statuses.is_empty());
}

#[tokio::test]
async fn server_errors_surface_as_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Internal server error"})))
        .mount(&server)
        .await;

    assert!(api_for(&server).latest().await.is_err());
}

#[tokio::test]
async fn my_statuses_posts_the_user_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mystatus"))
        .and(body_json(json!({"userId": "42"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s1", "userId": "42", "name": "Ann", "status": "mine", "createdAt": "2026-08-27T12:00:00.000000Z"}
        ])))
        .mount(&server)
        .await;

    let statuses = api_for(&server).my_statuses("42").await.expect("mystatus should parse");
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].status, "mine");
}

#[tokio::test]
async fn my_statuses_rejection_surfaces_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mystatus"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "userId is required"})))
        .mount(&server)
        .await;

    assert!(api_for(&server).my_statuses("").await.is_err());
}
