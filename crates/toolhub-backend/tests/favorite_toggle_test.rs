//! End-to-end favorite toggle against a mocked table API

use serde_json::json;
use toolhub_backend::SupabaseClient;
use toolhub_config::BackendConfig;
use toolhub_core::{AccessToken, FavoritesRepository};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(&BackendConfig {
        url: server.uri(),
        anon_key: "anon-key".to_string(),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn toggle_adds_when_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_favorites"))
        .and(query_param("tool_id", "eq.t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/user_favorites"))
        .and(body_json(json!({ "user_id": "u1", "tool_id": "t1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": "f9", "user_id": "u1", "tool_id": "t1" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let token = AccessToken::new("user-jwt");

    let existing = client.find_favorite(&token, "u1", "t1").await.unwrap();
    assert!(existing.is_none());
    let added = client.add_favorite(&token, "u1", "t1").await.unwrap();
    assert_eq!(added.id, "f9");
}

#[tokio::test]
async fn toggle_removes_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_favorites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "f1", "user_id": "u1", "tool_id": "t1" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/user_favorites"))
        .and(query_param("user_id", "eq.u1"))
        .and(query_param("tool_id", "eq.t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let token = AccessToken::new("user-jwt");

    assert!(client.find_favorite(&token, "u1", "t1").await.unwrap().is_some());
    client
        .remove_favorite_for_tool(&token, "u1", "t1")
        .await
        .unwrap();
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let client = SupabaseClient::new(&BackendConfig {
        url: "http://127.0.0.1:1".to_string(),
        anon_key: "anon-key".to_string(),
        timeout_seconds: 2,
        ..Default::default()
    })
    .unwrap();

    let err = client
        .list_favorites(&AccessToken::new("jwt"), "u1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, toolhub_core::CollaboratorError::Network(_)));
}
