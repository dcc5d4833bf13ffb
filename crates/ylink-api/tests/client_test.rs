#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ylink_api::{ApiClient, Error, Method, OauthUrlResponse, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(Some(server.uri()), &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_decodes_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/google/url"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": "https://accounts.google.com/o/oauth2/auth" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = client.build_url("/auth/google/url", &[]);
    let value = client.get(&url).await.unwrap();
    let resp: OauthUrlResponse = serde_json::from_value(value).unwrap();
    assert_eq!(resp.url, "https://accounts.google.com/o/oauth2/auth");
}

#[tokio::test]
async fn test_get_sends_query_pairs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/google/callback"))
        .and(query_param("code", "abc"))
        .and(query_param("state", "xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let query = vec![
        ("code".to_owned(), "abc".to_owned()),
        ("state".to_owned(), "xyz".to_owned()),
    ];
    let url = client.build_url("/auth/google/callback", &query);
    client.get(&url).await.unwrap();
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/google/url"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = client.build_url("/auth/google/url", &[]);
    let err = client.get(&url).await.unwrap_err();

    assert!(matches!(err, Error::Status { status: 500, .. }), "got {err:?}");
    assert_eq!(err.to_string(), format!("GET {url} failed: 500"));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/google/url"))
        .respond_with(ResponseTemplate::new(200).set_body_string("WELCOME TO Y!"))
        .mount(&server)
        .await;

    let url = client.build_url("/auth/google/url", &[]);
    let err = client.get(&url).await.unwrap_err();
    match err {
        Error::Decode { method, body, .. } => {
            assert_eq!(method, Method::Get);
            assert_eq!(body, "WELCOME TO Y!");
        }
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = ApiClient::new(
        Some("http://127.0.0.1:1".into()),
        &TransportConfig::default(),
    )
    .unwrap();
    let url = client.build_url("/auth/google/url", &[]);
    let err = client.get(&url).await.unwrap_err();
    assert!(err.is_transport(), "got {err:?}");
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_send_without_body_has_empty_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let url = client.build_url("/auth/logout", &[]);
    client.send(Method::Post, &url, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_send_with_body_serializes_json() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/profile"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let url = client.build_url("/profile", &[]);
    client
        .send(Method::Put, &url, Some(&json!({ "a": 1 })))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "a": 1 }));
}

// ── Session cookies ─────────────────────────────────────────────────

#[tokio::test]
async fn test_session_cookie_is_replayed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/google/callback"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=s3cr3t; Path=/; HttpOnly")
                .set_body_json(json!({ "ok": true })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("cookie", "session=s3cr3t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Maya" })))
        .expect(1)
        .mount(&server)
        .await;

    let callback = client.build_url("/auth/google/callback", &[]);
    client.get(&callback).await.unwrap();
    assert_eq!(client.cookie_header().as_deref(), Some("session=s3cr3t"));

    let me = client.build_url("/me", &[]);
    client.get(&me).await.unwrap();
}
