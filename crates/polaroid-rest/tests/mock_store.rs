//! Mock store tests for the PostgREST backend.
//!
//! These tests use wiremock to simulate a hosted store and test the crate's
//! behavior without requiring network access or real credentials.

use std::time::Duration;

use polaroid_core::error::{Error, ProtocolError, TransportError};
use polaroid_core::{ApiKey, Collection, RecordId, RecordStore, StoreUrl};
use polaroid_rest::RestStore;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a store URL from a mock server.
fn mock_store_url(server: &MockServer) -> StoreUrl {
    StoreUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn mock_store(server: &MockServer) -> RestStore {
    RestStore::new(mock_store_url(server), ApiKey::new("anon-key")).unwrap()
}

fn links() -> Collection {
    Collection::new("links").unwrap()
}

#[tokio::test]
async fn test_list_records_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/links"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "links": "/a.png",
                "arweave_link": null,
                "created_at": "2024-05-02T10:00:00+00:00"
            },
            {
                "id": 2,
                "links": "/b.png",
                "arweave_link": "https://x",
                "created_at": "2024-05-01T10:00:00+00:00"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let records = store.list_records(&links(), None).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, RecordId::Int(1));
    assert_eq!(records[0].link_target(), "/a.png");
    assert_eq!(records[1].link_target(), "https://x");
}

#[tokio::test]
async fn test_list_records_with_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/links"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let records = store.list_records(&links(), Some(5)).await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_list_records_empty_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let records = store.list_records(&links(), None).await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_list_records_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/links"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "PGRST301",
            "message": "JWT expired",
            "details": null,
            "hint": null
        })))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let err = store.list_records(&links(), None).await.unwrap_err();

    match &err {
        Error::Protocol(ProtocolError { status, code, .. }) => {
            assert_eq!(*status, 401);
            assert_eq!(code.as_deref(), Some("PGRST301"));
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
    assert!(err.to_string().contains("JWT expired"));
}

#[tokio::test]
async fn test_list_records_missing_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/photos"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let err = store
        .list_records(&Collection::new("photos").unwrap(), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Protocol(ProtocolError {
            status: 404,
            code: None,
            message: None
        })
    ));
}

#[tokio::test]
async fn test_list_records_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [] })))
        .mount(&server)
        .await;

    let store = mock_store(&server);
    let err = store.list_records(&links(), None).await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_list_records_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/links"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let store = RestStore::with_timeout(
        mock_store_url(&server),
        ApiKey::new("anon-key"),
        Duration::from_millis(100),
    )
    .unwrap();
    let err = store.list_records(&links(), None).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Transport(TransportError::Timeout { duration_ms: 100 })
    ));
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop a listener so the port is closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = StoreUrl::new(format!("http://127.0.0.1:{}", port)).unwrap();

    let store = RestStore::new(url, ApiKey::new("anon-key")).unwrap();
    let err = store.list_records(&links(), None).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}
