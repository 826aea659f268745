//! HTTP Transport Tests
//!
//! `HttpTransport` against a real axum server on an ephemeral port.
//!
//! ## Scenarios Covered
//!
//! 1. GET bodies travel as query parameters
//! 2. POST bodies travel as JSON with JSON content negotiation headers
//! 3. Non-2xx, non-JSON and slow answers take the error path
//! 4. A connection refusal is a transport error

mod common;

use std::time::Duration;

use common::FakeBackend;
use rulescope_client::{ClientConfig, ExplorerSession, HttpTransport, Transport};
use rulescope_core::query;
use rulescope_core::render::render_outline_text;
use rulescope_core::{ArtifactRef, ExErrorKind};
use serde_json::json;

fn transport_for(base_url: &str) -> HttpTransport {
    HttpTransport::new(&ClientConfig::default().with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn test_catalog_round_trip() {
    let backend = FakeBackend::start().await;
    let transport = transport_for(&backend.base_url);

    let value = transport.call(&query::catalog_info()).await.unwrap();
    assert_eq!(value["E1"]["groups"], json!(["G1", "G2"]));
}

#[tokio::test]
async fn test_group_query_sent_as_parameters() {
    let backend = FakeBackend::start().await;
    let mut session = ExplorerSession::new(transport_for(&backend.base_url));
    session.start().await.unwrap();
    session.select_group("G1").await.unwrap();

    assert_eq!(
        render_outline_text(session.controller().outline()),
        "- Validation (Validator)\n  - Obj1\n    - checkX [N1]\n"
    );
    let queries = backend.recorded.queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("engine").map(String::as_str), Some("E1"));
    assert_eq!(queries[0].get("group").map(String::as_str), Some("G1"));
}

#[tokio::test]
async fn test_category_query_posted_as_json() {
    let backend = FakeBackend::start().await;
    let mut session = ExplorerSession::new(transport_for(&backend.base_url));
    session.start().await.unwrap();
    session
        .select_category_values("Status", vec!["Active".to_string()])
        .unwrap();
    session.apply_categories().await.unwrap();

    let posts = backend.recorded.posts.lock().unwrap().clone();
    assert_eq!(posts.len(), 1);
    let (headers, body) = &posts[0];
    assert_eq!(body, &json!({"_engine": "E1", "Status": ["Active"]}));
    assert_eq!(
        headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    assert_eq!(
        headers.get("accept").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_detail_view_fetched_by_name_and_app() {
    let backend = FakeBackend::start().await;
    let mut session = ExplorerSession::new(transport_for(&backend.base_url));
    session.start().await.unwrap();

    let view = session
        .open_artifact(&ArtifactRef::new("N1", "app1"))
        .await
        .unwrap();
    assert_eq!(view.html, "<h1>N1 / app1</h1>");
}

#[tokio::test]
async fn test_server_error_status_reported() {
    let backend = FakeBackend::failing_rules().await;
    let mut session = ExplorerSession::new(transport_for(&backend.base_url));
    session.start().await.unwrap();

    let err = session.select_group("G1").await.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ExternalService);
    assert_eq!(err.status(), Some(500));
    assert!(err.message().contains("engine exploded"));
    assert!(session.controller().outline().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let backend = FakeBackend::garbled_rules().await;
    let mut session = ExplorerSession::new(transport_for(&backend.base_url));
    session.start().await.unwrap();

    let err = session.select_group("G1").await.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Serialization);
}

#[tokio::test]
async fn test_slow_answer_times_out() {
    let backend = FakeBackend::slow_rules(Duration::from_secs(5)).await;
    let config = ClientConfig::default()
        .with_base_url(backend.base_url.as_str())
        .with_timeout_ms(200);
    let mut session = ExplorerSession::new(HttpTransport::new(&config).unwrap());
    session.start().await.unwrap();

    let err = session.select_group("G1").await.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Timeout);
    assert!(session.controller().outline().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = transport_for(&format!("http://{}", addr));
    let err = transport.call(&query::catalog_info()).await.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Transport);
    assert_eq!(err.endpoint(), Some("ui/info"));
}
