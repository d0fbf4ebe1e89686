//! Integration tests for the fetch API
//!
//! The NCBI endpoints are mocked with wiremock and requests are driven
//! through the router with `tower::ServiceExt::oneshot`. FTP is never
//! reachable from these tests; scenarios either skip the download phase
//! (details without a transfer location) or assert the transfer error path
//! against a closed port.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use geofetch_server::{api, config::Config, AppState};

/// Build a router wired to the mock NCBI server and a temp base directory.
fn test_app(mock_uri: &str, base_dir: &std::path::Path) -> Router {
    let mut config = Config::default();
    config.ncbi.esearch_url = format!("{mock_uri}/esearch");
    config.ncbi.efetch_url = format!("{mock_uri}/efetch");
    config.storage.base_dir = base_dir.to_path_buf();
    // Closed port: any FTP attempt fails immediately instead of hanging
    config.ftp.host = "127.0.0.1".to_string();
    config.ftp.port = 1;

    api::router(AppState::new(config).expect("state"))
}

async fn post_fetch(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/fetch_rnaseq_data")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn esearch_body(ids: &[&str]) -> Value {
    json!({ "esearchresult": { "idlist": ids } })
}

#[tokio::test]
async fn test_health_endpoint() {
    let tmp = TempDir::new().unwrap();
    let app = test_app("http://127.0.0.1:9", tmp.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "API is running."}));
}

#[tokio::test]
async fn test_missing_organism_returns_400_without_outbound_calls() {
    let mock = MockServer::start().await;
    // No request of any kind may reach NCBI
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let tmp = TempDir::new().unwrap();

    for body in [json!({}), json!({"organism": ""}), json!({"organism": "!!!"})] {
        let app = test_app(&mock.uri(), tmp.path());
        let (status, response) = post_fetch(app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"error": "Organism field is required."}));
    }
}

#[tokio::test]
async fn test_empty_idlist_returns_404_without_detail_fetches() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&[])))
        .expect(1)
        .mount(&mock)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let tmp = TempDir::new().unwrap();
    let app = test_app(&mock.uri(), tmp.path());

    let (status, response) = post_fetch(app, json!({"organism": "mouse"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response, json!({"message": "No data found for the specified query."}));
}

#[tokio::test]
async fn test_default_term_and_one_detail_fetch_per_identifier() {
    let mock = MockServer::start().await;

    // tissue and data_type omitted: term uses the defaults verbatim
    Mock::given(method("GET"))
        .and(path("/esearch"))
        .and(query_param("db", "gds"))
        .and(query_param("retmode", "json"))
        .and(query_param("term", "mouse hippocampus rna-seq"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["100001", "100002"])))
        .expect(1)
        .mount(&mock)
        .await;

    for id in ["100001", "100002"] {
        Mock::given(method("GET"))
            .and(path("/efetch"))
            .and(query_param("db", "gds"))
            .and(query_param("retmode", "xml"))
            .and(query_param("id", id))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<DocSum>no supplementary files</DocSum>"),
            )
            .expect(1)
            .mount(&mock)
            .await;
    }

    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("db_scRNAseq");
    let app = test_app(&mock.uri(), &base);

    let (status, response) = post_fetch(app, json!({"organism": "mouse"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({"message": "All data fetched and saved successfully."}));

    // Base directory was absent: created without any conflict handling.
    // Neither record carried a transfer location, so no study dirs exist.
    assert!(base.is_dir());
    assert_eq!(std::fs::read_dir(&base).unwrap().count(), 0);
}

#[tokio::test]
async fn test_detail_failure_aborts_remaining_batch() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["1", "2", "3"])))
        .mount(&mock)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<DocSum/>"))
        .expect(1)
        .mount(&mock)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch"))
        .and(query_param("id", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock)
        .await;

    // Fail-fast: the third identifier is never fetched
    Mock::given(method("GET"))
        .and(path("/efetch"))
        .and(query_param("id", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("db");
    let app = test_app(&mock.uri(), &base);

    let (status, response) = post_fetch(app, json!({"organism": "mouse"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response, json!({"error": "Failed to fetch data from NCBI."}));

    // No downloads for any record, and the destination was never resolved
    assert!(!base.exists());
}

#[tokio::test]
async fn test_search_failure_returns_upstream_error() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock)
        .await;

    let tmp = TempDir::new().unwrap();
    let app = test_app(&mock.uri(), tmp.path());

    let (status, response) = post_fetch(app, json!({"organism": "mouse"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response, json!({"error": "Failed to fetch data from NCBI."}));
}

#[tokio::test]
async fn test_existing_base_dir_with_cancel_policy() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["100001"])))
        .mount(&mock)
        .await;

    // Detail carries a transfer location, but cancellation happens before
    // extraction, so the (unreachable) FTP server is never contacted.
    Mock::given(method("GET"))
        .and(path("/efetch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<Item Name="FTPLink">ftp://ftp.ncbi.nlm.nih.gov/geo/series/GSE1nnn/GSE1/suppl/</Item>"#,
        ))
        .mount(&mock)
        .await;

    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("db");
    std::fs::create_dir(&base).unwrap();
    std::fs::write(base.join("existing.txt"), b"keep me").unwrap();

    let app = test_app(&mock.uri(), &base);

    // on_conflict omitted: cancel is the default
    let (status, response) = post_fetch(app, json!({"organism": "mouse"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({"message": "Operation cancelled by the user."}));

    // No directory mutation
    assert!(base.join("existing.txt").exists());
}

#[tokio::test]
async fn test_redirect_policy_requires_directory_name() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["100001"])))
        .mount(&mock)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<DocSum/>"))
        .mount(&mock)
        .await;

    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("db");
    std::fs::create_dir(&base).unwrap();

    let app = test_app(&mock.uri(), &base);

    let (status, response) =
        post_fetch(app, json!({"organism": "mouse", "on_conflict": "redirect"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("redirect_dir"));
}

#[tokio::test]
async fn test_redirect_policy_uses_alternate_directory() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["100001"])))
        .mount(&mock)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<DocSum/>"))
        .mount(&mock)
        .await;

    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("db");
    std::fs::create_dir(&base).unwrap();
    std::fs::write(base.join("existing.txt"), b"keep me").unwrap();

    let app = test_app(&mock.uri(), &base);

    let (status, response) = post_fetch(
        app,
        json!({"organism": "mouse", "on_conflict": "redirect", "redirect_dir": "alt_run"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({"message": "All data fetched and saved successfully."}));

    // Original directory untouched, alternate created beside it
    assert!(base.join("existing.txt").exists());
    assert!(tmp.path().join("alt_run").is_dir());
}

#[tokio::test]
async fn test_transfer_failure_returns_generic_ftp_error() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["100001"])))
        .mount(&mock)
        .await;

    // Transfer location points at the closed FTP port configured in test_app
    Mock::given(method("GET"))
        .and(path("/efetch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<Item Name="FTPLink">ftp://ftp.ncbi.nlm.nih.gov/geo/series/GSE1nnn/GSE1/suppl/</Item>"#,
        ))
        .mount(&mock)
        .await;

    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("db");
    let app = test_app(&mock.uri(), &base);

    let (status, response) = post_fetch(app, json!({"organism": "mouse"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response, json!({"error": "Failed to connect to FTP server."}));
}

#[tokio::test]
async fn test_api_key_forwarded_when_configured() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch"))
        .and(query_param("api_key", "test-key-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&[])))
        .expect(1)
        .mount(&mock)
        .await;

    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.ncbi.esearch_url = format!("{}/esearch", mock.uri());
    config.ncbi.efetch_url = format!("{}/efetch", mock.uri());
    config.ncbi.api_key = Some("test-key-123".to_string());
    config.storage.base_dir = tmp.path().to_path_buf();

    let app = api::router(AppState::new(config).expect("state"));

    // Empty idlist keeps the scenario to the search call only
    let (status, _) = post_fetch(app, json!({"organism": "mouse"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
