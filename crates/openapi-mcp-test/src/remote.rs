//! Remote loading through the real HTTP fetcher against a mock server.
//!
//! The fetcher is blocking, so every load runs on `spawn_blocking`.

use std::time::Duration;

use openapi_mcp_spec::{ErrorKind, HttpFetcher, SpecError, SpecProcessor};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixture;

fn petstore_yaml() -> String {
    std::fs::read_to_string(fixture("petstore.yaml")).unwrap()
}

fn petstore_json() -> String {
    std::fs::read_to_string(fixture("petstore.json")).unwrap()
}

async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

/// Load `url` with a fresh processor; returns (result summary, still loaded).
async fn load(url: String) -> (Result<(String, usize), SpecError>, bool) {
    tokio::task::spawn_blocking(move || {
        let mut processor = SpecProcessor::new();
        let result = processor
            .load(&url)
            .map(|doc| doc.title().to_string())
            .and_then(|title| Ok((title, processor.extract_endpoints()?.len())));
        (result, processor.is_loaded())
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn yaml_content_type_is_honored() {
    let server = serve(
        "/openapi.yaml",
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/x-yaml")
            .set_body_string(petstore_yaml()),
    )
    .await;

    let (result, loaded) = load(format!("{}/openapi.yaml", server.uri())).await;
    assert_eq!(result.unwrap(), ("Petstore API".to_string(), 3));
    assert!(loaded);
}

#[tokio::test(flavor = "multi_thread")]
async fn json_content_type_is_honored() {
    let server = serve(
        "/openapi.json",
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/json; charset=utf-8")
            .set_body_string(petstore_json()),
    )
    .await;

    let (result, _) = load(format!("{}/openapi.json", server.uri())).await;
    assert_eq!(result.unwrap(), ("Petstore API".to_string(), 2));
}

#[tokio::test(flavor = "multi_thread")]
async fn declared_json_with_yaml_body_is_a_format_error() {
    let server = serve(
        "/spec",
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/json")
            .set_body_string(petstore_yaml()),
    )
    .await;

    let (result, loaded) = load(format!("{}/spec", server.uri())).await;
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains("invalid JSON format"));
    assert!(!loaded);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_content_type_infers_format() {
    let server = serve(
        "/spec",
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/plain")
            .set_body_string(petstore_yaml()),
    )
    .await;

    let (result, _) = load(format!("{}/spec", server.uri())).await;
    assert_eq!(result.unwrap().0, "Petstore API");
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_is_a_transport_error() {
    let server = serve("/missing.yaml", ResponseTemplate::new(404)).await;

    let (result, loaded) = load(format!("{}/missing.yaml", server.uri())).await;
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("404"));
    assert!(!loaded);
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_validation_failure_is_reported() {
    let body = std::fs::read_to_string(fixture("invalid-version.yaml")).unwrap();
    let server = serve(
        "/old.yaml",
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/yaml")
            .set_body_string(body),
    )
    .await;

    let (result, loaded) = load(format!("{}/old.yaml", server.uri())).await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    assert!(!loaded);
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_server_times_out() {
    let server = serve(
        "/slow.yaml",
        ResponseTemplate::new(200)
            .set_body_string(petstore_yaml())
            .set_delay(Duration::from_secs(2)),
    )
    .await;
    let url = format!("{}/slow.yaml", server.uri());

    let (err, loaded) = tokio::task::spawn_blocking(move || {
        let mut processor =
            SpecProcessor::with_fetcher(HttpFetcher::new().with_timeout(Duration::from_millis(200)));
        let err = processor.load(&url).map(|_| ()).unwrap_err();
        (err, processor.is_loaded())
    })
    .await
    .unwrap();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!loaded);
}
