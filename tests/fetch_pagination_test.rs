//! Integration tests for paginated fetching against a mock Scorecard API

use compass::adapters::scorecard::{Fields, ScorecardClient};
use compass::config::schema::ScorecardConfig;
use compass::config::secret_string;
use compass::domain::{Entity, FetchError};
use mockito::Matcher;

fn client_for(server: &mockito::ServerGuard) -> ScorecardClient {
    let config = ScorecardConfig {
        base_url: format!("{}/schools.json", server.url()),
        api_key: secret_string("test-key".to_string()),
        page_limit: None,
        max_page_delay_secs: 0,
        timeout_seconds: 5,
        data_year: 2023,
    };
    ScorecardClient::new(&config).expect("Failed to build client")
}

fn page_matcher(page: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), "100".into()),
        Matcher::UrlEncoded("api_key".into(), "test-key".into()),
    ])
}

#[tokio::test]
async fn test_fetch_stops_at_first_empty_page() {
    let mut server = mockito::Server::new_async().await;

    let page0 = server
        .mock("GET", "/schools.json")
        .match_query(page_matcher(0))
        .with_status(200)
        .with_body(r#"{"metadata":{"total":150,"page":0,"per_page":100},"results":[{"id":100654,"school.name":"Alabama A & M University"}]}"#)
        .create_async()
        .await;
    let page1 = server
        .mock("GET", "/schools.json")
        .match_query(page_matcher(1))
        .with_status(200)
        .with_body(r#"{"metadata":{"total":150,"page":1,"per_page":100},"results":[{"id":100663,"school.name":"University of Alabama at Birmingham"}]}"#)
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/schools.json")
        .match_query(page_matcher(2))
        .with_status(200)
        .with_body(r#"{"metadata":{"total":150,"page":2,"per_page":100},"results":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let fields = Fields::new(Entity::School.fields()).unwrap();

    let batches = client.fetch(&fields, None).await.expect("fetch failed");

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].int_field("id"), Some(100654));
    assert_eq!(batches[1][0].int_field("id"), Some(100663));

    page0.assert_async().await;
    page1.assert_async().await;
    page2.assert_async().await;
}

#[tokio::test]
async fn test_page_limit_stops_before_fetching() {
    let mut server = mockito::Server::new_async().await;

    let page0 = server
        .mock("GET", "/schools.json")
        .match_query(page_matcher(0))
        .with_status(200)
        .with_body(r#"{"results":[{"id":100654}]}"#)
        .create_async()
        .await;
    // With page_limit = 1, page 1 must never be requested.
    let page1 = server
        .mock("GET", "/schools.json")
        .match_query(page_matcher(1))
        .with_status(200)
        .with_body(r#"{"results":[{"id":100663}]}"#)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let fields = Fields::new(Entity::School.fields()).unwrap();

    let batches = client.fetch(&fields, Some(1)).await.expect("fetch failed");

    assert_eq!(batches.len(), 1);
    page0.assert_async().await;
    page1.assert_async().await;
}

#[tokio::test]
async fn test_server_error_surfaces_page_and_partial() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/schools.json")
        .match_query(page_matcher(0))
        .with_status(200)
        .with_body(r#"{"results":[{"id":100654}]}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/schools.json")
        .match_query(page_matcher(1))
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let client = client_for(&server);
    let fields = Fields::new(Entity::School.fields()).unwrap();

    let failure = client.fetch(&fields, None).await.unwrap_err();

    assert_eq!(failure.page, 1);
    assert_eq!(failure.partial.len(), 1);
    match &failure.error {
        FetchError::Protocol { status, message } => {
            assert_eq!(*status, 503);
            assert!(message.contains("service unavailable"));
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/schools.json")
        .match_query(page_matcher(0))
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = client_for(&server);
    let fields = Fields::new(Entity::School.fields()).unwrap();

    let failure = client.fetch(&fields, None).await.unwrap_err();

    assert_eq!(failure.page, 0);
    assert!(failure.partial.is_empty());
    assert!(matches!(failure.error, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Port 9 (discard) is assumed closed.
    let config = ScorecardConfig {
        base_url: "http://127.0.0.1:9/schools.json".to_string(),
        api_key: secret_string("test-key".to_string()),
        page_limit: None,
        max_page_delay_secs: 0,
        timeout_seconds: 1,
        data_year: 2023,
    };
    let client = ScorecardClient::new(&config).unwrap();
    let fields = Fields::new(Entity::School.fields()).unwrap();

    let failure = client.fetch(&fields, None).await.unwrap_err();
    assert!(matches!(failure.error, FetchError::Transport(_)));
}
