use std::time::Duration;

use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;

use search_widget::config::Config;
use search_widget::models::{SearchResponse, SearchResult};
use search_widget::widget::FETCH_FAILED_ALERT;
use search_widget::{
    ClickOutcome, HttpSearchClient, MemoryView, SearchBackend, SearchWidget, WidgetError,
};

fn client_for(server: &MockServer) -> HttpSearchClient {
    HttpSearchClient::from_config(&Config::new(
        server.url("/search"),
        Duration::from_secs(5),
    ))
    .unwrap()
}

#[tokio::test]
async fn test_posts_json_query() -> Result<()> {
    let server = MockServer::start_async().await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/search")
                .header("content-type", "application/json")
                .json_body(json!({ "query": "  machine learning " }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([
                    { "title": "Intro to ML", "link": "https://example.com/ml", "total_words": 812 },
                    { "link": "https://example.com/untitled" }
                ]));
        })
        .await;

    let response = client_for(&server).search("  machine learning ").await?;

    search_mock.assert_async().await;
    assert_eq!(
        response.into_results(),
        vec![
            SearchResult::new("Intro to ML", "https://example.com/ml"),
            SearchResult {
                title: None,
                link: Some("https://example.com/untitled".to_string()),
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_an_error() -> Result<()> {
    let server = MockServer::start_async().await;
    for status in [400u16, 404, 500, 503] {
        let mut mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/search");
                then.status(status)
                    .json_body(json!({ "error": "Query cannot be empty" }));
            })
            .await;

        let result = client_for(&server).search("rust").await;
        assert!(
            matches!(result, Err(WidgetError::Status(code)) if code == status),
            "status {status} should fail, got {result:?}"
        );
        mock.delete_async().await;
    }
    Ok(())
}

#[tokio::test]
async fn test_invalid_json_is_a_parse_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/search");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let result = client_for(&server).search("rust").await;
    assert!(matches!(result, Err(WidgetError::Parse(_))), "got {result:?}");
    Ok(())
}

#[tokio::test]
async fn test_object_body_is_tagged_other() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/search");
            then.status(200).json_body(json!({ "unexpected": true }));
        })
        .await;

    let response = client_for(&server).search("rust").await?;
    assert_eq!(response, SearchResponse::Other(json!({ "unexpected": true })));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() {
    // Port 9 (discard) is not expected to accept HTTP connections.
    let client = HttpSearchClient::new("http://127.0.0.1:9/search", Duration::from_secs(2)).unwrap();

    let result = client.search("rust").await;
    assert!(matches!(result, Err(WidgetError::Transport(_))), "got {result:?}");
}

#[tokio::test]
async fn test_widget_over_http() -> Result<()> {
    let server = MockServer::start_async().await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/search")
                .json_body(json!({ "query": "ai" }));
            then.status(200).json_body(json!([
                { "title": "Artificial intelligence", "link": "https://example.com/ai" }
            ]));
        })
        .await;

    let widget = SearchWidget::new(MemoryView::new("ai"), client_for(&server));
    let outcome = widget.on_search_click().await;

    search_mock.assert_async().await;
    assert_eq!(outcome, ClickOutcome::Rendered { count: 1 });
    assert_eq!(
        widget.view().results_html(),
        r#"<div class="result-item"><a href="https://example.com/ai" target="_blank">Artificial intelligence</a></div>"#
    );
    Ok(())
}

#[tokio::test]
async fn test_widget_over_http_server_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/search");
            then.status(500);
        })
        .await;

    let widget = SearchWidget::new(
        MemoryView::new("rust").with_results_html("<p>No results found.</p>"),
        client_for(&server),
    );

    assert_eq!(widget.on_search_click().await, ClickOutcome::ErrorShown);
    assert_eq!(widget.view().alerts(), vec![FETCH_FAILED_ALERT.to_string()]);
    assert_eq!(widget.view().results_html(), "<p>No results found.</p>");
    Ok(())
}

#[tokio::test]
async fn test_blank_query_sends_nothing() -> Result<()> {
    let server = MockServer::start_async().await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/search");
            then.status(200).json_body(json!([]));
        })
        .await;

    let widget = SearchWidget::new(MemoryView::new("   "), client_for(&server));

    assert_eq!(widget.on_search_click().await, ClickOutcome::Aborted);
    assert_eq!(search_mock.hits_async().await, 0);
    Ok(())
}
