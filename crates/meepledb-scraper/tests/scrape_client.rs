//! Integration tests for `ScrapeClient` using wiremock HTTP mocks.

use meepledb_scraper::{ScrapeClient, ScrapeError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ScrapeClient {
    ScrapeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn scrape_returns_markdown_and_raw_html() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "success": true,
        "data": {
            "markdown": "# Wingspan\n\nItem 266192",
            "rawHtml": "<html><img src=\"https://cf.geekdo-images.com/A__itemrep/img/pic1.jpg\"></html>"
        }
    });

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .and(body_partial_json(serde_json::json!({
            "url": "https://boardgamegeek.com/boardgame/266192/wingspan",
            "formats": ["markdown", "rawHtml"],
            "onlyMainContent": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .scrape("https://boardgamegeek.com/boardgame/266192/wingspan")
        .await
        .expect("should parse scrape response");

    assert!(result.markdown.contains("266192"));
    assert!(result.raw_html.contains("cf.geekdo-images.com"));
}

#[tokio::test]
async fn scrape_accepts_top_level_payload() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "markdown": "# Some game",
        "rawHtml": "<html></html>"
    });

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .scrape("https://example.com/item/1/x")
        .await
        .expect("top-level payload should parse");

    assert_eq!(result.markdown, "# Some game");
}

#[tokio::test]
async fn scrape_maps_non_2xx_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.scrape("https://example.com/item/1/x").await;

    assert!(matches!(
        result,
        Err(ScrapeError::UnexpectedStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn scrape_rejects_empty_markdown() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "success": true,
        "data": { "markdown": "   ", "rawHtml": "<html></html>" }
    });

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.scrape("https://example.com/item/1/x").await;

    assert!(matches!(result, Err(ScrapeError::NoContent { .. })));
}

#[tokio::test]
async fn scrape_rejects_missing_body_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.scrape("https://example.com/item/1/x").await;

    assert!(matches!(result, Err(ScrapeError::NoContent { .. })));
}
