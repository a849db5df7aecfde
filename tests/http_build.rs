//! End-to-end builds against a local HTTP server.

use std::sync::Arc;
use std::time::Duration;

use eddy::app::{AppContext, BuildError, EddyError};
use eddy::builder::PostSource;
use eddy::config::Config;
use eddy::domain::{FeedFormat, Filter, Tally};
use eddy::fetcher::{Fetcher, HttpFetcher, ParallelFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ranking_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.feed.api_base = format!("{}/v0", server.uri());
    config.feed.discussion_url = "https://talk.example.com/item?id={id}".to_string();
    config.feed.poll_interval_ms = 20;
    config
}

async fn serve(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_ranking_build_over_http() {
    let server = MockServer::start().await;
    serve(&server, "/v0/topstories.json", 200, "[101, 102]").await;
    serve(&server, "/v0/item/101.json", 200, r#"{"title": "A", "score": 5}"#).await;
    serve(
        &server,
        "/v0/item/102.json",
        200,
        r#"{"title": "B", "score": 9, "url": "http://x"}"#,
    )
    .await;

    let ctx = AppContext::new(&ranking_config(&server)).unwrap();
    let posts = ctx.initial_posts(Filter::Front).await.unwrap();

    let summary: Vec<_> = posts
        .iter()
        .map(|p| (p.id, p.title.as_str(), p.link.as_str(), p.tally))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some(101), "A", "https://talk.example.com/item?id=101", Tally::Score(5)),
            (Some(102), "B", "http://x", Tally::Score(9)),
        ]
    );
}

#[tokio::test]
async fn test_error_status_body_reaches_the_decoder() {
    let server = MockServer::start().await;
    serve(&server, "/v0/beststories.json", 503, "<html>down</html>").await;

    let ctx = AppContext::new(&ranking_config(&server)).unwrap();
    let err = ctx
        .builder
        .build(ctx.urls.url_for(Filter::Best))
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::RankingDecodeFailed(_)));
}

#[tokio::test]
async fn test_missing_story_fails_startup() {
    let server = MockServer::start().await;
    serve(&server, "/v0/topstories.json", 200, "[1, 2]").await;
    serve(&server, "/v0/item/1.json", 200, r#"{"title": "ok", "score": 1}"#).await;
    serve(&server, "/v0/item/2.json", 404, "null").await;

    let ctx = AppContext::new(&ranking_config(&server)).unwrap();
    let err = ctx.initial_posts(Filter::Front).await.unwrap_err();

    match err {
        EddyError::StartupFailed(BuildError::StoryDecodeFailed { id, .. }) => assert_eq!(id, 2),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_syndication_build_over_http() {
    let server = MockServer::start().await;
    let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Newest</title>
    <link>https://news.example.com/</link>
    <description>Newest stories</description>
    <item>
      <title>Rust &amp; friends</title>
      <link>https://blog.example.com/rust</link>
      <comments>https://news.example.com/item?id=7</comments>
      <description><![CDATA[<p>Points: 3</p><p># Comments: 42</p>]]></description>
    </item>
    <item>
      <title>No counts here</title>
      <link>https://blog.example.com/quiet</link>
    </item>
  </channel>
</rss>"#;
    serve(&server, "/newest", 200, feed).await;

    let mut config = Config::default();
    config.feed.format = FeedFormat::Syndication;
    config.feed.rss.newest = format!("{}/newest", server.uri());

    let ctx = AppContext::new(&config).unwrap();
    let posts = ctx
        .builder
        .build(ctx.urls.url_for(Filter::Newest))
        .await
        .unwrap();

    assert_eq!(posts.len(), 2);
    let first = posts.get(0).unwrap();
    assert_eq!(first.title, "Rust & friends");
    assert_eq!(first.tally, Tally::Comments(42));
    assert_eq!(
        first.comments_link.as_deref(),
        Some("https://news.example.com/item?id=7")
    );
    assert_eq!(posts.get(1).unwrap().tally.to_string(), "?");
}

#[tokio::test]
async fn test_parallel_fetch_keeps_request_order() {
    let server = MockServer::start().await;
    for (i, delay) in [(0, 150), (1, 10), (2, 80)] {
        Mock::given(method("GET"))
            .and(path(format!("/slow/{}", i)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("body {}", i))
                    .set_delay(Duration::from_millis(delay)),
            )
            .mount(&server)
            .await;
    }

    let http: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new().unwrap());
    let fetcher = ParallelFetcher::with_workers(http, 3).poll_interval(Duration::from_millis(5));
    let urls: Vec<String> = (0..3).map(|i| format!("{}/slow/{}", server.uri(), i)).collect();

    let bodies: Vec<String> = fetcher
        .fetch_many(&urls)
        .await
        .into_iter()
        .map(|r| String::from_utf8(r.unwrap()).unwrap())
        .collect();

    assert_eq!(bodies, vec!["body 0", "body 1", "body 2"]);
}
