mod common;

use common::init_tracing;
use hn_curator::{
    CuratorConfig, CuratorError, FetchConfig, Fetcher, ItemApi, ItemType, PipelineBuilder, RankingKind,
    RankingSource,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Routes = HashMap<String, (u16, String)>;

/// Status used for routes that accept the request and never answer.
const HANG: u16 = 0;

/// Serve canned responses keyed by request path. Returns the server's base URL.
async fn spawn_server(routes: Routes) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                while read < buf.len() {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&buf[..read]);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, "not found".to_string()));

                if status == HANG {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    return;
                }

                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

fn route(routes: &mut Routes, path: &str, status: u16, body: &str) {
    routes.insert(path.to_string(), (status, body.to_string()));
}

fn fetcher_for(base: &str) -> Fetcher {
    Fetcher::new(FetchConfig {
        api_base_url: format!("{}/v0", base),
        timeout_seconds: 5,
        ..FetchConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_ranking_parses_identifier_list() {
    init_tracing();
    let mut routes = Routes::new();
    route(&mut routes, "/v0/topstories.json", 200, "[5, 4, 3]");
    let base = spawn_server(routes).await;
    let fetcher = fetcher_for(&base);

    let source = RankingSource::from_kind(RankingKind::Top, &fetcher.config().api_base_url);
    let ids = fetcher.fetch_ranking(&source).await.unwrap();

    assert_eq!(ids, vec![5, 4, 3]);
}

#[tokio::test]
async fn test_fetch_ranking_rejects_non_list_body() {
    let mut routes = Routes::new();
    route(&mut routes, "/v0/newstories.json", 200, r#"{"error": "oops"}"#);
    let base = spawn_server(routes).await;
    let fetcher = fetcher_for(&base);

    let source = RankingSource::from_kind(RankingKind::New, &fetcher.config().api_base_url);
    let result = fetcher.fetch_ranking(&source).await;

    match result {
        Err(CuratorError::SourceParse { source_name, .. }) => assert_eq!(source_name, "new"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_ranking_reports_http_status() {
    let base = spawn_server(Routes::new()).await;
    let fetcher = fetcher_for(&base);

    let source = RankingSource::from_kind(RankingKind::Best, &fetcher.config().api_base_url);
    let result = fetcher.fetch_ranking(&source).await;

    assert!(matches!(
        result,
        Err(CuratorError::SourceUnavailable { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_fetch_item_absorbs_failures() {
    init_tracing();
    let mut routes = Routes::new();
    route(
        &mut routes,
        "/v0/item/5.json",
        200,
        r#"{"id": 5, "title": "Hello", "url": "https://example.com/h", "type": "story", "descendants": 3, "by": "pg", "score": 10, "time": 1175714200}"#,
    );
    route(&mut routes, "/v0/item/6.json", 200, r#"{"id": 6, "type": "something-new"}"#);
    route(&mut routes, "/v0/item/4.json", 200, "null");
    route(&mut routes, "/v0/item/3.json", 500, "boom");
    route(&mut routes, "/v0/item/2.json", 200, "{not json");
    let base = spawn_server(routes).await;
    let fetcher = fetcher_for(&base);

    let item = fetcher.fetch_item(5).await.expect("item 5 exists");
    assert_eq!(item.title.as_deref(), Some("Hello"));
    assert_eq!(item.kind, ItemType::Story);
    assert_eq!(item.descendants, Some(3));
    assert_eq!(item.by.as_deref(), Some("pg"));

    let sparse = fetcher.fetch_item(6).await.expect("item 6 exists");
    assert_eq!(sparse.kind, ItemType::Unknown);
    assert_eq!(sparse.url, None);
    assert_eq!(sparse.descendants, None);

    assert!(fetcher.fetch_item(4).await.is_none());
    assert!(fetcher.fetch_item(3).await.is_none());
    assert!(fetcher.fetch_item(2).await.is_none());
    assert!(fetcher.fetch_item(1).await.is_none());
}

#[test]
fn test_item_failure_names_the_item() {
    let error = CuratorError::ItemUnavailable { id: 3, status: 500 };
    assert_eq!(error.to_string(), "Item 3 returned HTTP 500");
}

#[tokio::test]
async fn test_hung_item_fetch_times_out() {
    init_tracing();
    let mut routes = Routes::new();
    route(&mut routes, "/v0/topstories.json", 200, "[1, 2, 3]");
    route(&mut routes, "/v0/item/1.json", HANG, "");
    route(
        &mut routes,
        "/v0/item/2.json",
        200,
        r#"{"id": 2, "title": "Neat bridge design", "url": "https://example.org/bridge", "type": "story", "descendants": 10}"#,
    );
    route(
        &mut routes,
        "/v0/item/3.json",
        200,
        r#"{"id": 3, "title": "Compilers", "url": "https://example.net/c", "type": "story", "descendants": 6}"#,
    );
    let base = spawn_server(routes).await;

    let fetcher = Fetcher::new(FetchConfig {
        api_base_url: format!("{}/v0", base),
        timeout_seconds: 1,
        ..FetchConfig::default()
    })
    .unwrap();

    let started = Instant::now();
    assert!(fetcher.fetch_item(1).await.is_none());
    assert!(started.elapsed() < Duration::from_secs(3));

    // The hung item is dropped; the rest of the run still completes
    let mut config = CuratorConfig::default();
    config.fetch.api_base_url = format!("{}/v0", base);
    config.fetch.timeout_seconds = 1;
    let config = config.with_ranking_kinds(&[RankingKind::Top]);

    let started = Instant::now();
    let digest = PipelineBuilder::new()
        .with_config(config)
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(digest.identifiers_collected, 3);
    assert_eq!(digest.items_fetched, 2);
    let accepted: Vec<u64> = digest.partition.accepted().iter().map(|item| item.id).collect();
    assert_eq!(accepted, vec![2, 3]);
}

#[tokio::test]
async fn test_pipeline_over_http() {
    init_tracing();
    let mut routes = Routes::new();
    route(&mut routes, "/v0/topstories.json", 200, "[1, 2, 3]");
    route(&mut routes, "/v0/newstories.json", 200, "[3, 4]");
    route(
        &mut routes,
        "/v0/item/1.json",
        200,
        r#"{"id": 1, "title": "Launch HN: My Thing", "url": "https://example.com/x", "type": "story", "descendants": 8}"#,
    );
    route(
        &mut routes,
        "/v0/item/2.json",
        200,
        r#"{"id": 2, "title": "Ask HN", "type": "story", "descendants": 2}"#,
    );
    route(
        &mut routes,
        "/v0/item/3.json",
        200,
        r#"{"id": 3, "title": "Neat bridge design", "url": "https://example.org/bridge", "type": "story", "descendants": 10}"#,
    );
    route(&mut routes, "/v0/item/4.json", 200, "null");
    let base = spawn_server(routes).await;

    let mut config = CuratorConfig::default();
    config.fetch.api_base_url = format!("{}/v0", base);
    let config = config.with_ranking_kinds(&[RankingKind::Top, RankingKind::New]);

    let digest = PipelineBuilder::new()
        .with_config(config)
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(digest.identifiers_collected, 4);
    assert_eq!(digest.items_fetched, 3);
    let accepted: Vec<u64> = digest.partition.accepted().iter().map(|item| item.id).collect();
    assert_eq!(accepted, vec![3]);
    let causes: Vec<&str> = digest
        .partition
        .rejected()
        .iter()
        .filter_map(|r| r.cause.as_ref().map(|c| c.rule_name()))
        .collect();
    assert_eq!(causes, vec!["keyword", "low_engagement"]);
}
