//! End-to-end inventory tests: crawl, metadata pass, CSV export

use site_ledger::config::{parse_config, CrawlerConfig};
use site_ledger::crawler::{
    extract_metadata, run_inventory, Coordinator, CrawlOptions, HttpFetcher, InventoryOutcome,
    PageRecord,
};
use site_ledger::output::{export_csv, CrawlStatistics};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    let config = CrawlerConfig {
        fetch_timeout_secs: 1,
        ..CrawlerConfig::default()
    };
    HttpFetcher::from_config(&config, None).expect("Failed to build fetcher")
}

async fn mount_html(server: &MockServer, route: &str, document: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(document.to_string())
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn at(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).expect("Failed to build URL")
}

#[tokio::test]
async fn test_extract_metadata_canonical() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><head><title> Acme Widgets </title>
        <meta name="description" content="Widgets for every job."></head>
        <body><h1>Welcome</h1></body></html>"#,
    )
    .await;

    let url = at(&server, "/");
    let record = extract_metadata(&fetcher(), &url).await.unwrap();

    assert_eq!(record.url(), url.as_str());
    assert_eq!(record.title(), "Acme Widgets");
    assert_eq!(record.description(), "Widgets for every job.");
}

#[tokio::test]
async fn test_extract_metadata_fallback() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<html><body><h1>Welcome</h1><p>Hello</p></body></html>").await;

    let record = extract_metadata(&fetcher(), &at(&server, "/")).await.unwrap();

    assert_eq!(record.title(), "H1: Welcome");
    assert_eq!(record.description(), "Paragraph: Hello");
}

#[tokio::test]
async fn test_extract_metadata_total_fallback() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<html><body><div>Just a div</div></body></html>").await;

    let record = extract_metadata(&fetcher(), &at(&server, "/")).await.unwrap();

    assert_eq!(record.title(), "No Title Available");
    assert_eq!(record.description(), "No Description Available");
}

#[tokio::test]
async fn test_extract_metadata_failures_are_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<title>Too late</title>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let fetcher = fetcher();
    assert!(extract_metadata(&fetcher, &at(&server, "/error")).await.is_none());
    assert!(extract_metadata(&fetcher, &at(&server, "/slow")).await.is_none());
    assert!(extract_metadata(&fetcher, &at(&server, "/missing")).await.is_none());
}

#[tokio::test]
async fn test_full_inventory_to_csv() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        r#"<html><head><title>Home</title><meta name="description" content="The front page"></head>
        <body><a href="/about">About</a><a href="/blog/">Blog</a><a href="/gone">Gone</a></body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/about",
        r#"<html><body><h1>About, us</h1><p>Since 1999.</p><a href="/">Home</a></body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/blog/",
        r#"<html><head><title>Blog</title></head><body><a href="post-1">Post</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/blog/post-1", "<html><body></body></html>").await;

    let coordinator = Coordinator::new(Arc::new(fetcher()), CrawlOptions::default());
    let seed = at(&server, "/");
    let inventory = coordinator.run(&seed).await;

    assert_eq!(inventory.outcome(), InventoryOutcome::Records(4));
    assert_eq!(
        inventory.records,
        vec![
            PageRecord::new(seed.as_str(), "Home", "The front page"),
            PageRecord::new(
                at(&server, "/about").as_str(),
                "H1: About, us",
                "Paragraph: Since 1999."
            ),
            PageRecord::new(
                at(&server, "/blog/").as_str(),
                "Blog",
                "No Description Available"
            ),
            PageRecord::new(
                at(&server, "/blog/post-1").as_str(),
                "No Title Available",
                "No Description Available"
            ),
        ]
    );

    let stats = CrawlStatistics::from_inventory(&inventory);
    assert_eq!(stats.discovered, 5);
    assert_eq!(stats.fetched, 5);
    assert_eq!(stats.records, 4);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.failed(), 1);

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("scraped_data.csv");
    export_csv(&inventory.records, &csv_path).unwrap();

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "URL,Title,Meta Description");
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[2],
        format!(
            r#"{},"H1: About, us",Paragraph: Since 1999."#,
            at(&server, "/about")
        )
    );
}

#[tokio::test]
async fn test_inventory_with_no_links() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<html><head><title>Solo</title></head></html>").await;

    let coordinator = Coordinator::new(Arc::new(fetcher()), CrawlOptions::default());
    let inventory = coordinator.run(&at(&server, "/")).await;

    assert_eq!(inventory.outcome(), InventoryOutcome::NoLinksFound);
    assert!(inventory.records.is_empty());
}

#[tokio::test]
async fn test_inventory_with_no_accessible_pages() {
    let server = MockServer::start().await;
    mount_html(&server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#).await;

    let coordinator = Coordinator::new(Arc::new(fetcher()), CrawlOptions::default());
    let inventory = coordinator.run(&at(&server, "/")).await;

    assert_eq!(inventory.outcome(), InventoryOutcome::NoAccessiblePages);
    assert_eq!(
        inventory.outcome().message(),
        Some("No accessible pages found on the provided website.")
    );
}

#[tokio::test]
async fn test_run_inventory_from_config() {
    let server = MockServer::start().await;
    // The seed only answers to the configured crawler
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "LedgerTest/0.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#),
        )
        .mount(&server)
        .await;
    for route in ["/a", "/b", "/c"] {
        mount_html(&server, route, "<html><head><title>Leaf</title></head></html>").await;
    }

    let config = parse_config(
        r#"
[crawler]
max-pages = 2
fetch-timeout-secs = 2

[user-agent]
crawler-name = "LedgerTest"
crawler-version = "0.1"
"#,
    )
    .unwrap();

    let inventory = run_inventory(&config, &at(&server, "/")).await.unwrap();

    assert_eq!(inventory.crawl.fetches_issued(), 2);
    assert_eq!(inventory.records.len(), 3);
    assert!(inventory.records.iter().all(|r| r.title() == "Leaf"));
}
