//! Crawl-phase tests against a mock site

use site_ledger::config::CrawlerConfig;
use site_ledger::crawler::{crawl, CrawlOptions, HttpFetcher, PageFetcher, Scheduler};
use site_ledger::state::PageState;
use site_ledger::url::parse_seed;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fetcher with a short timeout so slow-page tests stay quick
fn fetcher() -> Arc<HttpFetcher> {
    let config = CrawlerConfig {
        fetch_timeout_secs: 1,
        ..CrawlerConfig::default()
    };
    Arc::new(HttpFetcher::from_config(&config, None).expect("Failed to build fetcher"))
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn at(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).expect("Failed to build URL")
}

/// Number of GET requests received per path
async fn requests_by_path(server: &MockServer) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for request in server.received_requests().await.unwrap_or_default() {
        *counts.entry(request.url.path().to_string()).or_insert(0) += 1;
    }
    counts
}

#[tokio::test]
async fn test_crawl_discovers_internal_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &format!(
            r##"<a href="/page1">One</a>
            <a href="/page1#top">One again</a>
            <a href="{}/page2">Two</a>
            <a href="https://external.invalid/elsewhere">External</a>
            <a href="mailto:team@example.com">Mail</a>"##,
            base
        ),
    )
    .await;
    mount_page(&server, "/page1", r#"<a href="page3">Three</a>"#).await;
    mount_page(&server, "/page2", "<p>Leaf</p>").await;
    mount_page(&server, "/page3", r#"<a href="/">Home</a>"#).await;

    let seed = parse_seed(&format!("{}/", base)).unwrap();
    let discovered = crawl(fetcher(), &seed, 50).await;

    assert_eq!(
        discovered,
        HashSet::from([
            at(&server, "/page1"),
            at(&server, "/page2"),
            at(&server, "/page3"),
            at(&server, "/"),
        ])
    );

    let requests = requests_by_path(&server).await;
    assert_eq!(requests.len(), 4);
    assert!(requests.values().all(|count| *count == 1), "{:?}", requests);
}

#[tokio::test]
async fn test_crawl_respects_page_budget() {
    let server = MockServer::start().await;

    for i in 0..10 {
        let route = if i == 0 { "/".to_string() } else { format!("/p{}", i) };
        mount_page(&server, &route, &format!(r#"<a href="/p{}">Next</a>"#, i + 1)).await;
    }

    let seed = parse_seed(&server.uri()).unwrap();
    let report = Scheduler::new(fetcher(), CrawlOptions::with_budget(3))
        .run(&seed)
        .await;

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
    assert_eq!(report.fetches_issued(), 3);
    // /p3 was discovered on the last fetched page but never fetched
    assert!(report.discovered.contains(&at(&server, "/p3")));
    assert!(!report.visited.contains_key(&at(&server, "/p3")));
}

#[tokio::test]
async fn test_slow_page_marked_unreachable() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/slow">Slow</a><a href="/fast">Fast</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            html(r#"<a href="/hidden">Hidden</a>"#).set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/fast", r#"<a href="/slow">Slow again</a>"#).await;

    let seed = parse_seed(&server.uri()).unwrap();
    let report = Scheduler::new(fetcher(), CrawlOptions::default())
        .run(&seed)
        .await;

    assert_eq!(
        report.visited.get(&at(&server, "/slow")),
        Some(&PageState::Unreachable)
    );
    assert!(!report.discovered.contains(&at(&server, "/hidden")));
    assert_eq!(report.fetches_issued(), 3);
}

#[tokio::test]
async fn test_http_errors_are_absorbed() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/error">Error</a><a href="/ok">OK</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", "<p>Fine</p>").await;

    let seed = parse_seed(&server.uri()).unwrap();
    let report = Scheduler::new(fetcher(), CrawlOptions::default())
        .run(&seed)
        .await;

    assert_eq!(
        report.visited.get(&at(&server, "/missing")),
        Some(&PageState::DeadLink)
    );
    assert_eq!(
        report.visited.get(&at(&server, "/error")),
        Some(&PageState::Failed)
    );
    assert_eq!(
        report.visited.get(&at(&server, "/ok")),
        Some(&PageState::Processed)
    );
    assert_eq!(report.discovered.len(), 3);
}

#[tokio::test]
async fn test_seed_without_links() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<h1>Lonely</h1>").await;

    let seed = parse_seed(&server.uri()).unwrap();
    let discovered = crawl(fetcher(), &seed, 50).await;

    assert!(discovered.is_empty());
}

#[tokio::test]
async fn test_concurrent_crawl_fetches_each_page_once() {
    let server = MockServer::start().await;

    let all_links: String = (0..20)
        .map(|i| format!(r#"<a href="/n{}">{}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", &all_links).await;
    for i in 0..20 {
        Mock::given(method("GET"))
            .and(path(format!("/n{}", i)))
            .respond_with(html(&all_links).set_delay(Duration::from_millis(20)))
            .mount(&server)
            .await;
    }

    let options = CrawlOptions {
        max_pages: 15,
        max_concurrent_fetches: 6,
        ..CrawlOptions::default()
    };
    let seed = parse_seed(&server.uri()).unwrap();
    let report = Scheduler::new(fetcher(), options).run(&seed).await;

    let requests = requests_by_path(&server).await;
    assert_eq!(requests.values().sum::<usize>(), 15);
    assert!(requests.values().all(|count| *count == 1));
    assert_eq!(report.discovered.len(), 20);
}

#[tokio::test]
async fn test_fetch_follows_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>Moved here</p>", "text/html"))
        .mount(&server)
        .await;

    let page = fetcher().fetch(&at(&server, "/old")).await.unwrap();

    assert_eq!(page.url, at(&server, "/old"));
    assert_eq!(page.final_url, at(&server, "/new"));
    assert_eq!(page.status_code, 200);
    assert!(page
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("text/html")));
    assert!(page.body.contains("Moved here"));
}
