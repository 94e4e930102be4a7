//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch-and-aggregate cycle end-to-end.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use title_crawler::config::{Config, CrawlerConfig, UserAgentConfig};
use title_crawler::crawler::{build_http_client, crawl, WorkerPool, NETWORK_ERROR_STATUS};
use title_crawler::output::{save_report, CrawlReport};
use title_crawler::PageResult;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 42 bytes of JSON
const JSON_BODY: &str = r#"{"slideshow":{"title":"Sample","n":12345}}"#;

fn create_pool(workers: usize, timeout_secs: u64) -> WorkerPool {
    let crawler = CrawlerConfig {
        request_timeout_secs: timeout_secs,
        ..CrawlerConfig::default()
    };
    let client = build_http_client(&crawler, &UserAgentConfig::default())
        .expect("Failed to build client");
    WorkerPool::new(client, NonZeroUsize::new(workers).expect("workers must be non-zero"))
}

fn find<'a>(report: &'a CrawlReport, url: &str) -> &'a PageResult {
    report
        .results
        .iter()
        .find(|r| r.url == url)
        .unwrap_or_else(|| panic!("no result for {}", url))
}

fn html_page(title: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>{}</title></head><body>Content</body></html>",
            title
        ),
        "text/html",
    )
}

/// Serves one request, promising 1000 body bytes but closing after a few
async fn serve_truncated(mut stream: TcpStream) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let (content_type, partial) = if request.starts_with("GET /data.json ") {
        ("application/json", r#"{"partial":"#)
    } else {
        ("text/html", "<html><head><title>Cut")
    };

    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: 1000\r\nConnection: close\r\n\r\n",
        content_type
    );
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(partial.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Starts a raw TCP server whose responses are cut short, returns its base URL
async fn start_truncating_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve_truncated(stream));
        }
    });

    format!("http://{}", addr)
}

/// Mounts `count` HTML pages at /page0, /page1, ..., each expected exactly once
async fn mount_pages(server: &MockServer, count: usize) -> Vec<String> {
    let mut urls = Vec::new();
    for i in 0..count {
        Mock::given(method("GET"))
            .and(path(format!("/page{}", i)))
            .respond_with(html_page(&format!("Page {}", i)))
            .expect(1)
            .mount(server)
            .await;
        urls.push(format!("{}/page{}", server.uri(), i));
    }
    urls
}

/// Mounts one route per content category
async fn mount_mixed_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                "<html><head>\n<TITLE lang=\"en\">\n  Home Page  \n</TITLE></head></html>",
                "text/html",
            ),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(JSON_BODY, "application/json"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/image.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/untitled"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>No head</body></html>", "text/html"),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            "<html><head><title>Not Found</title></head></html>",
            "text/html",
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/created"))
        .respond_with(ResponseTemplate::new(201).set_body_raw(JSON_BODY, "application/json"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_mixed_content_types() {
    let server = MockServer::start().await;
    mount_mixed_site(&server).await;
    let base = server.uri();

    let urls: Vec<String> = ["/", "/json", "/image.png", "/untitled", "/missing", "/created"]
        .iter()
        .map(|p| format!("{}{}", base, p))
        .collect();

    let report = create_pool(3, 10).run(urls.clone()).await;

    assert_eq!(report.results.len(), 6);
    assert_eq!(report.summary.total_urls, 6);

    let home = find(&report, &urls[0]);
    assert_eq!(home.title, "Home Page");
    assert_eq!(home.status, 200);

    let json = find(&report, &urls[1]);
    assert_eq!(json.title, "JSON Response: 42 characters");
    assert_eq!(json.status, 200);

    let image = find(&report, &urls[2]);
    assert_eq!(image.title, "Non-HTML content: image/png");
    assert_eq!(image.status, 200);

    let untitled = find(&report, &urls[3]);
    assert_eq!(untitled.title, "No title found");

    let missing = find(&report, &urls[4]);
    assert_eq!(missing.title, "Not Found");
    assert_eq!(missing.status, 404);

    let created = find(&report, &urls[5]);
    assert_eq!(created.title, "JSON Response: 42 characters");
    assert_eq!(created.status, 201);

    // 201 and 404 count as failures; the four 200s are successes
    assert_eq!(report.summary.successful_fetches, 4);
    assert_eq!(report.summary.failed_fetches, 2);
}

#[tokio::test]
async fn test_domain_includes_mock_server_port() {
    let server = MockServer::start().await;
    let urls = mount_pages(&server, 1).await;

    let report = create_pool(1, 10).run(urls).await;

    let expected = server.uri().trim_start_matches("http://").to_string();
    assert_eq!(report.results[0].domain, expected);
}

#[tokio::test]
async fn test_single_worker_processes_everything() {
    let server = MockServer::start().await;
    let urls = mount_pages(&server, 5).await;

    let report = create_pool(1, 10).run(urls.clone()).await;

    assert_eq!(report.results.len(), 5);
    assert_eq!(report.summary.total_urls, 5);
    assert_eq!(report.summary.successful_fetches, 5);

    // With one worker, completion order is queue order
    let order: Vec<_> = report.results.iter().map(|r| r.url.clone()).collect();
    assert_eq!(order, urls);
}

#[tokio::test]
async fn test_more_workers_than_urls() {
    let server = MockServer::start().await;
    let urls = mount_pages(&server, 5).await;

    let report = create_pool(50, 10).run(urls.clone()).await;

    assert_eq!(report.results.len(), 5);
    let seen: HashSet<_> = report.results.iter().map(|r| r.url.clone()).collect();
    let expected: HashSet<_> = urls.into_iter().collect();
    assert_eq!(seen, expected, "duplicates or drops in results");

    for result in &report.results {
        let n = result.url.rsplit("page").next().unwrap();
        assert_eq!(result.title, format!("Page {}", n));
    }
}

#[tokio::test]
async fn test_repeated_runs_agree() {
    let server = MockServer::start().await;
    mount_mixed_site(&server).await;
    let base = server.uri();

    let urls: Vec<String> = ["/", "/json", "/missing", "/created", "/image.png"]
        .iter()
        .map(|p| format!("{}{}", base, p))
        .chain(std::iter::once("not a url".to_string()))
        .collect();

    let pool = create_pool(4, 10);
    let first = pool.run(urls.clone()).await;
    let second = pool.run(urls.clone()).await;

    assert_eq!(
        first.summary.successful_fetches,
        second.summary.successful_fetches
    );
    assert_eq!(first.summary.failed_fetches, second.summary.failed_fetches);

    for url in &urls {
        let a = find(&first, url);
        let b = find(&second, url);
        assert_eq!(a.status, b.status, "status differs for {}", url);
        assert_eq!(a.domain, b.domain, "domain differs for {}", url);
        if a.status != NETWORK_ERROR_STATUS {
            assert_eq!(a.title, b.title, "title differs for {}", url);
        }
    }
}

#[tokio::test]
async fn test_unreachable_host_does_not_stop_run() {
    let server = MockServer::start().await;
    let mut urls = mount_pages(&server, 2).await;
    urls.push("http://127.0.0.1:1/".to_string());
    urls.push("not a url".to_string());

    let report = create_pool(2, 5).run(urls).await;

    assert_eq!(report.results.len(), 4);
    assert_eq!(report.summary.successful_fetches, 2);
    assert_eq!(report.summary.failed_fetches, 2);

    let refused = find(&report, "http://127.0.0.1:1/");
    assert_eq!(refused.status, NETWORK_ERROR_STATUS);
    assert!(refused.title.starts_with("Error: "));
    assert!(refused.title.len() > "Error: ".len());
    assert_eq!(refused.domain, "127.0.0.1:1");

    let unparseable = find(&report, "not a url");
    assert_eq!(unparseable.status, NETWORK_ERROR_STATUS);
    assert_eq!(unparseable.domain, "");
    assert!(unparseable.title.starts_with("Error: "));
}

#[tokio::test]
async fn test_request_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page("Too Late").set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let url = format!("{}/slow", server.uri());

    let report = create_pool(1, 1).run(vec![url.clone()]).await;

    let slow = find(&report, &url);
    assert_eq!(slow.status, NETWORK_ERROR_STATUS);
    assert!(slow.title.starts_with("Error: "));
    assert!(slow.time_taken < 4.0, "timeout not enforced: {}", slow.time_taken);
}

#[tokio::test]
async fn test_workers_fetch_concurrently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_page("Delayed").set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;
    let urls: Vec<String> = (0..5).map(|i| format!("{}/slow{}", server.uri(), i)).collect();

    let report = create_pool(5, 10).run(urls).await;

    assert_eq!(report.summary.successful_fetches, 5);
    // Sequential fetching would take at least 2.5s
    assert!(
        report.summary.total_time < 2.0,
        "total_time {} suggests no overlap",
        report.summary.total_time
    );
    for result in &report.results {
        assert!(result.time_taken >= 0.5);
    }
    let sum: f64 = report.results.iter().map(|r| r.time_taken).sum();
    assert!(sum > report.summary.total_time);
}

#[tokio::test]
async fn test_crawl_entry_point_and_saved_report() {
    let server = MockServer::start().await;
    let urls = mount_pages(&server, 3).await;

    let mut config = Config::default();
    config.crawler.workers = 2;
    config.crawler.progress_interval = 1;

    let report = crawl(&config, urls).await.expect("Crawl failed");
    assert_eq!(report.summary.total_urls, 3);
    assert!(
        (report.summary.average_time_per_url - report.summary.total_time / 3.0).abs() < 1e-12
    );

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("results.json");
    save_report(&report, &out).expect("Failed to save report");

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).expect("Failed to read report"))
            .expect("Report is not valid JSON");
    assert_eq!(value["summary"]["total_urls"], 3);
    assert_eq!(value["summary"]["successful_fetches"], 3);
    assert_eq!(value["results"].as_array().map(Vec::len), Some(3));
    for result in value["results"].as_array().unwrap() {
        for field in ["url", "title", "status", "time_taken", "domain"] {
            assert!(result.get(field).is_some(), "missing field {}", field);
        }
    }
}

#[tokio::test]
async fn test_crawl_rejects_zero_workers() {
    let mut config = Config::default();
    config.crawler.workers = 0;

    let result = crawl(&config, vec!["https://example.com".to_string()]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_truncated_body_is_reported_with_status() {
    let base = start_truncating_server().await;
    let html_url = format!("{}/page.html", base);
    let json_url = format!("{}/data.json", base);

    let report = create_pool(2, 5)
        .run(vec![html_url.clone(), json_url.clone()])
        .await;

    assert_eq!(report.results.len(), 2);

    let html = find(&report, &html_url);
    assert_eq!(html.status, 200);
    assert!(
        html.title.starts_with("Error reading body:"),
        "unexpected title: {}",
        html.title
    );

    let json = find(&report, &json_url);
    assert_eq!(json.status, 200);
    assert!(
        json.title.starts_with("Error reading JSON body:"),
        "unexpected title: {}",
        json.title
    );

    // The response arrived with 200, so both still count as successful
    assert_eq!(report.summary.total_urls, 2);
    assert_eq!(report.summary.successful_fetches, 2);
    assert_eq!(report.summary.failed_fetches, 0);
}
