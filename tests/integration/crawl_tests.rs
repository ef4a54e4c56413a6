//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from term list to sorted result file.

use freq_spider::config::{apply_overrides, Config, CrawlerConfig, EndpointConfig, OutputConfig};
use freq_spider::crawler::{Coordinator, Fetch, FetchOutcome};
use freq_spider::state::CrawlState;
use freq_spider::storage::{read_frequency_file, Frequency};
use freq_spider::terms::Term;
use freq_spider::SpiderError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, concurrency: i64, timeout_secs: i64) -> Config {
    Config {
        crawler: CrawlerConfig {
            concurrency,
            timeout_secs,
        },
        endpoint: EndpointConfig {
            base_url: format!("{}/search/", server.uri()),
            user_agent: "TestBot/1.0".to_string(),
        },
        output: OutputConfig::default(),
    }
}

/// Search page echoing `term` with `total` hits
fn search_page(term: &str, total: u64) -> String {
    format!(
        r#"<html><body>
        <form><input type="text" name="query" class="input" value="{}"></form>
        <input type="hidden" id="totalnum" value="{}">
        </body></html>"#,
        term, total
    )
}

async fn mount_term(server: &MockServer, term: &str, total: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/search/{}", term)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(search_page(term, total))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn write_terms(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("terms.txt");
    std::fs::write(&path, content).expect("Failed to write term list");
    path
}

#[tokio::test]
async fn test_full_crawl_writes_sorted_results() {
    let mock_server = MockServer::start().await;

    mount_term(&mock_server, "alpha", 120).await;
    mount_term(&mock_server, "beta", 7).await;
    mount_term(&mock_server, "gamma", 3400).await;

    // Service rejects the term: the page does not echo it back
    Mock::given(method("GET"))
        .and(path("/search/rejected"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page("", 0)))
        .mount(&mock_server)
        .await;

    // Echoes the term but carries no count
    Mock::given(method("GET"))
        .and(path("/search/uncounted"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<form><input class="input" value="uncounted"></form>"#,
        ))
        .mount(&mock_server)
        .await;

    // Anything else is a 404
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let terms_path = write_terms(
        dir.path(),
        "alpha\nbeta\nmissing\ngamma\nrejected\nalpha\nuncounted\n",
    );
    let config = create_test_config(&mock_server, 3, 5);

    let mut coordinator =
        Coordinator::new(&config, &terms_path).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl should complete");

    assert_eq!(coordinator.state(), CrawlState::Done);
    assert_eq!(report.term_count, 6);
    assert_eq!(report.resolved_count(), 3);
    assert_eq!(report.failed_count(), 3);
    assert!(report.persisted);
    assert_eq!(report.output_path, dir.path().join("freq.txt"));

    let written = read_frequency_file(&report.output_path).unwrap();
    let head: Vec<(&str, i64)> = written
        .iter()
        .take(3)
        .map(|r| (r.term.as_str(), r.frequency.value()))
        .collect();
    assert_eq!(head, vec![("gamma", 3400), ("alpha", 120), ("beta", 7)]);

    let mut failed: Vec<&str> = written
        .iter()
        .skip(3)
        .inspect(|r| assert_eq!(r.frequency, Frequency::SENTINEL))
        .map(|r| r.term.as_str())
        .collect();
    failed.sort_unstable();
    assert_eq!(failed, vec!["missing", "rejected", "uncounted"]);
}

#[tokio::test]
async fn test_one_request_per_distinct_term() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repeat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page("repeat", 9)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let terms_path = write_terms(dir.path(), "repeat\nrepeat\nrepeat\n");
    let config = create_test_config(&mock_server, 2, 5);

    let mut coordinator = Coordinator::new(&config, &terms_path).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.term_count, 1);
    let content = std::fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(content, "repeat\t9\n");
}

#[tokio::test]
async fn test_slow_response_times_out_to_sentinel() {
    let mock_server = MockServer::start().await;

    mount_term(&mock_server, "fast", 42).await;
    Mock::given(method("GET"))
        .and(path("/search/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(search_page("slow", 99))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let terms_path = write_terms(dir.path(), "slow\nfast\n");
    let config = create_test_config(&mock_server, 2, 1);

    let mut coordinator = Coordinator::new(&config, &terms_path).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(coordinator.state(), CrawlState::Done);
    let content = std::fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(content, "fast\t42\nslow\t-1\n");
}

#[tokio::test]
async fn test_invalid_settings_fall_back_to_defaults() {
    let mock_server = MockServer::start().await;
    mount_term(&mock_server, "only", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let terms_path = write_terms(dir.path(), "only\n");
    let mut config = create_test_config(&mock_server, 8, 5);

    apply_overrides(&mut config, Some("zero"), Some("-3"));
    assert_eq!(config.crawler.concurrency, 1);
    assert_eq!(config.crawler.timeout_secs, 30);

    let mut coordinator = Coordinator::new(&config, &terms_path).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.resolved_count(), 1);
}

#[tokio::test]
async fn test_unreachable_endpoint_records_sentinels() {
    let mut config = Config::default();
    config.crawler.concurrency = 2;
    config.crawler.timeout_secs = 2;
    // Nothing listens on port 1
    config.endpoint.base_url = "http://127.0.0.1:1/search/".to_string();

    let dir = tempfile::tempdir().unwrap();
    let terms_path = write_terms(dir.path(), "a\nb\n");

    let mut coordinator = Coordinator::new(&config, &terms_path).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(coordinator.state(), CrawlState::Done);
    assert_eq!(report.failed_count(), 2);
    let written = read_frequency_file(&report.output_path).unwrap();
    assert!(written.iter().all(|r| r.frequency.is_sentinel()));
}

#[tokio::test]
async fn test_missing_term_list_aborts() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server, 1, 5);

    let mut coordinator = Coordinator::new(&config, dir.path().join("absent.txt")).unwrap();
    let result = coordinator.run().await;

    assert!(matches!(result, Err(SpiderError::SourceUnreadable { .. })));
    assert_eq!(coordinator.state(), CrawlState::Aborted);
    assert!(!dir.path().join("freq.txt").exists());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

/// Resolves every term immediately except `stall`, which never completes
struct StallingFetcher;

impl Fetch for StallingFetcher {
    async fn fetch(&self, term: &Term) -> FetchOutcome {
        if term.as_str() == "stall" {
            std::future::pending::<()>().await;
        }
        FetchOutcome::resolved(term.clone(), Frequency::new(term.as_str().len() as i64))
    }
}

#[tokio::test]
async fn test_completed_results_survive_an_interrupted_run() {
    let dir = tempfile::tempdir().unwrap();
    // One slot admits terms in list order, so completion order is fixed
    let terms_path = write_terms(dir.path(), "one\nthree\nfive\nstall\n");
    let output_path = dir.path().join("freq.txt");

    let mut config = Config::default();
    config.crawler.concurrency = 1;

    let mut coordinator = Coordinator::with_fetcher(&config, &terms_path, StallingFetcher);
    let handle = tokio::spawn(async move { coordinator.run().await });

    let mut lines = Vec::new();
    for _ in 0..100 {
        if let Ok(content) = std::fs::read_to_string(&output_path) {
            lines = content.lines().map(str::to_string).collect();
            if lines.len() == 3 {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    // Simulate the process being killed mid-crawl
    handle.abort();
    let _ = handle.await;

    assert_eq!(lines, vec!["one\t3", "three\t5", "five\t4"]);
}
