//! End-to-end fetcher and pipeline tests against a local HTTP stub.
//!
//! The stub is a `tiny_http` server on `127.0.0.1:0`. Each request is answered
//! on its own thread so a slow route never holds up the others.

use std::collections::BTreeMap;
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use settle_core::{
    AggregateRecord, Category, CategoryError, FailureReason, HttpStatus, MemoryReporter, Predicate,
    Warning,
};
use settle_fetch::{
    FetcherOptions, HttpFetcher, PipelineError, PipelineSpec, collect, run_pipeline,
};

#[derive(Debug, Clone)]
struct SeenRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl SeenRequest {
    fn read(request: &mut tiny_http::Request) -> Self {
        let mut body = String::new();
        let _ = request.as_reader().read_to_string(&mut body);
        Self {
            method: request.method().to_string(),
            path: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|header| {
                    (
                        header.field.to_string().to_ascii_lowercase(),
                        header.value.to_string(),
                    )
                })
                .collect(),
            body,
        }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

struct Stub {
    server: Arc<tiny_http::Server>,
    port: u16,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl Stub {
    fn start() -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("stub should bind"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("stub should listen on an IP address");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (listener, log) = (Arc::clone(&server), Arc::clone(&seen));
        std::thread::spawn(move || {
            while let Ok(request) = listener.recv() {
                let log = Arc::clone(&log);
                std::thread::spawn(move || respond(request, &log));
            }
        });

        Self { server, port, seen }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }

    fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Drop for Stub {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

fn respond(mut request: tiny_http::Request, seen: &Mutex<Vec<SeenRequest>>) {
    let seen_request = SeenRequest::read(&mut request);
    let (status, body, delay_ms) = route(&seen_request);
    seen.lock().unwrap().push(seen_request);
    if delay_ms > 0 {
        std::thread::sleep(Duration::from_millis(delay_ms));
    }

    let content_type =
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
    let response = tiny_http::Response::from_string(body)
        .with_status_code(status)
        .with_header(content_type);
    let _ = request.respond(response);
}

fn route(request: &SeenRequest) -> (u16, String, u64) {
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/users") => (
            200,
            json!([
                { "id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz" },
                { "id": 2, "name": "Ervin Howell", "email": "Shanna@melissa.tv" }
            ])
            .to_string(),
            0,
        ),
        ("GET", "/todos") => (
            200,
            json!([
                { "userId": 1, "id": 1, "completed": true },
                { "userId": 1, "id": 2, "completed": false },
                { "userId": 2, "id": 3, "completed": true },
                { "userId": "2", "id": 4, "completed": false },
                { "userId": 3, "id": 5, "completed": true }
            ])
            .to_string(),
            0,
        ),
        ("GET", "/slow") => (200, "[]".to_string(), 2_000),
        ("GET", "/broken") => (500, "{}".to_string(), 0),
        ("GET", "/garbage") => (200, "[{\"id\": 1,".to_string(), 0),
        ("GET", "/object") => (200, "{\"id\": 1}".to_string(), 0),
        ("POST", "/posts") => {
            let mut created: Map<String, Value> =
                serde_json::from_str(&request.body).unwrap_or_default();
            created.insert("id".into(), json!(101));
            (201, Value::Object(created).to_string(), 0)
        }
        ("POST", "/reject") => (422, "{}".to_string(), 0),
        _ => (404, "{}".to_string(), 0),
    }
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&FetcherOptions::default()).unwrap()
}

/// An address nothing listens on.
fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/users")
}

fn completion_spec(stub: &Stub, primary: &str, secondary: &str) -> PipelineSpec {
    PipelineSpec {
        primary_url: stub.url(primary),
        secondary_url: stub.url(secondary),
        foreign_key: "userId".into(),
        categories: vec![
            Category::new("completed", Predicate::equals("completed", true)),
            Category::new("pending", Predicate::equals("completed", false)),
        ],
        fail_fast: false,
    }
}

fn counts(completed: u64, pending: u64) -> BTreeMap<String, u64> {
    BTreeMap::from([
        ("completed".to_string(), completed),
        ("pending".to_string(), pending),
    ])
}

// ---------------------------------------------------------------------------
// Fetcher classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_success_returns_array_elements() {
    let stub = Stub::start();
    let outcome = fetcher().get_collection(&stub.url("/users")).await;
    assert_eq!(outcome.len(), 2);
    assert_eq!(outcome.payload_or_empty()[0]["name"], "Leanne Graham");
}

#[tokio::test]
async fn non_2xx_is_http_error_with_status() {
    let stub = Stub::start();
    let broken = fetcher().get_collection(&stub.url("/broken")).await;
    assert_eq!(
        broken.reason(),
        Some(&FailureReason::Http(HttpStatus::Code(500)))
    );

    let missing = fetcher().get_collection(&stub.url("/nope")).await;
    assert_eq!(
        missing.reason(),
        Some(&FailureReason::Http(HttpStatus::Code(404)))
    );
}

#[tokio::test]
async fn malformed_or_misshapen_body_is_invalid() {
    let stub = Stub::start();
    for path in ["/garbage", "/object"] {
        let outcome = fetcher().get_collection(&stub.url(path)).await;
        assert_eq!(
            outcome.reason(),
            Some(&FailureReason::Http(HttpStatus::Invalid)),
            "{path}"
        );
    }
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let outcome = fetcher().get_collection(&refused_url()).await;
    assert!(matches!(outcome.reason(), Some(FailureReason::Network(_))));
}

#[tokio::test]
async fn timeout_is_network_error() {
    let stub = Stub::start();
    let fetcher = HttpFetcher::new(&FetcherOptions {
        timeout: Some(Duration::from_millis(200)),
        ..FetcherOptions::default()
    })
    .unwrap();

    let outcome = fetcher.get_collection(&stub.url("/slow")).await;
    assert!(
        matches!(outcome.reason(), Some(FailureReason::Network(msg)) if msg.starts_with("timed out")),
        "{outcome:?}"
    );
}

#[tokio::test]
async fn post_sends_json_and_returns_created_object() {
    let stub = Stub::start();
    let mut body = Map::new();
    body.insert("title".into(), json!("QA Automation project"));
    body.insert("body".into(), json!("Testing API integration with fetch()"));
    body.insert("userId".into(), json!(1));

    let outcome = fetcher().post(&stub.url("/posts"), &body).await;
    let created = &outcome.payload_or_empty()[0];
    assert_eq!(created["id"], 101);
    assert_eq!(created["title"], "QA Automation project");

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
    let sent: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent["userId"], 1);
}

#[tokio::test]
async fn rejected_post_is_http_error() {
    let stub = Stub::start();
    let outcome = fetcher().post(&stub.url("/reject"), &Map::new()).await;
    assert_eq!(
        outcome.reason(),
        Some(&FailureReason::Http(HttpStatus::Code(422)))
    );
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collector_returns_one_outcome_per_endpoint_in_order() {
    let stub = Stub::start();
    let endpoints = vec![
        stub.url("/broken"),
        stub.url("/users"),
        refused_url(),
        stub.url("/todos"),
        stub.url("/garbage"),
    ];
    let mut reporter = MemoryReporter::default();

    let outcomes = collect(&fetcher(), &endpoints, &mut reporter).await;

    assert_eq!(outcomes.len(), endpoints.len());
    assert_eq!(
        outcomes.iter().map(|o| o.is_success()).collect::<Vec<_>>(),
        vec![false, true, false, true, false]
    );
    let warned: Vec<_> = reporter
        .warnings
        .iter()
        .filter_map(|w| match w {
            Warning::FetchFailed { endpoint, .. } => Some(endpoint.clone()),
            Warning::Quarantined { .. } => None,
        })
        .collect();
    assert_eq!(
        warned,
        vec![
            endpoints[0].clone(),
            endpoints[2].clone(),
            endpoints[4].clone()
        ]
    );
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pipeline_joins_and_quarantines() {
    let stub = Stub::start();
    let spec = completion_spec(&stub, "/users", "/todos");
    let mut reporter = MemoryReporter::default();

    let records = run_pipeline(&fetcher(), &spec, &mut reporter).await.unwrap();

    assert_eq!(
        records,
        vec![
            AggregateRecord {
                owner_name: "Leanne Graham".into(),
                counts_by_category: counts(1, 1),
            },
            AggregateRecord {
                owner_name: "Ervin Howell".into(),
                counts_by_category: counts(1, 0),
            },
        ]
    );
    assert_eq!(reporter.records, records);
    assert!(matches!(
        reporter.warnings.as_slice(),
        [Warning::Quarantined { rejected: 1, .. }]
    ));
}

#[tokio::test]
async fn pipeline_degrades_when_secondary_fails() {
    let stub = Stub::start();
    let spec = completion_spec(&stub, "/users", "/broken");
    let mut reporter = MemoryReporter::default();

    let records = run_pipeline(&fetcher(), &spec, &mut reporter).await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.counts_by_category == counts(0, 0)));
    assert!(matches!(
        reporter.warnings.as_slice(),
        [Warning::FetchFailed {
            reason: FailureReason::Http(HttpStatus::Code(500)),
            ..
        }]
    ));
}

#[tokio::test]
async fn pipeline_is_empty_when_primary_fails() {
    let stub = Stub::start();
    let spec = completion_spec(&stub, "/garbage", "/todos");
    let mut reporter = MemoryReporter::default();

    let records = run_pipeline(&fetcher(), &spec, &mut reporter).await.unwrap();
    assert!(records.is_empty());
    assert_eq!(reporter.warnings.len(), 2);
}

#[tokio::test]
async fn fail_fast_turns_failure_into_error() {
    let stub = Stub::start();
    let spec = PipelineSpec {
        fail_fast: true,
        ..completion_spec(&stub, "/users", "/broken")
    };
    let mut reporter = MemoryReporter::default();

    let err = run_pipeline(&fetcher(), &spec, &mut reporter)
        .await
        .unwrap_err();
    match err {
        PipelineError::Strict(strict) => {
            assert_eq!(strict.endpoint, stub.url("/broken"));
            assert_eq!(strict.reason, FailureReason::Http(HttpStatus::Code(500)));
        }
        other => panic!("expected strict error, got {other:?}"),
    }
    assert!(reporter.records.is_empty());
}

#[tokio::test]
async fn invalid_categories_abort_before_any_request() {
    let stub = Stub::start();
    let spec = PipelineSpec {
        categories: vec![],
        ..completion_spec(&stub, "/users", "/todos")
    };
    let mut reporter = MemoryReporter::default();

    let err = run_pipeline(&fetcher(), &spec, &mut reporter)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Category(CategoryError::Empty)));
    assert!(stub.requests().is_empty());
}
