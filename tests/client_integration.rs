//! End-to-end tests through the default `reqwest` transport against a local
//! axum server.
#![cfg(feature = "reqwest-transport")]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use arena_http::v3::ExchangeTokenInput;
use arena_http::{ArenaClient, ArenaError, ClientOptions, RateLimitTier, RetryOptions};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{json, Value as JsonValue};

#[derive(Clone)]
struct MockResponse {
    status: StatusCode,
    body: String,
    content_type: Option<&'static str>,
    headers: Vec<(&'static str, &'static str)>,
    delay: Duration,
}

impl MockResponse {
    fn json(status: StatusCode, body: JsonValue) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: Some("application/json"),
            headers: Vec::new(),
            delay: Duration::from_millis(0),
        }
    }

    fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
            content_type: None,
            headers: Vec::new(),
            delay: Duration::from_millis(0),
        }
    }

    fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Debug)]
struct Recorded {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
}

#[derive(Clone)]
struct MockState {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    recorded: Arc<Mutex<Vec<Recorded>>>,
    hits: Arc<AtomicUsize>,
}

async fn api_handler(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state
        .recorded
        .lock()
        .expect("request log mutex must not be poisoned")
        .push(Recorded {
            method,
            uri,
            headers,
            body,
        });

    let response = {
        let mut queue = state
            .responses
            .lock()
            .expect("response queue mutex must not be poisoned");
        queue.pop_front().unwrap_or_else(|| {
            MockResponse::json(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "no mock response available"}),
            )
        })
    };

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    let mut headers = HeaderMap::new();
    if let Some(content_type) = response.content_type {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    for (name, value) in response.headers {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    (response.status, headers, response.body).into_response()
}

struct TestServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
    recorded: Arc<Mutex<Vec<Recorded>>>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TestServer {
    fn client(&self, retry: RetryOptions) -> ArenaClient {
        ArenaClient::new(
            ClientOptions::new()
                .token("integration-token")
                .base_url(&self.base_url)
                .retry(retry),
        )
        .expect("client must build with the default transport")
    }

    fn last(&self) -> Recorded {
        self.recorded
            .lock()
            .expect("request log mutex must not be poisoned")
            .last()
            .cloned()
            .expect("server must have received a request")
    }
}

async fn spawn_server(responses: Vec<MockResponse>) -> TestServer {
    let state = MockState {
        responses: Arc::new(Mutex::new(responses.into())),
        recorded: Arc::new(Mutex::new(Vec::new())),
        hits: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .fallback(api_handler)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        hits: state.hits,
        recorded: state.recorded,
        task,
    }
}

fn quick_retries(retries: u32) -> RetryOptions {
    RetryOptions {
        retries: Some(retries),
        base_delay_ms: Some(10),
        max_delay_ms: Some(50),
        retry_on: None,
    }
}

#[tokio::test]
async fn fetches_a_block_with_bearer_auth() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"id": 42, "type": "Text", "content": "hello"}),
    )])
    .await;
    let arena = server.client(RetryOptions::default());

    let block = arena.v3().blocks().get(42).await.expect("block must load");
    assert_eq!(block["content"], "hello");

    let request = server.last();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.uri.path(), "/v3/blocks/42");
    assert_eq!(request.headers[header::AUTHORIZATION], "Bearer integration-token");
    assert_eq!(request.headers[header::ACCEPT], "application/json");
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retries_on_retryable_http_status() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})),
        MockResponse::json(StatusCode::OK, json!({"status": "ok"})),
    ])
    .await;
    let arena = server.client(quick_retries(1));

    let pong = arena.v3().system().ping().await.expect("retry must succeed");
    assert_eq!(pong["status"], "ok");
    assert_eq!(server.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn timeout_is_reported_as_cancellation() {
    let server = spawn_server(vec![MockResponse::json(StatusCode::OK, json!({}))
        .with_delay(Duration::from_secs(2))])
    .await;
    let arena = ArenaClient::new(
        ClientOptions::new()
            .base_url(&server.base_url)
            .timeout_ms(100)
            .retry(quick_retries(2)),
    )
    .expect("client must build");

    let err = arena.v3().system().ping().await.expect_err("must time out");
    assert!(err.is_timeout(), "unexpected error: {err:?}");
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rate_limit_headers_survive_the_wire() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": "Slow down", "code": 42}),
    )
    .with_header("x-ratelimit-limit", "30")
    .with_header("x-ratelimit-tier", "guest")
    .with_header("x-ratelimit-window", "60")
    .with_header("retry-after", "10")])
    .await;
    let arena = server.client(RetryOptions::default());

    let err = arena.v3().system().ping().await.expect_err("rate limited");
    let ArenaError::Api(api) = &err else {
        panic!("expected an API error, got {err:?}");
    };
    assert_eq!(api.status, 429);
    assert_eq!(api.message, "Slow down");
    assert_eq!(api.code, Some(42.into()));
    let rate_limit = api.rate_limit.as_ref().expect("rate limit present");
    assert_eq!(rate_limit.limit, Some(30));
    assert_eq!(rate_limit.tier, Some(RateLimitTier::Guest));
    assert_eq!(rate_limit.window_seconds, Some(60));
    assert_eq!(rate_limit.retry_after_seconds, Some(10));
}

#[tokio::test]
async fn token_exchange_sends_a_form() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({
            "access_token": "fresh",
            "token_type": "Bearer",
            "scope": "write",
            "created_at": 1
        }),
    )])
    .await;
    let arena = server.client(RetryOptions::default());

    let token = arena
        .v3()
        .auth()
        .exchange_token(&ExchangeTokenInput::client_credentials("app", "s3cret"))
        .await
        .expect("token exchange must succeed");
    assert_eq!(token.access_token, "fresh");

    let request = server.last();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.uri.path(), "/v3/oauth/token");
    assert_eq!(
        request.headers[header::CONTENT_TYPE],
        "application/x-www-form-urlencoded"
    );
    assert!(request.headers.get(header::AUTHORIZATION).is_none());
    assert_eq!(
        request.body,
        "grant_type=client_credentials&client_id=app&client_secret=s3cret"
    );
}

#[tokio::test]
async fn delete_with_no_content() {
    let server = spawn_server(vec![MockResponse::empty(StatusCode::NO_CONTENT)]).await;
    let arena = server.client(RetryOptions::default());

    arena
        .v3()
        .channels()
        .remove("old-channel")
        .await
        .expect("delete must succeed");

    let request = server.last();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.uri.path(), "/v3/channels/old-channel");
}

#[tokio::test]
async fn search_query_is_encoded() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"data": [], "meta": {"current_page": 1, "has_more_pages": false}}),
    )])
    .await;
    let arena = server.client(RetryOptions::default());

    let search = arena_http::v3::SearchQuery {
        types: vec![
            arena_http::v3::SearchTypeFilter::Channel,
            arena_http::v3::SearchTypeFilter::User,
        ],
        ..arena_http::v3::SearchQuery::new("concrete poetry")
    };
    let page = arena.v3().search().query(&search).await.expect("search");
    assert!(!page.meta.has_more_pages);

    let request = server.last();
    assert_eq!(request.uri.path(), "/v3/search");
    assert_eq!(
        request.uri.query(),
        Some("query=concrete+poetry&type=Channel%2CUser")
    );
}
