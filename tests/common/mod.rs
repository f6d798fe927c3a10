#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use arena_http::{BoxError, HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value as JsonValue};
use tokio::time::Instant;

pub enum MockReply {
    Response(HttpResponse),
    /// Fails the exchange with a transport error.
    Error(&'static str),
    /// Never completes; only cancellation ends the attempt.
    Hang,
}

impl From<HttpResponse> for MockReply {
    fn from(response: HttpResponse) -> Self {
        Self::Response(response)
    }
}

#[derive(Default)]
struct MockState {
    replies: Mutex<VecDeque<MockReply>>,
    fallback: Mutex<Option<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
    calls: Mutex<Vec<Instant>>,
}

/// Transport replaying queued replies and recording every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<MockState>,
}

impl MockTransport {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        let transport = Self::default();
        transport
            .state
            .replies
            .lock()
            .expect("reply queue mutex must not be poisoned")
            .extend(replies);
        transport
    }

    /// Reply used once the queue is empty.
    pub fn with_fallback(self, response: HttpResponse) -> Self {
        *self
            .state
            .fallback
            .lock()
            .expect("fallback mutex must not be poisoned") = Some(response);
        self
    }

    pub fn push(&self, reply: impl Into<MockReply>) {
        self.state
            .replies
            .lock()
            .expect("reply queue mutex must not be poisoned")
            .push_back(reply.into());
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state
            .requests
            .lock()
            .expect("request log mutex must not be poisoned")
            .clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests()
            .pop()
            .expect("at least one request must have been sent")
    }

    pub fn hits(&self) -> usize {
        self.requests().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.state
            .calls
            .lock()
            .expect("call log mutex must not be poisoned")
            .clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        self.state
            .calls
            .lock()
            .expect("call log mutex must not be poisoned")
            .push(Instant::now());
        self.state
            .requests
            .lock()
            .expect("request log mutex must not be poisoned")
            .push(request);

        let reply = self
            .state
            .replies
            .lock()
            .expect("reply queue mutex must not be poisoned")
            .pop_front();
        let reply = match reply {
            Some(reply) => reply,
            None => self
                .state
                .fallback
                .lock()
                .expect("fallback mutex must not be poisoned")
                .clone()
                .map(MockReply::Response)
                .unwrap_or_else(|| {
                    MockReply::Response(json_response(
                        500,
                        json!({"error": "no mock response available"}),
                    ))
                }),
        };

        match reply {
            MockReply::Response(response) => Ok(response),
            MockReply::Error(message) => Err(message.into()),
            MockReply::Hang => std::future::pending().await,
        }
    }
}

pub fn json_response(status: u16, body: JsonValue) -> HttpResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    HttpResponse {
        status: StatusCode::from_u16(status).expect("valid status"),
        headers,
        body: Bytes::from(body.to_string()),
    }
}

pub fn text_response(status: u16, content_type: Option<&'static str>, body: &str) -> HttpResponse {
    let mut headers = HeaderMap::new();
    if let Some(content_type) = content_type {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    HttpResponse {
        status: StatusCode::from_u16(status).expect("valid status"),
        headers,
        body: Bytes::from(body.to_owned()),
    }
}

pub fn with_header(mut response: HttpResponse, name: &'static str, value: &'static str) -> HttpResponse {
    response.headers.insert(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    );
    response
}

pub fn body_json(request: &HttpRequest) -> JsonValue {
    serde_json::from_slice(request.body.as_deref().expect("request must have a body"))
        .expect("request body must be JSON")
}

pub fn body_text(request: &HttpRequest) -> String {
    String::from_utf8(request.body.as_deref().expect("request must have a body").to_vec())
        .expect("request body must be UTF-8")
}
