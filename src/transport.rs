//! Pluggable HTTP transport.
//!
//! The client never opens connections itself: every attempt goes through a
//! [`Transport`]. The default implementation wraps `reqwest` and is enabled
//! with the `reqwest-transport` feature; tests and alternate runtimes inject
//! their own, either as a type implementing the trait or as a closure.

use std::future::Future;

use async_trait::async_trait;
use bytes::Bytes;
use http::{header, HeaderMap, Method, StatusCode};
use tokio_util::sync::CancellationToken;

use crate::BoxError;

/// One outbound request as handed to a [`Transport`].
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    /// Fully-qualified URL including the query string.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    /// Effective cancellation signal for this attempt.
    ///
    /// The client already stops waiting when it fires; transports may watch it
    /// to release resources early.
    pub signal: Option<CancellationToken>,
}

/// A fully buffered response returned by a [`Transport`].
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the response declares a JSON content type.
    pub fn is_json(&self) -> bool {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"))
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes a single HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

#[async_trait]
impl<F, Fut> Transport for F
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, BoxError>> + Send + 'static,
{
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (self)(request).await
    }
}

#[cfg(feature = "reqwest-transport")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest-transport")]
mod reqwest_transport {
    use async_trait::async_trait;

    use super::{HttpRequest, HttpResponse, Transport};
    use crate::BoxError;

    /// [`Transport`] backed by a `reqwest::Client`.
    ///
    /// Timeouts are enforced by the caller, so the inner client needs none.
    #[derive(Clone, Debug, Default)]
    pub struct ReqwestTransport {
        http: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Wraps a preconfigured client (proxies, TLS roots, pools).
        pub fn with_client(http: reqwest::Client) -> Self {
            Self { http }
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
            let mut builder = self
                .http
                .request(request.method, &request.url)
                .headers(request.headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
