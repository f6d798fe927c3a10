//! Request execution and retry.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    abort::AttemptSignal, ApiError, ArenaError, Body, CancelReason, ClientConfig, HttpRequest,
    HttpResponse, Query, RequestDescriptor, ResponseMode, Result,
};

const APPLICATION_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// The user agent header is left to the browser on wasm32 targets.
const ATTACH_USER_AGENT: bool = !cfg!(target_arch = "wasm32");

/// Decoded success payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// `204`, `void` mode, or an empty non-JSON body.
    Empty,
    Json(JsonValue),
    Text(String),
}

impl Payload {
    /// Deserializes the payload; `Empty` reads as `null` and `Text` as a JSON string.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        let value = match self {
            Self::Empty => JsonValue::Null,
            Self::Json(value) => value,
            Self::Text(text) => JsonValue::String(text),
        };
        serde_json::from_value(value)
            .map_err(|err| ArenaError::Decode(format!("unexpected response shape: {err}")))
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(JsonValue::String(text)) => Some(text),
            Self::Json(value) => Some(value.to_string()),
            Self::Empty => None,
        }
    }
}

/// Executes [`RequestDescriptor`]s against the configured transport.
///
/// Clones share the configuration and the token; [`HttpClient::with_token`]
/// derives a client with its own token.
#[derive(Clone, Debug)]
pub struct HttpClient {
    config: Arc<ClientConfig>,
    authorization: Arc<RwLock<Option<HeaderValue>>>,
}

impl HttpClient {
    pub fn new(config: ClientConfig, token: Option<&str>) -> Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            authorization: Arc::new(RwLock::new(bearer_header(token)?)),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replaces the token for every clone of this client.
    ///
    /// Requests already in flight keep the header they were built with.
    pub fn set_token(&self, token: Option<&str>) -> Result<()> {
        let header = bearer_header(token)?;
        *self
            .authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = header;
        Ok(())
    }

    /// New client with `token`, sharing all other configuration.
    pub fn with_token(&self, token: Option<&str>) -> Result<Self> {
        Ok(Self {
            config: Arc::clone(&self.config),
            authorization: Arc::new(RwLock::new(bearer_header(token)?)),
        })
    }

    pub fn has_token(&self) -> bool {
        self.authorization().is_some()
    }

    fn authorization(&self) -> Option<HeaderValue> {
        self.authorization
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Executes the request, retrying per the configured policy.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<Payload> {
        let mut attempt = 0u32;
        loop {
            let err = match self.execute_once(descriptor, attempt).await {
                Ok(payload) => return Ok(payload),
                Err(err) => err,
            };

            if !self.can_retry(&err, attempt, descriptor.signal.as_ref()) {
                return Err(err);
            }

            let delay = self.config.retry.delay_for(attempt);
            warn!(
                method = %descriptor.method,
                path = %descriptor.path,
                retry = attempt + 1,
                max_retries = self.config.retry.retries,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "retrying request"
            );
            self.wait_before_retry(delay, descriptor.signal.as_ref())
                .await?;
            attempt += 1;
        }
    }

    /// Executes and deserializes the payload into `T`.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T> {
        self.execute(descriptor).await?.into_json()
    }

    /// Executes and discards the payload.
    pub async fn execute_void(&self, descriptor: &RequestDescriptor) -> Result<()> {
        self.execute(descriptor).await.map(drop)
    }

    /// Performs exactly one attempt.
    async fn execute_once(&self, descriptor: &RequestDescriptor, attempt: u32) -> Result<Payload> {
        let mut request = self.build_request(descriptor)?;
        debug!(method = %request.method, url = %request.url, attempt, "sending request");

        let transport = &self.config.transport;
        let response = match AttemptSignal::compose(descriptor.signal.as_ref(), self.config.timeout)
        {
            Some(signal) => {
                request.signal = Some(signal.token());
                signal.guard(transport.send(request)).await?
            }
            None => transport
                .send(request)
                .await
                .map_err(ArenaError::Transport)?,
        };

        debug!(status = response.status.as_u16(), "received response");
        if !response.status.is_success() {
            return Err(ApiError::from_response(&response).into());
        }

        decode_payload(descriptor.response_mode, &response)
    }

    /// Builds the transport request. Deterministic for a given descriptor and token.
    pub(crate) fn build_request(&self, descriptor: &RequestDescriptor) -> Result<HttpRequest> {
        let base_url = descriptor
            .base_url
            .as_deref()
            .unwrap_or(&self.config.base_url);

        Ok(HttpRequest {
            method: descriptor.method.clone(),
            url: build_url(base_url, &descriptor.path, &descriptor.query),
            headers: self.build_headers(descriptor),
            body: build_body(descriptor)?,
            signal: None,
        })
    }

    fn build_headers(&self, descriptor: &RequestDescriptor) -> HeaderMap {
        let mut headers = descriptor.headers.clone();

        if !headers.contains_key(header::ACCEPT) {
            headers.insert(header::ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        }

        if !headers.contains_key(header::CONTENT_TYPE) {
            let content_type = match (&descriptor.form, &descriptor.body) {
                (Some(_), _) | (None, Some(Body::UrlEncoded(_))) => Some(FORM_URLENCODED),
                (None, Some(_)) => Some(APPLICATION_JSON),
                (None, None) => None,
            };
            if let Some(content_type) = content_type {
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
        }

        if descriptor.auth && !headers.contains_key(header::AUTHORIZATION) {
            if let Some(authorization) = self.authorization() {
                headers.insert(header::AUTHORIZATION, authorization);
            }
        }

        if ATTACH_USER_AGENT && !headers.contains_key(header::USER_AGENT) {
            if let Some(user_agent) = &self.config.user_agent {
                headers.insert(header::USER_AGENT, user_agent.clone());
            }
        }

        headers
    }

    fn can_retry(
        &self,
        err: &ArenaError,
        attempt: u32,
        signal: Option<&CancellationToken>,
    ) -> bool {
        if signal.is_some_and(CancellationToken::is_cancelled) {
            return false;
        }
        if attempt >= self.config.retry.retries {
            return false;
        }
        match err {
            ArenaError::Api(api) => self.config.retry.is_retryable_status(api.status),
            ArenaError::Transport(_) | ArenaError::Decode(_) => true,
            ArenaError::Cancelled(_) | ArenaError::Config(_) | ArenaError::Encode(_) => false,
        }
    }

    /// Sleeps before the next attempt; a fired token ends the sequence.
    async fn wait_before_retry(
        &self,
        delay: Duration,
        signal: Option<&CancellationToken>,
    ) -> Result<()> {
        let Some(signal) = signal else {
            tokio::time::sleep(delay).await;
            return Ok(());
        };

        tokio::select! {
            biased;
            () = signal.cancelled() => {
                debug!("cancelled while waiting to retry");
                Err(ArenaError::Cancelled(CancelReason::Caller))
            }
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

fn bearer_header(token: Option<&str>) -> Result<Option<HeaderValue>> {
    let Some(token) = token.filter(|token| !token.is_empty()) else {
        return Ok(None);
    };
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| ArenaError::Config("token is not a valid header value".to_owned()))?;
    value.set_sensitive(true);
    Ok(Some(value))
}

/// `base` + `/path` + `?query`; exactly one `/` joins base and path.
fn build_url(base_url: &str, path: &str, query: &Query) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let path = path.trim_start_matches('/');
    let query = query.encode();
    if query.is_empty() {
        format!("{base}/{path}")
    } else {
        format!("{base}/{path}?{query}")
    }
}

fn build_body(descriptor: &RequestDescriptor) -> Result<Option<Bytes>> {
    if let Some(form) = &descriptor.form {
        return Ok(Some(Bytes::from(form.encode())));
    }

    let body = match &descriptor.body {
        None => return Ok(None),
        Some(Body::Json(value)) => serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|err| ArenaError::Encode(format!("invalid JSON body: {err}")))?,
        Some(Body::Text(text) | Body::UrlEncoded(text)) => Bytes::from(text.clone()),
        Some(Body::Bytes(bytes)) => bytes.clone(),
    };
    Ok(Some(body))
}

fn decode_payload(mode: ResponseMode, response: &HttpResponse) -> Result<Payload> {
    if mode == ResponseMode::Void || response.status == StatusCode::NO_CONTENT {
        return Ok(Payload::Empty);
    }

    if mode == ResponseMode::Text {
        return Ok(Payload::Text(response.text()));
    }

    if response.is_json() {
        return serde_json::from_slice(&response.body)
            .map(Payload::Json)
            .map_err(|err| ArenaError::Decode(format!("invalid JSON response: {err}")));
    }

    let text = response.text();
    if text.is_empty() {
        return Ok(Payload::Empty);
    }
    match serde_json::from_str::<JsonValue>(&text) {
        Ok(value) => Ok(Payload::Json(value)),
        Err(_) => Ok(Payload::Text(text)),
    }
}
