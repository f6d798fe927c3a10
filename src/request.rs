use std::fmt;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{ArenaError, Query, Result};

/// Expected decoding of a success response.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ResponseMode {
    /// Decode by content type, falling back to lenient text/JSON sniffing.
    #[default]
    Json,
    /// Return the raw body text.
    Text,
    /// Discard the body.
    Void,
}

/// Request body that is not a form mapping.
///
/// Every variant except `UrlEncoded` defaults `Content-Type` to
/// `application/json`; set the header explicitly for other media types.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// Serialized as JSON text.
    Json(serde_json::Value),
    /// Sent verbatim.
    Text(String),
    /// Sent verbatim.
    Bytes(Bytes),
    /// Pre-encoded `application/x-www-form-urlencoded` payload, sent verbatim.
    UrlEncoded(String),
}

impl Body {
    /// Serializes a typed value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|err| ArenaError::Encode(format!("invalid JSON body: {err}")))
    }
}

/// Bytes escaped in a URI component: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `value` as a single URI component, so `/` is escaped too.
pub(crate) fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Identifier used in a path segment: a numeric id or a slug.
///
/// Serializes untagged, as a JSON number or string.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Slug(String),
}

impl ResourceId {
    /// Percent-encoded form, safe to use as one path segment.
    pub fn to_path_segment(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Slug(value) => encode_component(value),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Slug(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ResourceId {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::Slug(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::Slug(value.to_owned())
    }
}

impl From<&ResourceId> for ResourceId {
    fn from(value: &ResourceId) -> Self {
        value.clone()
    }
}

/// Per-call options accepted by every resource method.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub signal: Option<CancellationToken>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Immutable description of one API call.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Query,
    pub(crate) body: Option<Body>,
    pub(crate) form: Option<Query>,
    pub(crate) headers: HeaderMap,
    pub(crate) base_url: Option<String>,
    pub(crate) signal: Option<CancellationToken>,
    pub(crate) auth: bool,
    pub(crate) response_mode: ResponseMode,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: None,
            form: None,
            headers: HeaderMap::new(),
            base_url: None,
            signal: None,
            auth: true,
            response_mode: ResponseMode::default(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Form mapping sent as `application/x-www-form-urlencoded`.
    ///
    /// Takes precedence over [`RequestDescriptor::body`].
    pub fn form(mut self, form: Query) -> Self {
        self.form = Some(form);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Overrides the client's base URL for this call.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Skips the bearer token for this call.
    pub fn without_auth(mut self) -> Self {
        self.auth = false;
        self
    }

    pub fn response_mode(mut self, mode: ResponseMode) -> Self {
        self.response_mode = mode;
        self
    }

    /// Applies per-call options; their headers replace same-named ones.
    pub fn options(mut self, options: &RequestOptions) -> Self {
        self.headers.extend(options.headers.clone());
        if let Some(signal) = &options.signal {
            self.signal = Some(signal.clone());
        }
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
