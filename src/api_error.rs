//! Normalization of non-success responses into [`ApiError`].

use http::HeaderMap;
use serde_json::{Number, Value as JsonValue};

use crate::HttpResponse;

const HEADER_RATE_LIMIT: &str = "x-ratelimit-limit";
const HEADER_RATE_LIMIT_TIER: &str = "x-ratelimit-tier";
const HEADER_RATE_LIMIT_WINDOW: &str = "x-ratelimit-window";
const HEADER_RATE_LIMIT_RESET: &str = "x-ratelimit-reset";
const HEADER_RETRY_AFTER: &str = "retry-after";
const HEADER_REQUEST_ID: &str = "x-request-id";

/// Rate limit tier reported by the `X-RateLimit-Tier` header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RateLimitTier {
    Guest,
    Free,
    Premium,
    Supporter,
    /// A tier name this crate does not know yet.
    Other(String),
}

impl RateLimitTier {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Guest => "guest",
            Self::Free => "free",
            Self::Premium => "premium",
            Self::Supporter => "supporter",
            Self::Other(value) => value,
        }
    }

    fn parse(value: &str) -> Self {
        match value {
            "guest" => Self::Guest,
            "free" => Self::Free,
            "premium" => Self::Premium,
            "supporter" => Self::Supporter,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Rate limit metadata parsed from response headers.
///
/// Only constructed when at least one field is present.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RateLimit {
    pub limit: Option<i64>,
    pub tier: Option<RateLimitTier>,
    pub window_seconds: Option<i64>,
    pub reset_unix: Option<i64>,
    pub retry_after_seconds: Option<i64>,
}

impl RateLimit {
    /// Extracts rate limit headers; returns `None` when none of them is usable.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let rate_limit = Self {
            limit: integer_header(headers, HEADER_RATE_LIMIT),
            tier: header_str(headers, HEADER_RATE_LIMIT_TIER).map(RateLimitTier::parse),
            window_seconds: integer_header(headers, HEADER_RATE_LIMIT_WINDOW),
            reset_unix: integer_header(headers, HEADER_RATE_LIMIT_RESET),
            retry_after_seconds: integer_header(headers, HEADER_RETRY_AFTER),
        };

        (rate_limit != Self::default()).then_some(rate_limit)
    }
}

/// Structured error for a completed HTTP exchange with a non-2xx status.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Application-level error code from the body, any JSON number.
    pub code: Option<Number>,
    /// `details` field from the body, passed through verbatim.
    pub details: Option<JsonValue>,
    pub rate_limit: Option<RateLimit>,
    /// Value of the `X-Request-Id` response header.
    pub request_id: Option<String>,
    /// Parsed response body, kept for diagnostics.
    pub raw: Option<JsonValue>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
            code: None,
            details: None,
            rate_limit: None,
            request_id: None,
            raw: None,
        }
    }

    /// Builds the error for a non-success response.
    ///
    /// Never fails: a body that cannot be parsed only leaves `raw` empty.
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status.as_u16();
        let mut error = Self::new(format!("Request failed with status {status}"), status);
        error.request_id = header_str(&response.headers, HEADER_REQUEST_ID).map(str::to_owned);
        error.rate_limit = RateLimit::from_headers(&response.headers);

        error.raw = if response.is_json() {
            serde_json::from_slice::<JsonValue>(&response.body).ok()
        } else {
            Some(JsonValue::String(response.text()))
        };

        match &error.raw {
            Some(JsonValue::Object(body)) => {
                if let Some(JsonValue::String(message)) = body.get("error") {
                    error.message.clone_from(message);
                }
                error.code = match body.get("code") {
                    Some(JsonValue::Number(code)) => Some(code.clone()),
                    _ => None,
                };
                error.details = body.get("details").cloned();
            }
            Some(JsonValue::String(text)) if !text.is_empty() => {
                error.message.clone_from(text);
            }
            _ => {}
        }

        error
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn integer_header(headers: &HeaderMap, name: &str) -> Option<i64> {
    header_str(headers, name).and_then(parse_leading_integer)
}

/// Parses the leading decimal integer of `value`, ignoring trailing garbage
/// (`"30abc"` → 30, `" 10"` → 10, `"abc"` → none).
fn parse_leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|number| sign * number)
}
