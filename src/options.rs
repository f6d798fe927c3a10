use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::HeaderValue;

use crate::{ArenaError, Result, Transport};

pub const DEFAULT_BASE_URL: &str = "https://api.are.na";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRY_ON: [u16; 5] = [429, 500, 502, 503, 504];

/// Retry settings; unset fields fall back to the defaults.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RetryOptions {
    /// Maximum number of retries after the initial attempt (default 0).
    pub retries: Option<u32>,
    /// Base backoff in milliseconds, doubled per retry (default 250).
    pub base_delay_ms: Option<u64>,
    /// Backoff ceiling in milliseconds (default 4000).
    pub max_delay_ms: Option<u64>,
    /// Statuses eligible for retry (default 429, 500, 502, 503, 504).
    pub retry_on: Option<Vec<u16>>,
}

/// Fully-resolved retry policy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub retry_on: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 0,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_millis(4_000),
            retry_on: DEFAULT_RETRY_ON.to_vec(),
        }
    }
}

impl RetryPolicy {
    fn from_options(options: &RetryOptions) -> Self {
        let defaults = Self::default();
        Self {
            retries: options.retries.unwrap_or(defaults.retries),
            base_delay: options
                .base_delay_ms
                .map_or(defaults.base_delay, Duration::from_millis),
            max_delay: options
                .max_delay_ms
                .map_or(defaults.max_delay, Duration::from_millis),
            retry_on: options.retry_on.clone().unwrap_or(defaults.retry_on),
        }
    }

    /// Backoff before retry number `attempt` (0-based): `min(base * 2^attempt, max)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let multiplier = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(multiplier)
            .unwrap_or(Duration::MAX)
            .min(self.max_delay)
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retry_on.contains(&status)
    }
}

/// User-facing client options.
#[derive(Clone, Default)]
pub struct ClientOptions {
    pub token: Option<String>,
    pub base_url: Option<String>,
    /// Base URL for legacy v2 endpoints; defaults to `base_url`.
    pub legacy_base_url: Option<String>,
    /// Per-attempt timeout in milliseconds; `0` disables it (default 30 000).
    pub timeout_ms: Option<u64>,
    /// Sent as `User-Agent` outside browser (wasm32) targets.
    pub user_agent: Option<String>,
    pub transport: Option<Arc<dyn Transport>>,
    pub retry: RetryOptions,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("legacy_base_url", &self.legacy_base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("transport", &self.transport.as_ref().map(|_| "<custom>"))
            .field("retry", &self.retry)
            .finish()
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn legacy_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.legacy_base_url = Some(base_url.into());
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn retry(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    /// Reads options from the environment.
    ///
    /// - `ARENA_TOKEN`: access token (optional)
    /// - `ARENA_BASE_URL`: API host (optional)
    /// - `ARENA_TIMEOUT_MS`: per-attempt timeout in milliseconds (optional)
    pub fn from_env() -> Result<Self> {
        let timeout_ms = non_empty_env("ARENA_TIMEOUT_MS")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| {
                    ArenaError::Config(format!("ARENA_TIMEOUT_MS is not a number: {raw}"))
                })
            })
            .transpose()?;

        Ok(Self {
            token: non_empty_env("ARENA_TOKEN"),
            base_url: non_empty_env("ARENA_BASE_URL"),
            timeout_ms,
            ..Self::default()
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Normalized configuration; every field has a concrete value.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) legacy_base_url: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: Option<HeaderValue>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) retry: RetryPolicy,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("legacy_base_url", &self.legacy_base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Resolves defaults. Fails when no transport is available.
    pub fn from_options(options: &ClientOptions) -> Result<Self> {
        let transport = match &options.transport {
            Some(transport) => Arc::clone(transport),
            None => default_transport()?,
        };

        let base_url = trim_trailing_slash(options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL));
        let legacy_base_url = options
            .legacy_base_url
            .as_deref()
            .map_or_else(|| base_url.clone(), trim_trailing_slash);

        let user_agent = options
            .user_agent
            .as_deref()
            .map(|value| {
                HeaderValue::from_str(value).map_err(|_| {
                    ArenaError::Config(format!("user agent is not a valid header value: {value}"))
                })
            })
            .transpose()?;

        let timeout_ms = options.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);

        Ok(Self {
            base_url,
            legacy_base_url,
            timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            user_agent,
            transport,
            retry: RetryPolicy::from_options(&options.retry),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn legacy_base_url(&self) -> &str {
        &self.legacy_base_url
    }

    /// `None` when the timeout is disabled.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}

fn trim_trailing_slash(value: &str) -> String {
    value.strip_suffix('/').unwrap_or(value).to_owned()
}

#[cfg(feature = "reqwest-transport")]
fn default_transport() -> Result<Arc<dyn Transport>> {
    Ok(Arc::new(crate::ReqwestTransport::new()))
}

#[cfg(not(feature = "reqwest-transport"))]
fn default_transport() -> Result<Arc<dyn Transport>> {
    Err(ArenaError::Config(
        "no transport available: provide ClientOptions::transport or enable the `reqwest-transport` feature".to_owned(),
    ))
}
