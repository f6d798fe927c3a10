//! `arena-http` is an async client for the Are.na REST API.
//!
//! Typed namespaces cover the v3 API ([`ArenaClient::v3`]) and the few legacy
//! v2 endpoints still in use ([`ArenaClient::legacy_v2`]). Every call goes
//! through one executor that handles:
//! - bearer authentication and content negotiation
//! - per-attempt timeouts and caller cancellation ([`RequestOptions::signal`])
//! - opt-in exponential-backoff retries ([`RetryOptions`])
//! - structured errors with rate limit metadata ([`ApiError`])
//!
//! ```no_run
//! use arena_http::{ArenaClient, ClientOptions};
//!
//! # async fn run() -> arena_http::Result<()> {
//! let client = ArenaClient::new(ClientOptions::new().token("your-token"))?;
//! let me = client.v3().users().current().await?;
//! println!("{}", me["slug"]);
//! # Ok(())
//! # }
//! ```

mod abort;
mod api_error;
mod client;
mod error;
mod executor;
mod options;
mod query;
mod request;
mod resource;
mod transport;
mod types;

pub mod legacy_v2;
pub mod v3;

pub use api_error::{ApiError, RateLimit, RateLimitTier};
pub use client::ArenaClient;
pub use error::{ArenaError, BoxError, CancelReason};
pub use executor::{HttpClient, Payload};
pub use options::{
    ClientConfig, ClientOptions, RetryOptions, RetryPolicy, DEFAULT_BASE_URL, DEFAULT_RETRY_ON,
    DEFAULT_TIMEOUT_MS,
};
pub use query::{Query, QueryValue};
pub use request::{Body, RequestDescriptor, RequestOptions, ResourceId, ResponseMode};
pub use transport::{HttpRequest, HttpResponse, Transport};
#[cfg(feature = "reqwest-transport")]
pub use transport::ReqwestTransport;
pub use types::{Entity, PaginatedResult, PaginationMeta};

pub type Result<T> = std::result::Result<T, ArenaError>;
